//! apisign signs device-management API requests without effort.
//!
//! The facade crate re-exports [`apisign_core`] and the service crates
//! behind feature gates, plus a convenience constructor per service for the
//! common case.
//!
//! ```no_run
//! # #[cfg(feature = "huaweicloud-iotda")]
//! # async fn example() -> apisign_core::Result<()> {
//! let signer = apisign::huaweicloud_iotda::default_signer();
//!
//! let mut parts = http::Request::get(
//!     "https://iotda.cn-north-4.myhuaweicloud.com/v5/iot/project_id/apps",
//! )
//! .body(())
//! .unwrap()
//! .into_parts()
//! .0;
//!
//! signer.sign(&mut parts, b"").await?;
//! # Ok(())
//! # }
//! ```

pub use apisign_core::*;

/// Huawei Cloud IoT Device Access (IoTDA) application-API support.
#[cfg(feature = "huaweicloud-iotda")]
pub mod huaweicloud_iotda {
    pub use apisign_huaweicloud_iotda::*;

    use crate::{Context, OsEnv, Signer};

    /// Default IoTDA signer type with commonly used components.
    pub type DefaultSigner = Signer<Credential>;

    /// Create a default IoTDA signer with standard configuration.
    ///
    /// This function creates a signer with:
    /// - OS environment access
    /// - Default credential provider (reads `HUAWEICLOUD_SDK_AK` /
    ///   `HUAWEICLOUD_SDK_SK`, falling back to `HUAWEICLOUD_SDK_TOKEN`)
    /// - The IoTDA request signer without an instance id
    pub fn default_signer() -> DefaultSigner {
        let ctx = Context::new().with_env(OsEnv);
        let provider = DefaultCredentialProvider::new();
        Signer::new(ctx, provider, RequestSigner::new())
    }
}
