//! Signers for Huawei Cloud IoT Device Access (IoTDA) application APIs.
//!
//! The platform authenticates application-side calls with either an
//! `SDK-HMAC-SHA256` signature computed from an Access Key / Secret Key
//! pair, or a pre-issued IAM token forwarded in `X-Auth-Token`. This crate
//! provides the credential type, the credential providers, and the
//! [`RequestSigner`] that attaches the right headers before transmission.

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::{
    ConfigCredentialProvider, DefaultCredentialProvider, EnvCredentialProvider,
    StaticCredentialProvider,
};

mod remote_error;
pub use remote_error::RemoteError;

mod sign_request;
pub use sign_request::RequestSigner;

mod constants;
