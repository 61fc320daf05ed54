use async_trait::async_trait;
use apisign_core::{Context, ProvideCredential, Result};

use crate::constants::*;
use crate::credential::Credential;

/// EnvCredentialProvider loads IoTDA credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `HUAWEICLOUD_SDK_AK`: the access key id
/// - `HUAWEICLOUD_SDK_SK`: the secret access key
/// - `HUAWEICLOUD_SDK_TOKEN`: a pre-issued IAM token, consulted only when no
///   AK/SK pair is present
#[derive(Debug, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for EnvCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let envs = ctx.env_vars();

        match (envs.get(HUAWEICLOUD_SDK_AK), envs.get(HUAWEICLOUD_SDK_SK)) {
            (Some(ak), Some(sk)) => Credential::ak_sk(ak, sk).map(Some),
            _ => match envs.get(HUAWEICLOUD_SDK_TOKEN) {
                Some(token) => Credential::token(token).map(Some),
                None => Ok(None),
            },
        }
    }
}
