use std::sync::Arc;

use async_trait::async_trait;
use apisign_core::{Context, ProvideCredential, Result};

use crate::config::Config;
use crate::credential::Credential;

/// ConfigCredentialProvider will load a credential from config.
///
/// Values set explicitly on the [`Config`] win; anything left unset is
/// filled in from the environment. An AK/SK pair takes precedence over a
/// token, matching the platform's mode selection.
#[derive(Debug)]
pub struct ConfigCredentialProvider {
    config: Arc<Config>,
}

impl ConfigCredentialProvider {
    /// Create a new loader via config.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ProvideCredential for ConfigCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let config = self.config.as_ref().clone().from_env(ctx);

        if let (Some(ak), Some(sk)) = (&config.access_key_id, &config.secret_access_key) {
            return Credential::ak_sk(ak, sk).map(Some);
        }

        if let Some(token) = &config.auth_token {
            return Credential::token(token).map(Some);
        }

        Ok(None)
    }
}
