use async_trait::async_trait;
use apisign_core::{Context, ProvideCredential, Result};

use crate::credential::Credential;

/// StaticCredentialProvider returns a credential supplied at construction.
///
/// Because [`Credential`] constructors validate completeness, this provider
/// can never hand out a partially initialized credential.
#[derive(Debug)]
pub struct StaticCredentialProvider {
    credential: Credential,
}

impl StaticCredentialProvider {
    /// Create a provider around an already constructed credential.
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }
}

#[async_trait]
impl ProvideCredential for StaticCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
        Ok(Some(self.credential.clone()))
    }
}
