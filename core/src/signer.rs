use std::sync::{Arc, Mutex};

use crate::{Context, ProvideCredential, Result, SignRequest, SigningCredential};

/// Signer is the main struct used to sign requests.
///
/// It loads a credential through the configured [`ProvideCredential`] once,
/// caches it for the client's lifetime, and hands every request to the
/// configured [`SignRequest`]. Cloning a signer shares the cache, so a
/// client may issue arbitrarily many concurrent requests through it.
#[derive(Clone, Debug)]
pub struct Signer<C: SigningCredential> {
    ctx: Context,
    provider: Arc<dyn ProvideCredential<Credential = C>>,
    builder: Arc<dyn SignRequest<Credential = C>>,
    credential: Arc<Mutex<Option<C>>>,
}

impl<C: SigningCredential> Signer<C> {
    /// Create a new signer.
    pub fn new(
        ctx: Context,
        provider: impl ProvideCredential<Credential = C>,
        builder: impl SignRequest<Credential = C>,
    ) -> Self {
        Self {
            ctx,
            provider: Arc::new(provider),
            builder: Arc::new(builder),
            credential: Arc::new(Mutex::new(None)),
        }
    }

    /// Sign an outgoing request in place.
    ///
    /// `body` is the payload that will be transmitted with the request; pass
    /// an empty slice when there is none.
    pub async fn sign(&self, req: &mut http::request::Parts, body: &[u8]) -> Result<()> {
        let cred = self.credential.lock().expect("lock poisoned").clone();
        let cred = if cred.is_valid() {
            cred
        } else {
            let loaded = self.provider.provide_credential(&self.ctx).await?;
            *self.credential.lock().expect("lock poisoned") = loaded.clone();
            loaded
        };

        self.builder
            .sign_request(&self.ctx, req, body, cred.as_ref())
            .await
    }
}
