use std::fmt::Debug;

use crate::{Context, Result};

/// SigningCredential validates that a credential is complete enough to sign.
///
/// [`crate::Signer`] calls this before every signing attempt; an invalid
/// cached credential triggers a reload instead of producing an unsigned
/// request.
pub trait SigningCredential: Clone + Debug + Send + Sync + Unpin + 'static {
    /// Check if the credential is valid for signing.
    fn is_valid(&self) -> bool;
}

impl<T: SigningCredential> SigningCredential for Option<T> {
    fn is_valid(&self) -> bool {
        let Some(cred) = self else {
            return false;
        };

        cred.is_valid()
    }
}

/// ProvideCredential loads a credential from the environment.
///
/// Services require different credentials: an access key / secret key pair
/// for request signing, or a pre-issued token forwarded as-is.
#[async_trait::async_trait]
pub trait ProvideCredential: Debug + Send + Sync + Unpin + 'static {
    /// Credential returned by this provider.
    type Credential: Send + Sync + Unpin + 'static;

    /// Load a credential, returning `Ok(None)` when this source has nothing
    /// to offer so the caller can fall through to the next one.
    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>>;
}

/// SignRequest attaches authentication to an outgoing request.
///
/// Implementations run once per request, strictly before transmission, and
/// mutate only headers (and, where a canonical form requires it, the query).
#[async_trait::async_trait]
pub trait SignRequest: Debug + Send + Sync + Unpin + 'static {
    /// Credential used by this signer.
    type Credential: Send + Sync + Unpin + 'static;

    /// Sign the request described by `req` and `body`.
    ///
    /// ## Body
    ///
    /// `body` is the raw payload that will be transmitted; schemes that hash
    /// the payload read it here. Pass an empty slice for bodyless requests;
    /// the hash of the empty byte sequence is still well defined.
    ///
    /// ## Errors
    ///
    /// Any error aborts before network transmission; a partially signed
    /// request must never be sent.
    async fn sign_request(
        &self,
        ctx: &Context,
        req: &mut http::request::Parts,
        body: &[u8],
        credential: Option<&Self::Credential>,
    ) -> Result<()>;
}
