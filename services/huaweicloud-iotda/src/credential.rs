use std::fmt::{Debug, Formatter};

use apisign_core::{utils::Redact, Error, Result, SigningCredential};

/// Credential for IoTDA application APIs.
///
/// The two authentication modes the platform supports are mutually
/// exclusive, so the credential is an enum: a request is either signed with
/// an Access Key / Secret Key pair or carries a pre-issued IAM token.
/// Constructors validate completeness, so a partially initialized credential
/// can never reach the signing path.
#[derive(Clone)]
pub enum Credential {
    /// Access Key / Secret Key pair for SDK-HMAC-SHA256 request signing.
    AkSk {
        /// Access key id, echoed in the Authorization value.
        access_key_id: String,
        /// Secret access key, the HMAC key. Never transmitted.
        secret_access_key: String,
    },
    /// Pre-issued IAM token, forwarded in `X-Auth-Token` without signing.
    Token {
        /// The token value.
        token: String,
    },
}

impl Credential {
    /// Create an AK/SK credential.
    ///
    /// Fails when either component is empty; an incomplete credential must
    /// be rejected at construction time rather than downgraded to an
    /// unsigned request later.
    pub fn ak_sk(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Result<Self> {
        let access_key_id = access_key_id.into();
        let secret_access_key = secret_access_key.into();

        if access_key_id.is_empty() {
            return Err(Error::credential_invalid("access key id is empty"));
        }
        if secret_access_key.is_empty() {
            return Err(Error::credential_invalid("secret access key is empty"));
        }

        Ok(Self::AkSk {
            access_key_id,
            secret_access_key,
        })
    }

    /// Create a token credential.
    ///
    /// Fails when the token is empty.
    pub fn token(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::credential_invalid("token is empty"));
        }

        Ok(Self::Token { token })
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AkSk {
                access_key_id,
                secret_access_key,
            } => f
                .debug_struct("Credential::AkSk")
                .field("access_key_id", &Redact::from(access_key_id))
                .field("secret_access_key", &Redact::from(secret_access_key))
                .finish(),
            Self::Token { token } => f
                .debug_struct("Credential::Token")
                .field("token", &Redact::from(token))
                .finish(),
        }
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        match self {
            Self::AkSk {
                access_key_id,
                secret_access_key,
            } => !access_key_id.is_empty() && !secret_access_key.is_empty(),
            Self::Token { token } => !token.is_empty(),
        }
    }
}
