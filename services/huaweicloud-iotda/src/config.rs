use std::fmt::{Debug, Formatter};

use apisign_core::{utils::Redact, Context};

use crate::constants::*;

/// Config carries credential configuration for IoTDA application APIs.
#[derive(Clone, Default)]
pub struct Config {
    /// `access_key_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`HUAWEICLOUD_SDK_AK`]
    pub access_key_id: Option<String>,
    /// `secret_access_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`HUAWEICLOUD_SDK_SK`]
    pub secret_access_key: Option<String>,
    /// `auth_token` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`HUAWEICLOUD_SDK_TOKEN`]
    ///
    /// Only consulted when no AK/SK pair is available.
    pub auth_token: Option<String>,
}

impl Config {
    /// Create a new Config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set access_key_id.
    pub fn with_access_key_id(mut self, access_key_id: impl Into<String>) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self
    }

    /// Set secret_access_key.
    pub fn with_secret_access_key(mut self, secret_access_key: impl Into<String>) -> Self {
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Set auth_token.
    pub fn with_auth_token(mut self, auth_token: impl Into<String>) -> Self {
        self.auth_token = Some(auth_token.into());
        self
    }

    /// Load config from env.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(v) = ctx.env_var(HUAWEICLOUD_SDK_AK) {
            self.access_key_id.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(HUAWEICLOUD_SDK_SK) {
            self.secret_access_key.get_or_insert(v);
        }
        if let Some(v) = ctx.env_var(HUAWEICLOUD_SDK_TOKEN) {
            self.auth_token.get_or_insert(v);
        }

        self
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &self.access_key_id.as_ref().map(Redact::from))
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(Redact::from),
            )
            .field("auth_token", &self.auth_token.as_ref().map(Redact::from))
            .finish()
    }
}
