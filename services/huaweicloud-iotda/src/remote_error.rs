use apisign_core::Error;
use serde::Deserialize;

/// Error payload returned by the platform on non-2xx responses.
///
/// The transport collaborator deserializes this from the response body and
/// converts it into a typed [`Error`] carrying the server's error code and
/// message verbatim. No retry decision is made here.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteError {
    /// Platform error code, e.g. `IOTDA.000006`.
    pub error_code: String,
    /// Human-readable message.
    pub error_msg: String,
}

impl RemoteError {
    /// Parse an error payload from a response body.
    pub fn from_body(body: &[u8]) -> apisign_core::Result<Self> {
        serde_json::from_slice(body).map_err(|e| {
            Error::unexpected("failed to parse service error payload").with_source(e)
        })
    }
}

impl From<RemoteError> for Error {
    fn from(err: RemoteError) -> Self {
        Error::service_rejected(err.error_code, err.error_msg)
    }
}
