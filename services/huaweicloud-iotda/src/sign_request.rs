use std::fmt::Write;

use async_trait::async_trait;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::request::Parts;
use http::HeaderValue;
use log::debug;
use percent_encoding::utf8_percent_encode;

use apisign_core::hash::{hex_hmac_sha256, hex_sha256};
use apisign_core::time::{format_sdk_date, now, DateTime};
use apisign_core::{Context, Error, Result, SignRequest, SigningRequest};

use crate::constants::*;
use crate::credential::Credential;

/// RequestSigner that implements IoTDA application-API authentication.
///
/// Runs once per outgoing request, strictly before transmission:
///
/// 1. Defaults `Content-Type` to `application/json` when absent.
/// 2. Sets `X-Sdk-Date` to the current UTC time.
/// 3. AK/SK mode: computes the SDK-HMAC-SHA256 signature over the request
///    as currently populated and sets `Authorization`. Token mode: sets
///    `X-Auth-Token` instead; no canonical computation happens.
/// 4. Forwards `Instance-Id` when one is configured.
///
/// There is no retry state here; transport-level policy belongs to the
/// collaborator that sends the request.
#[derive(Debug, Default)]
pub struct RequestSigner {
    instance_id: Option<String>,
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new request signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward the given instance id with every request.
    ///
    /// An empty id counts as not configured. The header is set after
    /// signing, so it never appears in SignedHeaders.
    pub fn with_instance_id(mut self, instance_id: impl Into<String>) -> Self {
        let instance_id = instance_id.into();
        if !instance_id.is_empty() {
            self.instance_id = Some(instance_id);
        }
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }
}

#[async_trait]
impl SignRequest for RequestSigner {
    type Credential = Credential;

    async fn sign_request(
        &self,
        _ctx: &Context,
        parts: &mut Parts,
        body: &[u8],
        credential: Option<&Self::Credential>,
    ) -> Result<()> {
        let cred =
            credential.ok_or_else(|| Error::credential_invalid("no credential loaded"))?;

        let now = self.time.unwrap_or_else(now);
        let mut req = SigningRequest::build(parts)?;

        if req.headers.get(CONTENT_TYPE).is_none() {
            req.headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let sdk_date = format_sdk_date(now);
        req.headers.insert(X_SDK_DATE, sdk_date.parse()?);

        match cred {
            Credential::Token { token } => {
                let mut value: HeaderValue = token.parse()?;
                value.set_sensitive(true);
                req.headers.insert(X_AUTH_TOKEN, value);
            }
            Credential::AkSk {
                access_key_id,
                secret_access_key,
            } => {
                canonicalize_query(&mut req);

                let creq = canonical_request_string(&req, body)?;
                debug!("calculated canonical request: {creq}");

                // Double hash: the signer consumes the digest of the
                // canonical text, never the text itself.
                let digest = hex_sha256(creq.as_bytes());
                let string_to_sign = format!("{ALGORITHM}\n{sdk_date}\n{digest}");
                debug!("calculated string to sign: {string_to_sign}");

                let signature =
                    hex_hmac_sha256(secret_access_key.as_bytes(), string_to_sign.as_bytes());
                let signed_headers = req.header_name_to_vec_sorted().join(";");

                // The value starts with a space, has a space after the
                // Access value's comma, and none before Signature.
                let mut authorization: HeaderValue = format!(
                    " {ALGORITHM} Access={access_key_id}, \
                     SignedHeaders={signed_headers},Signature={signature}"
                )
                .parse()?;
                authorization.set_sensitive(true);
                req.headers.insert(AUTHORIZATION, authorization);
            }
        }

        if let Some(instance_id) = &self.instance_id {
            req.headers.insert(INSTANCE_ID, instance_id.parse()?);
        }

        req.apply(parts)
    }
}

/// Sort query pairs by raw key in place.
///
/// The sort is stable, so repeated keys keep the relative order the caller
/// supplied. Nothing is deduplicated. Pairs stay percent-decoded here;
/// encoding happens when the canonical text is rendered and again when the
/// descriptor is applied back to the request.
fn canonicalize_query(req: &mut SigningRequest) {
    req.query.sort_by(|a, b| a.0.cmp(&b.0));
}

/// Assemble the canonical request text.
///
/// ## Format
///
/// ```text
/// HTTPRequestMethod + "\n" +
/// CanonicalURI + "\n" +
/// CanonicalQueryString + "\n" +
/// CanonicalHeaders + "\n" +
/// SignedHeaders + "\n" +
/// lowercase-hex(SHA256(RequestPayload))
/// ```
fn canonical_request_string(req: &SigningRequest, body: &[u8]) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    writeln!(f, "{}", req.method.as_str().to_uppercase())?;

    // The canonical URI always ends with a slash. Dot segments are not
    // normalized away; signatures over paths containing them simply differ.
    f.push_str(&req.path);
    if !req.path.ends_with('/') {
        f.push('/');
    }
    f.push('\n');

    writeln!(
        f,
        "{}",
        req.query
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, &SDK_ENCODE_SET),
                    utf8_percent_encode(v, &SDK_ENCODE_SET)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    )?;

    let signed_headers = req.header_name_to_vec_sorted();
    for name in signed_headers.iter() {
        writeln!(f, "{}:{}", name, req.headers[*name].to_str()?)?;
    }
    writeln!(f)?;
    writeln!(f, "{}", signed_headers.join(";"))?;

    // An absent body hashes as the digest of zero bytes, not of a
    // placeholder string.
    write!(f, "{}", hex_sha256(body))?;

    Ok(f)
}

#[cfg(test)]
mod tests {
    use apisign_core::time::parse_sdk_date;
    use apisign_core::Signer;
    use http::HeaderMap;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::provide_credential::StaticCredentialProvider;

    const TEST_AK: &str = "S4QUJL4COTKPPR2VIFTF";
    const TEST_SK: &str = "hRsE5wFm31FpjCmQjxx9vqcodn7eFgDuE8q6eq5W";
    const TEST_DATE: &str = "20210301T034714Z";

    fn ak_sk_signer() -> Signer<Credential> {
        let provider =
            StaticCredentialProvider::new(Credential::ak_sk(TEST_AK, TEST_SK).unwrap());
        let builder = RequestSigner::new().with_time(parse_sdk_date(TEST_DATE).unwrap());
        Signer::new(Context::new(), provider, builder)
    }

    async fn sign(req: http::Request<Vec<u8>>) -> Parts {
        let (mut parts, body) = req.into_parts();
        ak_sk_signer()
            .sign(&mut parts, &body)
            .await
            .expect("sign must succeed");
        parts
    }

    fn signature_of(headers: &HeaderMap) -> String {
        headers[AUTHORIZATION]
            .to_str()
            .expect("authorization must be ascii")
            .split("Signature=")
            .nth(1)
            .expect("authorization must carry a signature")
            .to_string()
    }

    fn get(uri: &str) -> http::Request<Vec<u8>> {
        http::Request::get(uri).body(Vec::new()).unwrap()
    }

    // Golden scenario, pinned against an independently computed
    // HMAC-SHA256 reference value.
    #[tokio::test]
    async fn test_sign_get_apps_golden() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut req =
            get("https://iotda.cn-north-4.myhuaweicloud.com/v5/iot/project_id/apps");
        req.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let parts = sign(req).await;

        assert_eq!(parts.headers[X_SDK_DATE], TEST_DATE);
        assert_eq!(
            parts.headers[AUTHORIZATION].to_str().unwrap(),
            " SDK-HMAC-SHA256 Access=S4QUJL4COTKPPR2VIFTF, \
             SignedHeaders=content-type;x-sdk-date,\
             Signature=8d0b701b90eaf183553358218931dac83d713125527ec1e04c44eecf373a0cc3"
        );
    }

    // Content-Type is defaulted before signing, so leaving it unset must
    // reproduce the golden signature exactly.
    #[tokio::test]
    async fn test_default_content_type_is_signed() {
        let parts =
            sign(get("https://iotda.cn-north-4.myhuaweicloud.com/v5/iot/project_id/apps")).await;

        assert_eq!(parts.headers[CONTENT_TYPE], "application/json");
        assert_eq!(
            signature_of(&parts.headers),
            "8d0b701b90eaf183553358218931dac83d713125527ec1e04c44eecf373a0cc3"
        );
    }

    #[tokio::test]
    async fn test_sign_query_encoding() {
        let parts = sign(get(
            "https://iotda.cn-north-4.myhuaweicloud.com/v5/iot/project_id/devices?limit=10&app_id=a%20b",
        ))
        .await;

        assert_eq!(
            signature_of(&parts.headers),
            "6304dcb80340976475124b7a1e69f9e35593fb9c58dce55d5e5d60415899de3a"
        );
        // The outgoing query is the canonical one: sorted and re-encoded.
        assert_eq!(parts.uri.query(), Some("app_id=a%20b&limit=10"));
    }

    #[tokio::test]
    async fn test_sign_post_with_body() {
        let req = http::Request::post(
            "https://iotda.cn-north-4.myhuaweicloud.com/v5/iot/project_id/devices",
        )
        .body(br#"{"device_name":"sensor"}"#.to_vec())
        .unwrap();

        let parts = sign(req).await;
        assert_eq!(
            signature_of(&parts.headers),
            "b0959db620f9cae1f62ed8485194e69306f31347ab238f1f18609e369720d762"
        );
    }

    // Repeated keys are both retained, in the order the caller supplied.
    #[tokio::test]
    async fn test_duplicate_query_keys_keep_original_order() {
        let parts = sign(get(
            "https://iotda.cn-north-4.myhuaweicloud.com/v5/iot/project_id/devices?tag=b&tag=a",
        ))
        .await;

        assert_eq!(
            signature_of(&parts.headers),
            "2770ad0d7f864e2d9364da25be76cea5282c4ccc2fde3a49854301bacdfe7393"
        );
        assert_eq!(parts.uri.query(), Some("tag=b&tag=a"));
    }

    #[tokio::test]
    async fn test_query_order_invariance() {
        let a = sign(get(
            "https://iotda.cn-north-4.myhuaweicloud.com/v5/iot/project_id/devices?limit=10&app_id=a%20b",
        ))
        .await;
        let b = sign(get(
            "https://iotda.cn-north-4.myhuaweicloud.com/v5/iot/project_id/devices?app_id=a%20b&limit=10",
        ))
        .await;

        assert_eq!(signature_of(&a.headers), signature_of(&b.headers));
    }

    #[tokio::test]
    async fn test_determinism() {
        let a = sign(get(
            "https://iotda.cn-north-4.myhuaweicloud.com/v5/iot/project_id/apps",
        ))
        .await;
        let b = sign(get(
            "https://iotda.cn-north-4.myhuaweicloud.com/v5/iot/project_id/apps",
        ))
        .await;

        assert_eq!(
            a.headers[AUTHORIZATION].to_str().unwrap(),
            b.headers[AUTHORIZATION].to_str().unwrap()
        );
    }

    #[tokio::test]
    async fn test_path_normalization() {
        let bare = sign(get(
            "https://iotda.cn-north-4.myhuaweicloud.com/v5/iot/p/apps",
        ))
        .await;
        let slashed = sign(get(
            "https://iotda.cn-north-4.myhuaweicloud.com/v5/iot/p/apps/",
        ))
        .await;

        assert_eq!(signature_of(&bare.headers), signature_of(&slashed.headers));
    }

    #[tokio::test]
    async fn test_signature_sensitivity() {
        let base_uri = "https://iotda.cn-north-4.myhuaweicloud.com/v5/iot/project_id/apps";
        let base = signature_of(&sign(get(base_uri)).await.headers);

        // Method.
        let req = http::Request::post(base_uri).body(Vec::new()).unwrap();
        assert_ne!(base, signature_of(&sign(req).await.headers));

        // Path.
        let req = get("https://iotda.cn-north-4.myhuaweicloud.com/v5/iot/project_id/devices");
        assert_ne!(base, signature_of(&sign(req).await.headers));

        // Body.
        let req = http::Request::get(base_uri).body(b"{}".to_vec()).unwrap();
        assert_ne!(base, signature_of(&sign(req).await.headers));

        // Signed header value.
        let mut req = get(base_uri);
        req.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert_ne!(base, signature_of(&sign(req).await.headers));
    }

    // SignedHeaders always echoes the sorted lowercase names present at
    // signing time.
    #[tokio::test]
    async fn test_signed_headers_echo() {
        let mut req = get("https://iotda.cn-north-4.myhuaweicloud.com/v5/iot/project_id/apps");
        req.headers_mut()
            .insert("My-Header", HeaderValue::from_static("1"));

        let parts = sign(req).await;
        let auth = parts.headers[AUTHORIZATION].to_str().unwrap().to_string();

        assert!(auth.contains("SignedHeaders=content-type;my-header;x-sdk-date,"));
    }

    #[tokio::test]
    async fn test_token_mode_gating() {
        let provider =
            StaticCredentialProvider::new(Credential::token("my-iam-token").unwrap());
        let signer = Signer::new(Context::new(), provider, RequestSigner::new());

        let (mut parts, _) =
            get("https://iotda.cn-north-4.myhuaweicloud.com/v5/iot/project_id/apps").into_parts();
        signer.sign(&mut parts, b"").await.unwrap();

        assert_eq!(parts.headers[X_AUTH_TOKEN], "my-iam-token");
        assert!(parts.headers.get(AUTHORIZATION).is_none());
    }

    // Token mode skips canonicalization, but the rebuilt URI must still
    // carry the query correctly encoded and in its original order.
    #[tokio::test]
    async fn test_token_mode_keeps_query_encoded() {
        let provider =
            StaticCredentialProvider::new(Credential::token("my-iam-token").unwrap());
        let signer = Signer::new(Context::new(), provider, RequestSigner::new());

        let (mut parts, _) = get(
            "https://iotda.cn-north-4.myhuaweicloud.com/v5/iot/project_id/devices?limit=10&app_id=a%20b&filter=x%26y",
        )
        .into_parts();
        signer.sign(&mut parts, b"").await.unwrap();

        assert_eq!(parts.headers[X_AUTH_TOKEN], "my-iam-token");
        assert_eq!(
            parts.uri.query(),
            Some("limit=10&app_id=a%20b&filter=x%26y")
        );
    }

    #[tokio::test]
    async fn test_instance_id_forwarded_but_unsigned() {
        let provider =
            StaticCredentialProvider::new(Credential::ak_sk(TEST_AK, TEST_SK).unwrap());
        let builder = RequestSigner::new()
            .with_instance_id("inst-42")
            .with_time(parse_sdk_date(TEST_DATE).unwrap());
        let signer = Signer::new(Context::new(), provider, builder);

        let (mut parts, _) =
            get("https://iotda.cn-north-4.myhuaweicloud.com/v5/iot/project_id/apps").into_parts();
        signer.sign(&mut parts, b"").await.unwrap();

        assert_eq!(parts.headers[INSTANCE_ID], "inst-42");
        // Set after signing, so it never shows up in SignedHeaders and the
        // golden signature is unchanged.
        assert_eq!(
            signature_of(&parts.headers),
            "8d0b701b90eaf183553358218931dac83d713125527ec1e04c44eecf373a0cc3"
        );
    }

    #[tokio::test]
    async fn test_empty_instance_id_is_ignored() {
        let builder = RequestSigner::new().with_instance_id("");
        let provider =
            StaticCredentialProvider::new(Credential::token("my-iam-token").unwrap());
        let signer = Signer::new(Context::new(), provider, builder);

        let (mut parts, _) =
            get("https://iotda.cn-north-4.myhuaweicloud.com/v5/iot/project_id/apps").into_parts();
        signer.sign(&mut parts, b"").await.unwrap();

        assert!(parts.headers.get(INSTANCE_ID).is_none());
    }
}
