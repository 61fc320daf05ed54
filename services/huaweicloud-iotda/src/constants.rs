use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

// Headers used by the IoTDA application API.
pub const X_SDK_DATE: &str = "x-sdk-date";
pub const X_AUTH_TOKEN: &str = "x-auth-token";
pub const INSTANCE_ID: &str = "instance-id";

/// Algorithm id embedded in the string to sign and the Authorization value.
pub const ALGORITHM: &str = "SDK-HMAC-SHA256";

// Env values used by IoTDA credential providers.
pub const HUAWEICLOUD_SDK_AK: &str = "HUAWEICLOUD_SDK_AK";
pub const HUAWEICLOUD_SDK_SK: &str = "HUAWEICLOUD_SDK_SK";
pub const HUAWEICLOUD_SDK_TOKEN: &str = "HUAWEICLOUD_SDK_TOKEN";

/// AsciiSet for canonical query encoding.
///
/// Encode every byte except the RFC 3986 unreserved characters:
/// 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'. A space therefore
/// renders as `%20`, never as `+`.
pub static SDK_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');
