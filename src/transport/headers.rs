//! Default header assembly shared by every verb.

use crate::config::{ClientConfig, ClientId};
use crate::errors::ClientResult;
use base64::{Engine as _, engine::general_purpose};
use http::header::{self, HeaderMap, HeaderName, HeaderValue};

/// Preference order for response representations: structured multipart
/// first (sibling bodies), generic JSON at reduced priority, anything else
/// last.
pub const ACCEPT_VALUE: &str = "multipart/mixed, application/json;q=0.7, */*;q=0.5";

pub const CLIENT_ID_HEADER: HeaderName = HeaderName::from_static("x-cirrus-clientid");

/// Wire form of the client identifier: a numeric id is packed as a 4-byte
/// big-endian integer and base64-encoded, a textual id passes through
/// verbatim.
pub fn encode_client_id(id: &ClientId) -> String {
    match id {
        ClientId::Number(n) => general_purpose::STANDARD.encode(n.to_be_bytes()),
        ClientId::Text(t) => t.clone(),
    }
}

/// The header set every request starts from: Accept preference, client
/// identifier, and basic-auth credentials when configured. Caller-supplied
/// headers are merged over these and win on collision.
pub fn default_headers(config: &ClientConfig) -> ClientResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT_VALUE));
    headers.insert(
        CLIENT_ID_HEADER,
        HeaderValue::from_str(&encode_client_id(&config.client_id))?,
    );

    if let Some(user) = &config.user {
        let credentials = format!(
            "{}:{}",
            user,
            config.password.as_deref().unwrap_or_default()
        );
        let value = format!("Basic {}", general_purpose::STANDARD.encode(credentials));
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&value)?);
    }

    Ok(headers)
}

/// Merge caller headers over the defaults; every caller value for a name
/// replaces the default value for that name.
pub fn merge_headers(mut defaults: HeaderMap, caller: &HeaderMap) -> HeaderMap {
    for name in caller.keys() {
        defaults.remove(name);
        for value in caller.get_all(name) {
            defaults.append(name.clone(), value.clone());
        }
    }
    defaults
}
