use anyhow::{Context, Result};
use std::env;

/// Identifier sent with every request so the store can attribute writes.
///
/// A numeric id is packed into four big-endian bytes and base64-encoded
/// before it goes on the wire; a textual id is passed through verbatim.
/// The packing itself lives in `transport::headers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientId {
    Number(u32),
    Text(String),
}

/// Centralized client configuration.
///
/// Everything the transport contract needs to build absolute URIs and
/// default headers: endpoint coordinates, TLS flag, client identifier,
/// optional basic-auth credentials, and the map-reduce endpoint path
/// (the one single-segment resource path the validator accepts).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
    pub tls: bool,
    pub client_id: ClientId,
    pub user: Option<String>,
    pub password: Option<String>,
    pub mapred_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8098,
            tls: false,
            client_id: ClientId::Text("cirrus-client".into()),
            user: None,
            password: None,
            mapred_path: "mapred".into(),
        }
    }
}

impl ClientConfig {
    /// Build a config from `CIRRUS_*` environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let host = env::var("CIRRUS_HOST").unwrap_or(defaults.host);
        let port = match env::var("CIRRUS_PORT") {
            Ok(value) => value
                .parse::<u16>()
                .with_context(|| format!("parsing CIRRUS_PORT value `{}`", value))?,
            Err(env::VarError::NotPresent) => defaults.port,
            Err(err) => return Err(err).context("reading CIRRUS_PORT"),
        };
        let tls = match env::var("CIRRUS_TLS") {
            Ok(value) => value
                .parse::<bool>()
                .with_context(|| format!("parsing CIRRUS_TLS value `{}`", value))?,
            Err(env::VarError::NotPresent) => defaults.tls,
            Err(err) => return Err(err).context("reading CIRRUS_TLS"),
        };
        let client_id = match env::var("CIRRUS_CLIENT_ID") {
            Ok(value) => match value.parse::<u32>() {
                Ok(n) => ClientId::Number(n),
                Err(_) => ClientId::Text(value),
            },
            Err(_) => defaults.client_id,
        };
        let user = env::var("CIRRUS_USER").ok();
        let password = env::var("CIRRUS_PASSWORD").ok();
        let mapred_path = env::var("CIRRUS_MAPRED_PATH").unwrap_or(defaults.mapred_path);

        Ok(Self {
            host,
            port,
            tls,
            client_id,
            user,
            password,
            mapred_path,
        })
    }

    /// Root URI every resource path is resolved against.
    pub fn root_uri(&self) -> String {
        let scheme = if self.tls { "https" } else { "http" };
        format!("{}://{}:{}", scheme, self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_uri_reflects_tls_flag() {
        let mut cfg = ClientConfig::default();
        assert_eq!(cfg.root_uri(), "http://127.0.0.1:8098");
        cfg.tls = true;
        cfg.host = "kv.example.com".into();
        cfg.port = 8443;
        assert_eq!(cfg.root_uri(), "https://kv.example.com:8443");
    }
}
