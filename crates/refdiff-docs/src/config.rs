use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use refdiff_core::ApiInfo;
use serde::{Deserialize, Serialize};

const DEFAULT_PORT: u16 = 8080;

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: IpAddr,
    pub port: u16,
    /// Title shown in the rendered document
    pub title: String,
    /// Server URL advertised in the document
    pub base_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let info = ApiInfo::default();
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            title: info.title,
            base_path: info.base_path,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind: lookup("REFDIFF_DOCS_BIND")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.bind),
            port: lookup("REFDIFF_DOCS_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            title: lookup("REFDIFF_DOCS_TITLE").unwrap_or(defaults.title),
            base_path: lookup("REFDIFF_DOCS_BASE_PATH").unwrap_or(defaults.base_path),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }

    pub fn api_info(&self) -> ApiInfo {
        ApiInfo {
            title: self.title.clone(),
            base_path: self.base_path.clone(),
            ..ApiInfo::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = ServerConfig::from_lookup(lookup(&[]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn env_overrides() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("REFDIFF_DOCS_BIND", "127.0.0.1"),
            ("REFDIFF_DOCS_PORT", "9000"),
            ("REFDIFF_DOCS_TITLE", "Lake API"),
        ]));
        assert_eq!(config.addr().to_string(), "127.0.0.1:9000");
        assert_eq!(config.api_info().title, "Lake API");
    }

    #[test]
    fn bad_port_falls_back() {
        let config = ServerConfig::from_lookup(lookup(&[("REFDIFF_DOCS_PORT", "http")]));
        assert_eq!(config.port, 8080);
    }
}
