//! Engine runtime configuration loaded from the process environment.

use std::env;
use std::str::FromStr;

/// Connection and listener settings.
///
/// - `NEO4J_URI` / `NEO4J_USER` / `NEO4J_PASSWORD`
/// - `SERVER_HOST`, `SERVER_PORT` (falls back to `PORT`)
/// - `CORS_ALLOWED_ORIGINS`: `*` or a comma-separated origin list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub neo4j: Neo4jConfig,
    pub server_host: String,
    pub server_port: u16,
    pub cors_allowed_origins: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Neo4jConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".into(),
            user: "neo4j".into(),
            password: "password".into(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            neo4j: Neo4jConfig::default(),
            server_host: "0.0.0.0".into(),
            server_port: 3000,
            cors_allowed_origins: None,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or unparsable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(uri) = lookup("NEO4J_URI") {
            config.neo4j.uri = uri;
        }
        if let Some(user) = lookup("NEO4J_USER") {
            config.neo4j.user = user;
        }
        if let Some(password) = lookup("NEO4J_PASSWORD") {
            config.neo4j.password = password;
        }
        if let Some(host) = lookup("SERVER_HOST") {
            config.server_host = host;
        }
        if let Some(port) = read::<u16>(&lookup, "SERVER_PORT").or_else(|| read(&lookup, "PORT")) {
            config.server_port = port;
        }
        config.cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        config
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn read<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|raw| raw.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = EngineConfig::from_lookup(lookup(&[]));
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:3000");
    }

    #[test]
    fn port_falls_back_to_port_variable() {
        let config = EngineConfig::from_lookup(lookup(&[("PORT", "8080")]));
        assert_eq!(config.server_port, 8080);

        let config =
            EngineConfig::from_lookup(lookup(&[("SERVER_PORT", "9000"), ("PORT", "8080")]));
        assert_eq!(config.server_port, 9000);
    }

    #[test]
    fn invalid_port_keeps_default() {
        let config = EngineConfig::from_lookup(lookup(&[("SERVER_PORT", "http")]));
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn blank_cors_is_disabled() {
        let config = EngineConfig::from_lookup(lookup(&[("CORS_ALLOWED_ORIGINS", "  ")]));
        assert!(config.cors_allowed_origins.is_none());

        let config = EngineConfig::from_lookup(lookup(&[
            ("CORS_ALLOWED_ORIGINS", "*"),
            ("NEO4J_URI", "bolt://db:7687"),
        ]));
        assert_eq!(config.cors_allowed_origins.as_deref(), Some("*"));
        assert_eq!(config.neo4j.uri, "bolt://db:7687");
    }
}
