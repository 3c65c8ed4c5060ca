/// Console configuration, read from the environment

use std::env;
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_TOKEN_FILE: &str = ".catalog_token";

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Base URL of the product service
    pub api_url: String,

    /// File holding the bearer token between runs
    pub token_file: PathBuf,
}

impl ConsoleConfig {
    /// Loads configuration from environment variables (and `.env` if present)
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            api_url: lookup("CATALOG_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token_file: lookup("CATALOG_TOKEN_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::from_lookup(|_| None);

        assert_eq!(config.api_url, "http://localhost:5000");
        assert_eq!(config.token_file, PathBuf::from(".catalog_token"));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("CATALOG_API_URL", "https://catalog.example.com"),
            ("CATALOG_TOKEN_FILE", "/tmp/token"),
        ]
        .into_iter()
        .collect();

        let config = ConsoleConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.api_url, "https://catalog.example.com");
        assert_eq!(config.token_file, PathBuf::from("/tmp/token"));
    }
}
