use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

use crate::errors::Error;

pub const ENV_PREFIX: &str = "CCP_";

/// Connection settings for the cluster management service,
/// read from `CCP_USERNAME`, `CCP_PASSWORD` and `CCP_URL`.
#[derive(Deserialize, Clone)]
pub struct ProviderConfig {
    pub username: String,
    pub password: String,
    #[serde(rename = "url")]
    pub base_url: String,
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self, Error> {
        envy::prefixed(ENV_PREFIX).from_env::<ProviderConfig>().map_err(Error::Config)
    }

    pub fn from_iter<I>(vars: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX).from_iter::<_, ProviderConfig>(vars).map_err(Error::Config)
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Settings for the manifest checking binary
#[derive(Deserialize, Debug, Clone)]
pub struct CheckConfig {
    /// Path to a YAML file holding the declared cluster tree
    pub manifest: PathBuf,
}

impl CheckConfig {
    pub fn from_env() -> Result<Self, Error> {
        envy::prefixed(ENV_PREFIX).from_env::<CheckConfig>().map_err(Error::Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_provider_config_from_prefixed_vars() {
        let config = ProviderConfig::from_iter(vars(&[
            ("CCP_USERNAME", "admin"),
            ("CCP_PASSWORD", "s3cret"),
            ("CCP_URL", "https://ccp.example.com"),
            ("UNRELATED", "ignored"),
        ]))
        .unwrap();
        assert_eq!(config.username, "admin");
        assert_eq!(config.base_url, "https://ccp.example.com");

        let debug = format!("{:?}", config);
        assert!(!debug.contains("s3cret"));
    }

    #[test]
    fn test_provider_config_missing_var() {
        let result = ProviderConfig::from_iter(vars(&[("CCP_USERNAME", "admin")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
