use crate::HevyError;
use secrecy::SecretString;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.hevyapp.com";
pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_USER_AGENT: &str = "go-hevy (https://github.com/swrm-io/go-hevy)";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct Config {
    pub api_key: SecretString,
    pub base_url: String,
    pub api_version: String,
    pub user_agent: String,
    /// Applied to each HTTP call, not to multi-page operations.
    pub timeout: Duration,
}

impl Config {
    /// Configuration pointing at the production API with default settings.
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.into(),
            api_version: DEFAULT_API_VERSION.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn from_env() -> Result<Self, HevyError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function instead of the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, HevyError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let api = get("HEVY_API_KEY")
            .filter(|k| !k.is_empty())
            .ok_or_else(|| HevyError::Config("HEVY_API_KEY missing".into()))?;
        let mut cfg = Self::new(SecretString::new(api.into()));
        if let Some(base_url) = get("HEVY_BASE_URL") {
            cfg.base_url = base_url;
        }
        if let Some(version) = get("HEVY_API_VERSION") {
            cfg.api_version = version;
        }
        if let Some(agent) = get("HEVY_USER_AGENT") {
            cfg.user_agent = agent;
        }
        if let Some(secs) = get("HEVY_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                HevyError::Config(format!("HEVY_TIMEOUT_SECS is not a number: {secs}"))
            })?;
            cfg.timeout = Duration::from_secs(secs);
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn from_env_missing_api_key() {
        let get = |k: &str| match k {
            "HEVY_BASE_URL" => Some("http://localhost".into()),
            _ => None,
        };
        let res = Config::from_env_with(get);
        assert!(matches!(res, Err(HevyError::Config(_))));
    }

    #[test]
    fn from_env_applies_defaults() {
        let get = |k: &str| match k {
            "HEVY_API_KEY" => Some("sekrit".into()),
            _ => None,
        };
        let cfg = Config::from_env_with(get).expect("cfg");
        assert_eq!(cfg.api_key.expose_secret(), "sekrit");
        assert_eq!(cfg.base_url, "https://api.hevyapp.com");
        assert_eq!(cfg.api_version, "v1");
        assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(cfg.timeout, Duration::from_secs(10));
    }

    #[test]
    fn from_env_reads_overrides() {
        let get = |k: &str| match k {
            "HEVY_API_KEY" => Some("sekrit".into()),
            "HEVY_BASE_URL" => Some("http://localhost:8080".into()),
            "HEVY_USER_AGENT" => Some("my-app/1.0".into()),
            "HEVY_TIMEOUT_SECS" => Some("30".into()),
            _ => None,
        };
        let cfg = Config::from_env_with(get).expect("cfg");
        assert_eq!(cfg.base_url, "http://localhost:8080");
        assert_eq!(cfg.user_agent, "my-app/1.0");
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }

    #[test]
    fn from_env_rejects_bad_timeout() {
        let get = |k: &str| match k {
            "HEVY_API_KEY" => Some("sekrit".into()),
            "HEVY_TIMEOUT_SECS" => Some("soon".into()),
            _ => None,
        };
        assert!(Config::from_env_with(get).is_err());
    }
}
