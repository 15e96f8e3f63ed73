use std::time::Duration;

/// Errors raised while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Client configuration loaded from environment variables.
///
/// All fields have defaults suitable for a locally running backend.
#[derive(Debug, Clone, PartialEq)]
pub struct CliConfig {
    /// Root of the backend REST API (default: `http://localhost:8080/api`).
    pub api_base_url: String,
    /// Bearer token of the signed-in user, if any.
    pub api_token: Option<String>,
    /// HTTP request timeout (default: 30 s).
    pub request_timeout: Duration,
}

impl CliConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default                     |
    /// |------------------------|-----------------------------|
    /// | `API_BASE_URL`         | `http://localhost:8080/api` |
    /// | `API_TOKEN`            | unset                       |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = lookup("API_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| "http://localhost:8080/api".into());

        let api_token = lookup("API_TOKEN").filter(|v| !v.is_empty());

        let request_timeout_secs: u64 = match lookup("REQUEST_TIMEOUT_SECS") {
            None => 30,
            Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: "REQUEST_TIMEOUT_SECS",
                expected: "u64",
                value,
            })?,
        };

        Ok(Self {
            api_base_url,
            api_token,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}
