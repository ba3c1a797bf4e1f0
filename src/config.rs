use std::env;

use crate::error::Error;

pub const DEFAULT_BASE_URL: &str = "https://unbelievaboat.com/api";
pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Client-facing configuration.
///
/// `base_url`, `version` and `max_retries` shape the request dispatcher;
/// `user_agent` and `timeout_secs` are passed through to the underlying
/// HTTP client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// API host, without the version suffix.
    pub base_url: String,
    /// API version path segment, `v<integer>`.
    pub version: String,
    /// Maximum transport calls per logical request when the server keeps
    /// answering 429.
    pub max_retries: u32,
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_API_VERSION.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
            user_agent: format!(
                "unb-api/{} (+https://github.com/unb-rs/unb-api)",
                env!("CARGO_PKG_VERSION")
            ),
            timeout_secs: 30,
        }
    }
}

impl ClientOptions {
    /// Build options from environment overrides.
    ///
    /// Env vars (all optional):
    /// - UNB_API_URL (default: https://unbelievaboat.com/api)
    /// - UNB_API_VERSION (default: v1)
    /// - UNB_MAX_RETRIES (default: 3)
    /// - UNB_HTTP_TIMEOUT_SECS (default: 30)
    /// - UNB_USER_AGENT (default: unb-api/<version>)
    ///
    /// The API token is never read from the environment; it is an argument
    /// to [`crate::Client::new`].
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("UNB_API_URL").unwrap_or(defaults.base_url),
            version: env::var("UNB_API_VERSION").unwrap_or(defaults.version),
            max_retries: env::var("UNB_MAX_RETRIES")
                .ok()
                .and_then(|s| s.parse::<u32>().ok())
                .unwrap_or(defaults.max_retries),
            timeout_secs: env::var("UNB_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(defaults.timeout_secs),
            user_agent: env::var("UNB_USER_AGENT").unwrap_or(defaults.user_agent),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        let digits = self.version.strip_prefix('v').unwrap_or("");
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::Configuration(format!(
                "API version must match v<integer>, got {:?}",
                self.version
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_production() {
        let opts = ClientOptions::default();
        assert_eq!(opts.base_url, DEFAULT_BASE_URL);
        assert_eq!(opts.version, "v1");
        assert_eq!(opts.max_retries, 3);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn version_pattern_is_enforced() {
        for good in ["v1", "v2", "v10"] {
            let opts = ClientOptions {
                version: good.to_string(),
                ..ClientOptions::default()
            };
            assert!(opts.validate().is_ok(), "{good} should validate");
        }
        for bad in ["", "1", "v", "vx", "v1.2", "V1"] {
            let opts = ClientOptions {
                version: bad.to_string(),
                ..ClientOptions::default()
            };
            assert!(opts.validate().is_err(), "{bad:?} should be rejected");
        }
    }
}
