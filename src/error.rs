use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the client.
///
/// Retries are transparent to the caller: a logical call resolves with
/// either the parsed result or exactly one of these, never an intermediate
/// throttled response.
#[derive(Debug, Error)]
pub enum Error {
    /// The client was constructed with invalid settings (empty token,
    /// malformed version string, unusable header values).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The configured base URL did not parse.
    #[error("invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    /// The throttle retry ceiling was reached for one logical call chain.
    #[error("rate limited; gave up after {attempts} attempts")]
    RetryExhausted { attempts: u32 },

    /// Any non-2xx, non-429 response. Carries the raw body for diagnosis.
    #[error("request failed with status {status}: {body}")]
    RequestFailed { status: StatusCode, body: String },

    /// Network-level or decode failure from the underlying transport,
    /// propagated unmodified.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}
