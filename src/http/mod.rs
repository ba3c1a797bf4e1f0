use std::time::Duration;

use log::{debug, warn};
use reqwest::header::{HeaderValue, AUTHORIZATION, RETRY_AFTER, USER_AGENT};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::ClientOptions;
use crate::error::Error;

pub mod ratelimit;

use ratelimit::{now_ts, route_key, RateLimitRecord, RateLimitTracker};

/// Percent-encode one path segment so interpolated IDs cannot escape their
/// route slot (keeps the rate-limit key space bounded by the endpoint set).
pub fn encode_path_segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

fn build_client(options: &ClientOptions) -> Result<Client, Error> {
    let user_agent = HeaderValue::from_str(&options.user_agent)
        .map_err(|_| Error::Configuration("user agent is not a valid header value".into()))?;
    let mut default_headers = reqwest::header::HeaderMap::new();
    default_headers.insert(USER_AGENT, user_agent);
    let client = Client::builder()
        .default_headers(default_headers)
        .timeout(Duration::from_secs(options.timeout_secs))
        .use_rustls_tls()
        .build()?;
    Ok(client)
}

/// Issues HTTP calls against the API, folds rate-limit headers into the
/// per-route tracker, and transparently retries throttled requests with
/// bounded attempts and server-directed backoff.
#[derive(Debug)]
pub struct RequestHandler {
    http: Client,
    auth: HeaderValue,
    base: String,
    max_retries: u32,
    ratelimits: RateLimitTracker,
}

impl RequestHandler {
    pub fn new(token: &str, options: &ClientOptions) -> Result<Self, Error> {
        options.validate()?;
        Url::parse(&options.base_url)?;
        // The API expects the raw token, no Bearer prefix.
        let auth = HeaderValue::from_str(token)
            .map_err(|_| Error::Configuration("token is not a valid header value".into()))?;
        Ok(Self {
            http: build_client(options)?,
            auth,
            base: api_base(options),
            max_retries: options.max_retries,
            ratelimits: RateLimitTracker::new(),
        })
    }

    /// Last reported rate-limit state for a route, if any response has been
    /// seen for it. Informational; sends are never gated on this.
    pub fn ratelimit(&self, method: &Method, route: &str) -> RateLimitRecord {
        self.ratelimits.acquire(&route_key(method, route), now_ts())
    }

    /// Perform one logical call: dispatch, track rate-limit headers, retry
    /// on 429 until `max_retries` transport calls have been spent.
    ///
    /// The retry is a tail iteration of the same chain, so the caller's
    /// future resolves with the retry's eventual outcome. Attempts are
    /// counted per chain, not per route; concurrent calls do not block
    /// each other.
    pub async fn request<T, B>(&self, method: Method, route: &str, body: &B) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let key = route_key(&method, route);
        let url = format!("{}/{}", self.base, route);
        let mut attempt: u32 = 0;
        loop {
            self.ratelimits.acquire(&key, now_ts());
            debug!("{} {} (attempt {})", method, route, attempt);

            let res = self
                .http
                .request(method.clone(), &url)
                .header(AUTHORIZATION, self.auth.clone())
                .json(body)
                .send()
                .await?;

            attempt += 1;

            let status = res.status();
            // Headers are folded in before classification; rate-limit
            // headers may accompany any status code.
            let headers = res.headers().clone();
            self.ratelimits.update(&key, &headers, now_ts());

            if status.is_success() {
                return Ok(res.json::<T>().await?);
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                if attempt >= self.max_retries {
                    warn!("{} {} still throttled after {} attempts", method, route, attempt);
                    return Err(Error::RetryExhausted { attempts: attempt });
                }
                let retry_after = headers
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.trim().parse::<u64>().ok());
                match retry_after {
                    Some(secs) => {
                        warn!("{} {} throttled, retrying in {}s", method, route, secs);
                        tokio::time::sleep(Duration::from_secs(secs)).await;
                    }
                    None => warn!("{} {} throttled, retrying immediately", method, route),
                }
                continue;
            }

            let body_text = res.text().await.unwrap_or_default();
            return Err(Error::RequestFailed {
                status,
                body: body_text,
            });
        }
    }
}

fn api_base(options: &ClientOptions) -> String {
    format!(
        "{}/{}",
        options.base_url.trim_end_matches('/'),
        options.version
    )
}
