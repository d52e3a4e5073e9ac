// src/core/net.rs

// HTTP GET with retries + exponential backoff (blocking reqwest).

use std::{sync::OnceLock, thread, time::Duration};

use reqwest::blocking::Client;
use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::{info, warn};

use crate::config::consts::{ACCEPT, ACCEPT_LANGUAGE, MAX_REDIRECTS, USER_AGENT};
use crate::config::ScrapeOptions;
use crate::error::FetchError;

/// Anything that can turn a URL into a page body.
pub trait Fetch: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Delay before attempt `attempt + 1`: `base * 2^attempt` (attempt is 0-based).
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    base.saturating_mul(1u32 << attempt.min(16))
}

/// Run `op` up to `attempts` times, sleeping with exponential backoff between
/// failures. The last error is returned, stamped with the attempt count.
pub fn with_retries<T>(
    attempts: u32,
    base: Duration,
    mut op: impl FnMut(u32) -> Result<T, FetchError>,
) -> Result<T, FetchError> {
    let attempts = attempts.max(1);
    let mut attempt = 0;
    loop {
        match op(attempt) {
            Ok(v) => return Ok(v),
            Err(FetchError::Client(msg)) => return Err(FetchError::Client(msg)),
            Err(e) => {
                warn!("Attempt {} failed: {}", attempt + 1, e);
                attempt += 1;
                if attempt >= attempts {
                    return Err(e.with_attempts(attempt));
                }
                let delay = backoff_delay(base, attempt - 1);
                if !delay.is_zero() { thread::sleep(delay); }
            }
        }
    }
}

/// Blocking fetcher. The reqwest client is built on first use so the
/// fetcher can be constructed from inside an async runtime.
pub struct HttpFetcher {
    attempts: u32,
    retry_base: Duration,
    timeout: Duration,
    client: OnceLock<Client>,
}

impl HttpFetcher {
    pub fn new(opts: &ScrapeOptions) -> Self {
        Self {
            attempts: opts.max_retries,
            retry_base: opts.retry_base(),
            timeout: opts.timeout(),
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> Result<&Client, FetchError> {
        if let Some(c) = self.client.get() { return Ok(c); }
        let built = build_client(self.timeout)?;
        Ok(self.client.get_or_init(|| built))
    }

    fn get_once(&self, url: &str) -> Result<String, FetchError> {
        let resp = self.client()?.get(url).send().map_err(|e| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
            attempts: 1,
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status: status.as_u16(), attempts: 1 });
        }
        resp.text().map_err(|e| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
            attempts: 1,
        })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        with_retries(self.attempts, self.retry_base, |attempt| {
            info!("Fetching: {} (attempt {})", url, attempt + 1);
            self.get_once(url)
        })
    }
}

/// Browser-like identity; some directories reject default client headers.
fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static(ACCEPT_LANGUAGE));
    headers.insert(header::UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()
        .map_err(|e| FetchError::Client(e.to_string()))
}
