// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! HTTP transport with rate-limit recovery
//!
//! [`RateLimitedTransport`] wraps an [`HttpClient`] and a [`Clock`]. When the
//! upstream reports an exhausted quota it sleeps until the advertised reset
//! time plus a guard interval, then repeats the identical request. Any other
//! non-success status is returned as [`GithubError::Status`].

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::GithubError;
use crate::pagination::parse_next_link;

/// Seconds added on top of the advertised reset time
pub const DEFAULT_GUARD_SECONDS: u64 = 5;

/// Assumed wait when the reset header is missing
const FALLBACK_RESET_SECONDS: i64 = 60;

const REMAINING_HEADER: &str = "x-ratelimit-remaining";
const RESET_HEADER: &str = "x-ratelimit-reset";

/// A request header or query parameter
pub type Pair = (String, String);

/// A fully buffered HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers, in arrival order
    pub headers: Vec<Pair>,
    /// Response body
    pub body: String,
}

impl HttpResponse {
    /// Build a response from parts
    #[must_use]
    pub fn new(status: u16, headers: Vec<Pair>, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Look up a header, ignoring case
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Whether the status is 2xx
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// URL of the `rel="next"` relation, if the response has one
    #[must_use]
    pub fn next_link(&self) -> Option<String> {
        self.header("link").and_then(parse_next_link)
    }

    /// Parse the body as JSON
    ///
    /// # Errors
    ///
    /// Returns `GithubError::Json` if the body is not valid JSON.
    pub fn json(&self) -> Result<Value, GithubError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Something that can perform a GET request
///
/// Implementations return non-2xx responses as `Ok` so the caller can
/// inspect their headers; only failures to obtain a response are `Err`.
pub trait HttpClient {
    /// Perform a GET request
    ///
    /// # Errors
    ///
    /// Returns `GithubError::Transport` if no response could be obtained.
    fn get(&self, url: &str, headers: &[Pair], params: &[Pair])
    -> Result<HttpResponse, GithubError>;
}

/// Blocking [`HttpClient`] backed by `ureq`
#[derive(Debug, Clone)]
pub struct UreqClient {
    agent: ureq::Agent,
}

impl UreqClient {
    /// Create a client with no request timeouts
    #[must_use]
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
        }
    }
}

impl Default for UreqClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for UreqClient {
    fn get(
        &self,
        url: &str,
        headers: &[Pair],
        params: &[Pair],
    ) -> Result<HttpResponse, GithubError> {
        let mut request = self.agent.get(url);
        for (name, value) in headers {
            request = request.set(name, value);
        }
        for (key, value) in params {
            request = request.query(key, value);
        }

        let response = match request.call() {
            Ok(response) | Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(transport)) => {
                return Err(GithubError::Transport {
                    url: url.to_string(),
                    message: transport.to_string(),
                });
            }
        };

        let status = response.status();
        let headers = response
            .headers_names()
            .into_iter()
            .filter_map(|name| {
                let value = response.header(&name)?.to_string();
                Some((name, value))
            })
            .collect();
        let body = response
            .into_string()
            .map_err(|e| GithubError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// GET transport that waits out rate-limit exhaustion
#[derive(Debug)]
pub struct RateLimitedTransport<H, C = SystemClock> {
    http: H,
    clock: C,
    guard: Duration,
}

impl<H: HttpClient> RateLimitedTransport<H, SystemClock> {
    /// Wrap `http` using the system clock
    #[must_use]
    pub fn new(http: H) -> Self {
        Self::with_clock(http, SystemClock)
    }
}

impl<H: HttpClient, C: Clock> RateLimitedTransport<H, C> {
    /// Wrap `http` using `clock` for time and sleeping
    #[must_use]
    pub fn with_clock(http: H, clock: C) -> Self {
        Self {
            http,
            clock,
            guard: Duration::from_secs(DEFAULT_GUARD_SECONDS),
        }
    }

    /// Set the guard interval added to every rate-limit sleep
    #[must_use]
    pub fn with_guard(mut self, guard: Duration) -> Self {
        self.guard = guard;
        self
    }

    /// The underlying HTTP client
    #[must_use]
    pub fn http(&self) -> &H {
        &self.http
    }

    /// The clock used for rate-limit waits
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// GET `url`, sleeping and retrying for as long as the quota is exhausted
    ///
    /// # Errors
    ///
    /// Returns `GithubError::Status` for any non-success status other than
    /// quota exhaustion, or the client's error if no response was obtained.
    pub fn get(
        &self,
        url: &str,
        headers: &[Pair],
        params: &[Pair],
    ) -> Result<HttpResponse, GithubError> {
        loop {
            let response = self.http.get(url, headers, params)?;

            if let Some(wait) = self.rate_limit_wait(&response) {
                warn!(
                    url = %url,
                    sleep_secs = wait.as_secs(),
                    "Rate limit reached, sleeping until reset"
                );
                self.clock.sleep(wait);
                continue;
            }

            if !response.is_success() {
                return Err(GithubError::Status {
                    status: response.status,
                    url: url.to_string(),
                    body: response.body,
                });
            }

            debug!(url = %url, status = response.status, "GET ok");
            return Ok(response);
        }
    }

    /// How long to wait if `response` signals an exhausted quota
    fn rate_limit_wait(&self, response: &HttpResponse) -> Option<Duration> {
        if !matches!(response.status, 403 | 429) {
            return None;
        }
        let remaining: u64 = response.header(REMAINING_HEADER)?.trim().parse().ok()?;
        if remaining != 0 {
            return None;
        }

        let now = self.clock.now();
        let reset = response
            .header(RESET_HEADER)
            .and_then(|value| value.trim().parse::<i64>().ok())
            .unwrap_or_else(|| now.timestamp() + FALLBACK_RESET_SECONDS);

        let until_reset_ms = reset
            .saturating_mul(1000)
            .saturating_sub(now.timestamp_millis())
            .max(0);
        let until_reset = Duration::from_millis(u64::try_from(until_reset_ms).unwrap_or(0));

        Some(until_reset + self.guard)
    }
}
