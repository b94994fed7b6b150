// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Link-header pagination
//!
//! A [`PageCursor`] walks a paginated collection one page at a time. The
//! first request carries the caller's query parameters; every later request
//! uses the `rel="next"` URL verbatim, which already encodes them.

use serde_json::Value;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::error::GithubError;
use crate::transport::{HttpClient, Pair, RateLimitedTransport};

/// One page of a collection
pub type Page = Vec<Value>;

/// Extract the `rel="next"` target from a `Link` header value
///
/// ```
/// use orgpulse_github::pagination::parse_next_link;
///
/// let header = r#"<https://api.github.com/x?page=2>; rel="next", <https://api.github.com/x?page=5>; rel="last""#;
/// assert_eq!(parse_next_link(header).as_deref(), Some("https://api.github.com/x?page=2"));
/// ```
#[must_use]
pub fn parse_next_link(header: &str) -> Option<String> {
    header.split(',').find_map(|link| {
        let mut segments = link.split(';');
        let target = segments.next()?.trim();
        let is_next = segments.any(|param| {
            let Some((key, value)) = param.split_once('=') else {
                return false;
            };
            key.trim().eq_ignore_ascii_case("rel")
                && value
                    .trim()
                    .trim_matches('"')
                    .split_whitespace()
                    .any(|rel| rel.eq_ignore_ascii_case("next"))
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    })
}

/// Forward-only iterator over the pages of a collection
///
/// Yields `Err` at most once, after which it is exhausted. A page whose body
/// is valid JSON but not an array ends iteration without an error.
pub struct PageCursor<'a, H, C> {
    transport: &'a RateLimitedTransport<H, C>,
    headers: &'a [Pair],
    next_url: Option<String>,
    params: Vec<Pair>,
}

impl<'a, H: HttpClient, C: Clock> PageCursor<'a, H, C> {
    /// Start a cursor at `url`, sending `params` with the first request only
    #[must_use]
    pub fn new(
        transport: &'a RateLimitedTransport<H, C>,
        headers: &'a [Pair],
        url: impl Into<String>,
        params: Vec<Pair>,
    ) -> Self {
        Self {
            transport,
            headers,
            next_url: Some(url.into()),
            params,
        }
    }

    /// Drain every page into one list of items
    ///
    /// # Errors
    ///
    /// Returns the first error encountered; items from earlier pages are
    /// discarded.
    pub fn collect_items(self) -> Result<Vec<Value>, GithubError> {
        let mut items = Vec::new();
        for page in self {
            items.extend(page?);
        }
        Ok(items)
    }
}

impl<H: HttpClient, C: Clock> Iterator for PageCursor<'_, H, C> {
    type Item = Result<Page, GithubError>;

    fn next(&mut self) -> Option<Self::Item> {
        let url = self.next_url.take()?;
        let params = std::mem::take(&mut self.params);

        let response = match self.transport.get(&url, self.headers, &params) {
            Ok(response) => response,
            Err(e) => return Some(Err(e)),
        };
        let body = match response.json() {
            Ok(body) => body,
            Err(e) => return Some(Err(e)),
        };

        let Value::Array(items) = body else {
            warn!(
                url = %url,
                "Page body is not a list, treating as end of data"
            );
            return None;
        };

        self.next_url = response.next_link();
        if self.next_url.is_none() {
            debug!(url = %url, items = items.len(), "Reached last page");
        }
        Some(Ok(items))
    }
}
