/// SpaceX REST API access
///
/// This module handles:
/// - Building paginated launch queries
/// - Fetching launch pages and image bytes over HTTP

pub mod client;

pub use client::SpaceXClient;

use thiserror::Error;

/// Default API root, v3 of the public SpaceX data API
pub const DEFAULT_BASE_URL: &str = "https://api.spacexdata.com/v3";

/// A fetch failed. The UI only ever shows a generic indicator for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("invalid request url: {0}")]
    Url(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status(status.as_u16())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for FetchError {
    fn from(err: url::ParseError) -> Self {
        FetchError::Url(err.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Pagination options shared by every page of one listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub limit: u32,
    pub order: SortOrder,
    pub sort: &'static str,
}

impl PageQuery {
    /// Offset of a 1-based page
    pub fn offset(&self, page: u32) -> u32 {
        self.limit * page.saturating_sub(1)
    }

    /// Query string pairs for a given page
    pub fn pairs(&self, page: u32) -> [(&'static str, String); 4] {
        [
            ("limit", self.limit.to_string()),
            ("order", self.order.as_str().to_string()),
            ("sort", self.sort.to_string()),
            ("offset", self.offset(page).to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query() -> PageQuery {
        PageQuery {
            limit: 12,
            order: SortOrder::Desc,
            sort: "launch_date_utc",
        }
    }

    #[test]
    fn test_offset_is_zero_for_first_page() {
        assert_eq!(query().offset(1), 0);
        assert_eq!(query().offset(2), 12);
        assert_eq!(query().offset(5), 48);
    }

    #[test]
    fn test_pairs() {
        let pairs = query().pairs(3);
        assert_eq!(pairs[0], ("limit", "12".to_string()));
        assert_eq!(pairs[1], ("order", "desc".to_string()));
        assert_eq!(pairs[2], ("sort", "launch_date_utc".to_string()));
        assert_eq!(pairs[3], ("offset", "24".to_string()));
    }
}
