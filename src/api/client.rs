use reqwest::Client;
use url::Url;

use super::{FetchError, PageQuery};
use crate::state::data::LaunchRecord;

/// Thin HTTP client for the SpaceX API.
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct SpaceXClient {
    http: Client,
    base_url: String,
}

impl SpaceXClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(concat!("launch-deck/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Full URL of one page of `path`
    pub fn page_url(&self, path: &str, query: &PageQuery, page: u32) -> Result<Url, FetchError> {
        let mut url = Url::parse(&format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        ))?;
        url.query_pairs_mut().extend_pairs(query.pairs(page));
        Ok(url)
    }

    /// Fetch one page of launches
    pub async fn fetch_page(
        &self,
        path: &str,
        query: &PageQuery,
        page: u32,
    ) -> Result<Vec<LaunchRecord>, FetchError> {
        let url = self.page_url(path, query, page)?;
        tracing::debug!(%url, page, "fetching launches");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let records = response.json::<Vec<LaunchRecord>>().await?;
        Ok(records)
    }

    /// Download raw image bytes
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let url = Url::parse(url)?;
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
