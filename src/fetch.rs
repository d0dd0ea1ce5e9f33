//! Downloading the sonnets from PoetryDB.

use crate::corpus::Document;
use crate::error::{Result, VersegrepError};
use log::{debug, info};
use reqwest::StatusCode;
use reqwest::blocking::Client;
use std::time::Duration;

pub const POETRYDB_URL: &str = "https://poetrydb.org/author,title/Shakespeare;Sonnet";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Blocking client for one PoetryDB endpoint.
pub struct Fetcher {
    client: Client,
    url: String,
}

impl Fetcher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        let client = Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .connect_timeout(CONNECT_TIMEOUT.min(timeout))
            .user_agent(concat!("versegrep/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| VersegrepError::fetch(&url, e))?;

        Ok(Self { client, url })
    }

    pub fn poetrydb() -> Result<Self> {
        Self::new(POETRYDB_URL, DEFAULT_TIMEOUT)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GETs the endpoint and decodes its JSON array of poems.
    ///
    /// Anything but `200 OK` is an error, as is a body that is not a
    /// non-empty array of poems. PoetryDB answers unknown searches with a
    /// `200` and a `{"status": 404, ...}` object, which fails decoding.
    pub fn fetch(&self) -> Result<Vec<Document>> {
        debug!("GET {}", self.url);
        let response = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| VersegrepError::fetch(&self.url, format!("network error: {e}")))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(VersegrepError::fetch(
                &self.url,
                format!("request failed with HTTP status {status}"),
            ));
        }

        let documents: Vec<Document> = response
            .json()
            .map_err(|e| VersegrepError::fetch(&self.url, format!("failed to decode JSON: {e}")))?;
        if documents.is_empty() {
            return Err(VersegrepError::fetch(&self.url, "response holds no poems"));
        }

        info!("Fetched {} documents from {}", documents.len(), self.url);
        Ok(documents)
    }
}
