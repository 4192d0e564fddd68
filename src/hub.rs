use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;

use crate::{
    config::Config,
    error::{BrowseError, Result},
    source::DatasetSource,
    types::RawFile,
};

const DEFAULT_HOST: &str = "https://huggingface.co";

/// Hugging Face Hub backed dataset source
///
/// Fetches content from one dataset using:
/// - the tree API for directory listings
/// - the resolve endpoint for raw file downloads
///
/// Both endpoints are gated by a static bearer token.
#[derive(Clone)]
pub struct HubDataset {
    client: Client,
    host: String,
    dataset: String,
    token: String,
}

impl HubDataset {
    /// Create a new source for the configured dataset
    pub fn new(config: &Config) -> Self {
        Self::with_host(DEFAULT_HOST, config)
    }

    /// Create a source pointed at a non-default host (used by tests)
    pub fn with_host(host: impl Into<String>, config: &Config) -> Self {
        let client = Client::builder()
            .user_agent("dataset-browser/0.1")
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            host: host.into(),
            dataset: config.dataset.clone(),
            token: config.token.clone(),
        }
    }

    /// Build the tree-listing URL for a directory path
    fn tree_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            format!("{}/api/datasets/{}/tree/main", self.host, self.dataset)
        } else {
            format!(
                "{}/api/datasets/{}/tree/main/{}",
                self.host, self.dataset, path
            )
        }
    }

    /// Build the raw-file resolve URL
    fn resolve_url(&self, path: &str) -> String {
        format!(
            "{}/datasets/{}/resolve/main/{}",
            self.host,
            self.dataset,
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl DatasetSource for HubDataset {
    async fn fetch_tree(&self, path: &str) -> Result<Bytes> {
        let url = self.tree_url(path);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrowseError::Upstream { status });
        }

        // Relayed verbatim; the listing shape is the upstream's contract
        Ok(response.bytes().await?)
    }

    async fn fetch_file(&self, path: &str) -> Result<RawFile> {
        let url = self.resolve_url(path);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(BrowseError::Upstream { status });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        // Full body buffered in memory; acceptable for the target dataset sizes
        let content = response.bytes().await?;

        Ok(RawFile {
            content,
            content_type,
        })
    }

    fn identifier(&self) -> String {
        format!("hub://{}/{}", self.host, self.dataset)
    }
}
