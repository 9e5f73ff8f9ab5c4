use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gossip_common::{GossipError, Result};
use gossip_config::RemoteConfig;
use gossip_http::{HttpClient, HttpError, RawPage, RequestOpts};
use gossip_store::RawStore;
use std::path::PathBuf;
use tracing::{info, warn};

/// Source of the live gossip page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(&self) -> std::result::Result<RawPage, HttpError>;
}

/// The configured remote page, fetched over HTTP.
pub struct RemoteGossipPage {
    client: HttpClient,
    url: String,
}

impl RemoteGossipPage {
    pub fn new(client: HttpClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn from_config(remote: &RemoteConfig) -> std::result::Result<Self, HttpError> {
        let client = HttpClient::new()?
            .with_timeout(remote.timeout())
            .with_retries(remote.retries);
        Ok(Self::new(client, remote.url.clone()))
    }
}

#[async_trait]
impl PageFetcher for RemoteGossipPage {
    async fn fetch_page(&self) -> std::result::Result<RawPage, HttpError> {
        info!(url = %self.url, "gossip.fetch.request");
        self.client.get_page(&self.url, RequestOpts::default()).await
    }
}

/// Fetch the page and insist on a successful status.
pub async fn fetch_ok_page(fetcher: &dyn PageFetcher) -> Result<RawPage> {
    let page = fetcher
        .fetch_page()
        .await
        .map_err(|e| GossipError::UpstreamFetch(e.to_string()))?;

    info!(status = %page.status, length = page.len(), "gossip.fetch.response");

    if !page.is_ok() {
        warn!(
            url = %page.url,
            status = %page.status,
            length = page.len(),
            "gossip.fetch.rejected"
        );
        return Err(GossipError::UpstreamFetch(format!(
            "{} answered {}",
            page.url, page.status
        )));
    }
    Ok(page)
}

/// One scheduled run: fetch the live page and store it under `now`'s bucket.
///
/// Nothing is written unless the fetch succeeded.
pub async fn fetch_and_save(
    fetcher: &dyn PageFetcher,
    store: &RawStore,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let page = fetch_ok_page(fetcher).await?;
    store.save_raw(&page.body, now).await
}
