//! Fetching provider-hosted images.

use crate::http::{api_error, body_bytes, check_status, content_type, transport_error};
use async_trait::async_trait;
use factreel_error::FactreelResult;
use factreel_interface::{DownloadedImage, ImageDownloader};
use reqwest::Client;
use tracing::{debug, instrument};

const PROVIDER: &str = "download";

/// Downloads images with a plain HTTP GET.
#[derive(Debug, Clone, Default)]
pub struct HttpImageDownloader {
    client: Client,
}

impl HttpImageDownloader {
    /// Create a downloader with a fresh HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a downloader sharing an existing HTTP client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageDownloader for HttpImageDownloader {
    #[instrument(skip(self, url))]
    async fn download(&self, url: &str) -> FactreelResult<DownloadedImage> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(PROVIDER, e))?;
        let response = check_status(PROVIDER, response, api_error).await?;

        let mime = content_type(&response);
        let data = body_bytes(PROVIDER, response, "image download").await?;

        debug!(size = data.len(), mime = ?mime, "Downloaded image");
        Ok(DownloadedImage::new(mime, data))
    }
}
