use crate::adapters::http::HttpFetcher;
use crate::adapters::pdf;
use crate::domain::ports::{ConfigProvider, DocumentSource};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The published directory: download page → PDF → decrypted text.
pub struct PdfDirectorySource<C: ConfigProvider> {
    config: C,
    fetcher: HttpFetcher,
}

impl<C: ConfigProvider> PdfDirectorySource<C> {
    pub fn new(config: C) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.timeout_seconds())?;
        Ok(Self { config, fetcher })
    }

    async fn pdf_url(&self) -> Result<String> {
        match self.config.pdf_url() {
            Some(url) => Ok(url.to_string()),
            None => Ok(self.fetcher.discover_pdf(self.config.download_page()).await?.url),
        }
    }
}

#[async_trait]
impl<C: ConfigProvider> DocumentSource for PdfDirectorySource<C> {
    async fn fetch_text(&self) -> Result<String> {
        let url = self.pdf_url().await?;
        tracing::info!("Downloading directory PDF from {}", url);
        let bytes = self.fetcher.get_bytes(&url).await?;
        tracing::debug!("Downloaded {} bytes", bytes.len());
        pdf::decrypt_text(&bytes, self.config.password())
    }
}
