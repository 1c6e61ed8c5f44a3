use crate::utils::error::{DirectoryError, Result};
use regex::Regex;
use reqwest::Client;
use std::sync::LazyLock;
use std::time::Duration;
use url::Url;

static PDF_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)href\s*=\s*"([^"]*extentions_(\d+\.\d+)\.pdf)""#).expect("pdf link regex")
});

/// A directory PDF link found on the download page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfLink {
    pub url: String,
    pub version: String,
}

/// Thin wrapper over `reqwest` for the two downloads the tool makes.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self { client })
    }

    pub async fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("Making request to: {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(DirectoryError::fetch(url, format!("HTTP status {}", status)));
        }

        Ok(response.bytes().await?.to_vec())
    }

    pub async fn get_text(&self, url: &str) -> Result<String> {
        let bytes = self.get_bytes(url).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Look up the current directory PDF on the download page.
    pub async fn discover_pdf(&self, download_page: &str) -> Result<PdfLink> {
        let page = self.get_text(download_page).await?;
        let link = find_pdf_link(&page, download_page)?.ok_or_else(|| {
            DirectoryError::fetch(download_page, "No extensions download link found")
        })?;
        tracing::info!("Found extensions PDF version {}: {}", link.version, link.url);
        Ok(link)
    }
}

/// First `extentions_<version>.pdf` link in `html`, resolved against `page_url`.
pub fn find_pdf_link(html: &str, page_url: &str) -> Result<Option<PdfLink>> {
    let Some(caps) = PDF_LINK.captures(html) else {
        return Ok(None);
    };

    let base = Url::parse(page_url).map_err(|e| DirectoryError::fetch(page_url, e.to_string()))?;
    let url = base
        .join(&caps[1])
        .map_err(|e| DirectoryError::fetch(page_url, e.to_string()))?;

    Ok(Some(PdfLink {
        url: url.to_string(),
        version: caps[2].to_string(),
    }))
}
