use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Returns `false` when there was nothing to remove.
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn download_page(&self) -> &str;
    fn pdf_url(&self) -> Option<&str>;
    fn password(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}

/// Produces the plain text of the current directory document.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    async fn fetch_text(&self) -> Result<String>;
}
