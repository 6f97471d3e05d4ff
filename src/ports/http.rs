use std::path::Path;

use async_trait::async_trait;

use crate::domain::DomainError;

/// An HTTP response reduced to what the adapters need.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client port for all network requests.
/// All network traffic must go through this interface.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// POST a binary body (e.g. WAV audio) and return the response.
    ///
    /// Transport-level failures (connect, timeout) are errors; HTTP error
    /// statuses are returned in the response for the caller to interpret.
    async fn post_bytes(
        &self,
        url: &str,
        auth_token: Option<&str>,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<HttpResponse, DomainError>;

    /// GET a URL and return the raw response bytes.
    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, DomainError>;

    /// Download a file to a specified path.
    async fn download_file(
        &self,
        url: &str,
        path: &Path,
        progress_callback: Option<Box<dyn Fn(u64, u64) + Send + Sync>>,
    ) -> Result<(), DomainError>;
}
