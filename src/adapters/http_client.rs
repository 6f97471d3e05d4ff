use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::domain::DomainError;
use crate::ports::{HttpClient, HttpResponse};

/// `HttpClient` implementation backed by a single reqwest client.
pub struct ReqwestClient {
    client: Client,
    timeout: Duration,
}

impl ReqwestClient {
    pub fn new(timeout_secs: u64) -> Result<Self, DomainError> {
        let client = Client::builder()
            .use_rustls_tls()
            .user_agent(format!("speechbench/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DomainError::Http(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn post_bytes(
        &self,
        url: &str,
        auth_token: Option<&str>,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<HttpResponse, DomainError> {
        let mut request = self
            .client
            .post(url)
            .header("Content-Type", content_type)
            .timeout(self.timeout)
            .body(body);

        if let Some(token) = auth_token {
            request = request.header("Authorization", format!("Token {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::Http(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Http(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, DomainError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| DomainError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Http(format!("HTTP {} for {}", status, url)));
        }

        response
            .bytes()
            .await
            .map(|b| b.to_vec())
            .map_err(|e| DomainError::Http(e.to_string()))
    }

    async fn download_file(
        &self,
        url: &str,
        path: &Path,
        progress_callback: Option<Box<dyn Fn(u64, u64) + Send + Sync>>,
    ) -> Result<(), DomainError> {
        use futures_util::StreamExt;
        use tokio::io::AsyncWriteExt;

        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(3600)) // large model files
            .send()
            .await
            .map_err(|e| DomainError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::Http(format!("HTTP {} for {}", status, url)));
        }

        let total_size = response.content_length().unwrap_or(0);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Write to temp file first, then rename atomically
        let temp_path = path.with_extension("download");

        let cleanup_temp = || {
            let temp = temp_path.clone();
            async move {
                let _ = tokio::fs::remove_file(&temp).await;
            }
        };

        let mut file = match tokio::fs::File::create(&temp_path).await {
            Ok(f) => f,
            Err(e) => {
                cleanup_temp().await;
                return Err(DomainError::Io(e.to_string()));
            }
        };

        let mut downloaded: u64 = 0;
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    drop(file);
                    cleanup_temp().await;
                    return Err(DomainError::Http(e.to_string()));
                }
            };

            if let Err(e) = file.write_all(&chunk).await {
                drop(file);
                cleanup_temp().await;
                return Err(DomainError::Io(e.to_string()));
            }

            downloaded += chunk.len() as u64;

            if let Some(callback) = &progress_callback {
                callback(downloaded, total_size);
            }
        }

        if let Err(e) = file.flush().await {
            drop(file);
            cleanup_temp().await;
            return Err(DomainError::Io(e.to_string()));
        }
        drop(file);

        if let Err(e) = tokio::fs::rename(&temp_path, path).await {
            cleanup_temp().await;
            return Err(DomainError::Io(e.to_string()));
        }

        info!(path = %path.display(), size = downloaded, "File downloaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        assert!(ReqwestClient::new(30).is_ok());
    }

    #[test]
    fn test_response_success_range() {
        let ok = HttpResponse {
            status: 200,
            body: String::new(),
        };
        let server_err = HttpResponse {
            status: 503,
            body: String::new(),
        };
        assert!(ok.is_success());
        assert!(!server_err.is_success());
    }
}
