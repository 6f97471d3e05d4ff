use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, ModelSize};
use crate::ports::HttpClient;

/// Smallest plausible ggml model file; anything below this is a failed or
/// truncated download.
const MIN_MODEL_BYTES: u64 = 10_000_000;

/// Downloads whisper.cpp ggml models into a local models directory.
pub struct ModelFetcher {
    http: Arc<dyn HttpClient>,
    models_dir: PathBuf,
}

impl ModelFetcher {
    pub fn new(http: Arc<dyn HttpClient>, models_dir: PathBuf) -> Self {
        Self { http, models_dir }
    }

    /// Fetch the model for `size` unless it is already present.
    ///
    /// Returns the path of the model file.
    pub async fn fetch(&self, size: ModelSize) -> Result<PathBuf, DomainError> {
        let path = size.path_in(&self.models_dir);
        if path.exists() {
            info!(path = %path.display(), "Model already present");
            return Ok(path);
        }

        let url = size.download_url();
        info!(model = %size, url = %url, "Downloading model");

        self.http
            .download_file(
                &url,
                &path,
                Some(Box::new(|downloaded, total| {
                    if total > 0 && downloaded % (50 * 1024 * 1024) < 8192 {
                        tracing::debug!(
                            percent = (downloaded as f64 / total as f64 * 100.0) as u32,
                            "Download progress"
                        );
                    }
                })),
            )
            .await?;

        let metadata = std::fs::metadata(&path).map_err(|e| DomainError::FileAccess {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        if metadata.len() < MIN_MODEL_BYTES {
            std::fs::remove_file(&path)?;
            return Err(DomainError::Model(format!(
                "Downloaded file is implausibly small ({} bytes); removed",
                metadata.len()
            )));
        }

        info!(path = %path.display(), bytes = metadata.len(), "Model downloaded");
        Ok(path)
    }
}
