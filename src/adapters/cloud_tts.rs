use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use url::Url;

use crate::domain::config::SynthesisConfig;
use crate::domain::DomainError;
use crate::ports::{HttpClient, SpeechSynthesizer};

/// Text-to-speech over a translate-TTS style GET endpoint returning MP3
/// bytes.
pub struct CloudSynthesizer {
    http: Arc<dyn HttpClient>,
    config: SynthesisConfig,
}

impl CloudSynthesizer {
    pub fn new(http: Arc<dyn HttpClient>, config: SynthesisConfig) -> Self {
        Self { http, config }
    }

    fn request_url(&self, text: &str, language: &str) -> Result<String, DomainError> {
        let url = Url::parse_with_params(
            &self.config.endpoint,
            &[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", text),
            ],
        )
        .map_err(|e| DomainError::Synthesis(format!("Invalid TTS endpoint: {}", e)))?;
        Ok(url.into())
    }
}

#[async_trait]
impl SpeechSynthesizer for CloudSynthesizer {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::Synthesis(
                "Nothing to synthesize: text is empty".to_string(),
            ));
        }

        let url = self.request_url(text, language)?;
        debug!(language = language, chars = text.len(), "Requesting synthesis");

        let bytes = self
            .http
            .get_bytes(&url)
            .await
            .map_err(|e| DomainError::Synthesis(e.to_string()))?;

        if bytes.is_empty() {
            return Err(DomainError::Synthesis(
                "Service returned no audio".to_string(),
            ));
        }

        info!(bytes = bytes.len(), "Synthesis complete");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::HttpResponse;
    use std::path::Path;

    struct StubHttp;

    #[async_trait]
    impl HttpClient for StubHttp {
        async fn post_bytes(
            &self,
            _url: &str,
            _auth: Option<&str>,
            _content_type: &str,
            _body: Vec<u8>,
        ) -> Result<HttpResponse, DomainError> {
            unimplemented!()
        }

        async fn get_bytes(&self, _url: &str) -> Result<Vec<u8>, DomainError> {
            Ok(vec![0xFF, 0xFB, 0x90])
        }

        async fn download_file(
            &self,
            _url: &str,
            _path: &Path,
            _progress: Option<Box<dyn Fn(u64, u64) + Send + Sync>>,
        ) -> Result<(), DomainError> {
            unimplemented!()
        }
    }

    fn synthesizer() -> CloudSynthesizer {
        CloudSynthesizer::new(Arc::new(StubHttp), SynthesisConfig::default())
    }

    #[test]
    fn test_request_url_encodes_query() {
        let url = synthesizer().request_url("hello world & more", "en").unwrap();
        assert!(url.starts_with("https://translate.google.com/translate_tts?"));
        assert!(url.contains("tl=en"));
        assert!(!url.contains("hello world"), "text must be percent-encoded");
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected() {
        let result = synthesizer().synthesize("   ", "en").await;
        assert!(matches!(result, Err(DomainError::Synthesis(_))));
    }

    #[tokio::test]
    async fn test_synthesis_returns_bytes() {
        let bytes = synthesizer().synthesize("hi", "en").await.unwrap();
        assert_eq!(bytes.len(), 3);
    }
}
