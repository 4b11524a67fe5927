pub mod detector;

pub use detector::{LanguageDetector, LanguageGuess, OllamaLanguageDetector};

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::models::{TargetLanguage, UNKNOWN_LANGUAGE};

// ── Wire DTOs ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct SummarizeBody<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct SummarizeResponse {
    summary: String,
}

#[derive(Serialize)]
struct TranslateBody<'a> {
    text: &'a str,
    #[serde(rename = "targetLang")]
    target_lang: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translation: String,
}

// ── Client ────────────────────────────────────────────────────────────────────

/// Client for the three external annotation services.
///
/// Each operation makes exactly one outbound call and never retries; results
/// go back to the caller, never into the store. The language detector is an
/// optional capability; the two HTTP services share one pooled client.
#[derive(Clone)]
pub struct AnnotationClient {
    http_client: reqwest::Client,
    summarizer_url: String,
    translator_url: String,
    detector: Option<Arc<dyn LanguageDetector>>,
}

impl AnnotationClient {
    pub fn new(
        summarizer_url: String,
        translator_url: String,
        detector: Option<Arc<dyn LanguageDetector>>,
    ) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Unexpected(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http_client, summarizer_url, translator_url, detector })
    }

    /// Detects the language of `text` via the detector capability.
    ///
    /// Returns the single most-likely code, or the `"Unknown"` sentinel when
    /// the detector yields no candidates. Fails with `DetectionUnavailable`
    /// when the capability is absent.
    pub async fn detect_language(&self, text: &str) -> Result<String, AppError> {
        let detector = self.detector.as_ref().ok_or(AppError::DetectionUnavailable)?;
        let guesses = detector.detect(text).await?;
        let language = guesses
            .into_iter()
            .next()
            .map(|g| g.language)
            .unwrap_or_else(|| UNKNOWN_LANGUAGE.to_string());
        debug!("Detected language {language:?}");
        Ok(language)
    }

    /// Sends `text` to the summarization service and returns its summary.
    pub async fn summarize(&self, text: &str) -> Result<String, AppError> {
        let response = self
            .http_client
            .post(&self.summarizer_url)
            .json(&SummarizeBody { text })
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(AppError::SummarizationFailed)?;

        let body: SummarizeResponse =
            response.json().await.map_err(AppError::SummarizationFailed)?;
        debug!("Summarized {} bytes into {}", text.len(), body.summary.len());
        Ok(body.summary)
    }

    /// Sends `text` and a target-language tag to the translation service.
    pub async fn translate(
        &self,
        text: &str,
        target: TargetLanguage,
    ) -> Result<String, AppError> {
        let response = self
            .http_client
            .post(&self.translator_url)
            .json(&TranslateBody { text, target_lang: target.as_str() })
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(AppError::TranslationFailed)?;

        let body: TranslateResponse =
            response.json().await.map_err(AppError::TranslationFailed)?;
        debug!("Translated {} bytes to {target}", text.len());
        Ok(body.translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    #[test]
    fn summarize_wire_shapes() {
        let body = serde_json::to_value(SummarizeBody { text: "long text" }).unwrap();
        assert_eq!(body, json!({ "text": "long text" }));

        let response: SummarizeResponse =
            serde_json::from_value(json!({ "summary": "short" })).unwrap();
        assert_eq!(response.summary, "short");
    }

    #[test]
    fn translate_wire_shapes() {
        let body =
            serde_json::to_value(TranslateBody { text: "Hola", target_lang: "en" }).unwrap();
        assert_eq!(body, json!({ "text": "Hola", "targetLang": "en" }));

        let response: TranslateResponse =
            serde_json::from_value(json!({ "translation": "Hello" })).unwrap();
        assert_eq!(response.translation, "Hello");
    }

    fn client_with(detector: Option<Arc<dyn LanguageDetector>>) -> AnnotationClient {
        AnnotationClient::new(
            "http://localhost:9/summarize".to_string(),
            "http://localhost:9/translate".to_string(),
            detector,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn detection_without_capability_is_unavailable() {
        let client = client_with(None);
        assert!(matches!(
            client.detect_language("hi").await,
            Err(AppError::DetectionUnavailable)
        ));
    }

    struct EmptyDetector;

    #[async_trait]
    impl LanguageDetector for EmptyDetector {
        async fn detect(&self, _text: &str) -> Result<Vec<LanguageGuess>, AppError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn no_candidates_resolve_to_unknown_sentinel() {
        let client = client_with(Some(Arc::new(EmptyDetector)));
        assert_eq!(client.detect_language("???").await.unwrap(), UNKNOWN_LANGUAGE);
    }

    struct RankedDetector;

    #[async_trait]
    impl LanguageDetector for RankedDetector {
        async fn detect(&self, _text: &str) -> Result<Vec<LanguageGuess>, AppError> {
            Ok(vec![
                LanguageGuess { language: "es".to_string(), confidence: 0.9 },
                LanguageGuess { language: "pt".to_string(), confidence: 0.1 },
            ])
        }
    }

    #[tokio::test]
    async fn detection_picks_the_best_candidate() {
        let client = client_with(Some(Arc::new(RankedDetector)));
        assert_eq!(client.detect_language("Hola").await.unwrap(), "es");
    }
}
