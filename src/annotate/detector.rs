use async_trait::async_trait;
use rig::client::Nothing;
use rig::completion::Chat;
use rig::message::Message as RigMessage;
use rig::prelude::CompletionClient;
use rig::providers::ollama;
use tracing::error;

use crate::errors::AppError;

const PREAMBLE: &str = "You identify the language a text is written in. \
                        Reply with only the ISO 639-1 code of the most likely \
                        language (for example: en, es, pt). \
                        Reply with exactly 'unknown' if you cannot tell.";

/// One detection candidate. Detectors return these best-first.
#[derive(Debug, Clone)]
pub struct LanguageGuess {
    pub language: String,
    pub confidence: f64,
}

/// The language-detection capability.
///
/// Presence is optional: the application runs without a detector, in which
/// case detection fails fast with [`AppError::DetectionUnavailable`] and
/// messages simply keep their pending language.
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    /// Returns detection candidates ordered best-first; an empty list means
    /// the detector could not tell.
    async fn detect(&self, text: &str) -> Result<Vec<LanguageGuess>, AppError>;
}

/// Detector backed by a locally running Ollama model, driven through rig.
/// A fresh agent is built per request; detection needs no history.
#[derive(Clone)]
pub struct OllamaLanguageDetector {
    client: ollama::Client,
    model: String,
}

impl OllamaLanguageDetector {
    pub fn new(base_url: &str, model: &str) -> Result<Self, AppError> {
        let client = ollama::Client::builder()
            .api_key(Nothing)
            .base_url(base_url)
            .build()
            .map_err(|e| AppError::Unexpected(format!("Failed to build Ollama client: {e}")))?;
        Ok(Self { client, model: model.to_string() })
    }
}

#[async_trait]
impl LanguageDetector for OllamaLanguageDetector {
    async fn detect(&self, text: &str) -> Result<Vec<LanguageGuess>, AppError> {
        let agent = self
            .client
            .agent(&self.model)
            .preamble(PREAMBLE)
            .build();

        let reply = agent
            .chat(text, Vec::<RigMessage>::new())
            .await
            .map_err(|e| {
                error!("Language detection inference failed: {e}");
                let msg = e.to_string();
                if msg.contains("Connection refused") || msg.contains("connect") {
                    // The capability is the locally running model; if it is
                    // not reachable it is not present.
                    AppError::DetectionUnavailable
                } else {
                    AppError::DetectionFailed { message: msg }
                }
            })?;

        Ok(parse_language_code(&reply)
            .map(|language| vec![LanguageGuess { language, confidence: 1.0 }])
            .unwrap_or_default())
    }
}

/// Pulls a language code out of the model's reply.
///
/// Accepts a bare primary subtag (`en`, `spa`) with an optional two-letter
/// region (`pt-br`); an explicit `unknown` or any other noise yields no
/// candidate.
fn parse_language_code(reply: &str) -> Option<String> {
    let token = reply
        .split_whitespace()
        .next()?
        .trim_matches(|c: char| !c.is_ascii_alphanumeric() && c != '-');
    let token = token.to_ascii_lowercase();

    if token == "unknown" {
        return None;
    }

    let (primary, region) = match token.split_once('-') {
        Some((p, r)) => (p, Some(r)),
        None => (token.as_str(), None),
    };
    if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    if let Some(region) = region {
        if region.len() != 2 || !region.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
    }

    Some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_codes_are_accepted() {
        assert_eq!(parse_language_code("en").as_deref(), Some("en"));
        assert_eq!(parse_language_code("spa").as_deref(), Some("spa"));
        assert_eq!(parse_language_code("pt-BR").as_deref(), Some("pt-br"));
    }

    #[test]
    fn replies_are_trimmed_and_lowercased() {
        assert_eq!(parse_language_code("  EN.\n").as_deref(), Some("en"));
        assert_eq!(parse_language_code("\"es\"").as_deref(), Some("es"));
        assert_eq!(parse_language_code("fr (French)").as_deref(), Some("fr"));
    }

    #[test]
    fn unknown_and_noise_yield_no_candidate() {
        assert_eq!(parse_language_code("unknown"), None);
        assert_eq!(parse_language_code("Unknown."), None);
        assert_eq!(parse_language_code(""), None);
        assert_eq!(parse_language_code("I think this is English"), None);
        assert_eq!(parse_language_code("e"), None);
        assert_eq!(parse_language_code("en-GREAT"), None);
        assert_eq!(parse_language_code("1234"), None);
    }
}
