use std::env;

const DEFAULT_SUMMARIZER_URL: &str = "https://chrome-ai-api.com/summarize";
const DEFAULT_TRANSLATOR_URL: &str = "https://chrome-ai-api.com/translate";
const DEFAULT_DETECTOR_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_DETECTOR_MODEL: &str = "llama3.2";

/// Runtime configuration, collected from the environment (a `.env` file is
/// loaded in `main` via dotenvy as a development convenience).
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub summarizer_url: String,
    pub translator_url: String,
    /// Base URL of the local model backing language detection; `None` when
    /// the capability is absent.
    pub detector_base_url: Option<String>,
    pub detector_model: String,
}

impl Config {
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let summarizer_url = env::var("SUMMARIZER_URL")
            .unwrap_or_else(|_| DEFAULT_SUMMARIZER_URL.to_string());
        let translator_url = env::var("TRANSLATOR_URL")
            .unwrap_or_else(|_| DEFAULT_TRANSLATOR_URL.to_string());

        // Setting DETECTOR_BASE_URL to the empty string turns the detector
        // capability off entirely.
        let detector_base_url = Some(
            env::var("DETECTOR_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_DETECTOR_BASE_URL.to_string()),
        )
        .filter(|url| !url.is_empty());

        let detector_model = env::var("DETECTOR_MODEL")
            .unwrap_or_else(|_| DEFAULT_DETECTOR_MODEL.to_string());

        Self {
            port,
            summarizer_url,
            translator_url,
            detector_base_url,
            detector_model,
        }
    }
}
