use thiserror::Error;
use uuid::Uuid;

/// Top-level application error.
/// All variants carry a human-readable message for display/logging.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Annotation errors ────────────────────────────────────────────────────
    #[error("Language detector capability is not available")]
    DetectionUnavailable,

    #[error("Language detection failed: {message}")]
    DetectionFailed { message: String },

    #[error("Summarization failed: {0}")]
    SummarizationFailed(#[source] reqwest::Error),

    #[error("Translation failed: {0}")]
    TranslationFailed(#[source] reqwest::Error),

    // ── Validation errors ────────────────────────────────────────────────────
    #[error("Field '{field_name}' cannot be empty")]
    EmptyField { field_name: String },

    #[error("Field '{field_name}' exceeds max length of {max_length} (actual: {actual_length})")]
    FieldTooLong { field_name: String, max_length: usize, actual_length: usize },

    // ── Message errors ───────────────────────────────────────────────────────
    #[error("Message '{id}' not found")]
    MessageNotFound { id: Uuid },

    #[error("Summary is not offered for message '{id}'")]
    SummaryNotOffered { id: Uuid },

    // ── System errors ────────────────────────────────────────────────────────
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::EmptyField { .. }
                | AppError::FieldTooLong { .. }
                | AppError::SummaryNotOffered { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::MessageNotFound { .. })
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, AppError::DetectionUnavailable)
    }
}
