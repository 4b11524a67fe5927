use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Language code recorded when the detector yields no candidates.
pub const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Detected language a summary is offered for.
const SUMMARY_LANGUAGE: &str = "en";
/// A summary is offered only for texts longer than this many characters.
const SUMMARY_MIN_CHARS: usize = 150;

/// Target languages supported by the translation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    En,
    Pt,
    Es,
    Ru,
    Tr,
    Fr,
}

impl TargetLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLanguage::En => "en",
            TargetLanguage::Pt => "pt",
            TargetLanguage::Es => "es",
            TargetLanguage::Ru => "ru",
            TargetLanguage::Tr => "tr",
            TargetLanguage::Fr => "fr",
        }
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A translation result, tagged by the target language it was produced for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Translation {
    pub target: TargetLanguage,
    pub text: String,
}

/// A single conversation entry and its annotation fields.
///
/// `id` is the stable identity every asynchronous annotation result is keyed
/// by; the position in the store's ordered collection is display order only.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: Uuid,
    pub text: String,
    /// `None` until a detection result arrives (and forever if it never does).
    pub detected_language: Option<String>,
    pub summary: Option<String>,
    pub translation: Option<Translation>,
    /// Most recently selected translation target for this message.
    pub translation_target: Option<TargetLanguage>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            detected_language: None,
            summary: None,
            translation: None,
            translation_target: None,
            created_at: Utc::now(),
        }
    }

    /// Whether the summarize affordance is offered for this message:
    /// detected English and more than 150 characters of text.
    pub fn can_summarize(&self) -> bool {
        self.detected_language.as_deref() == Some(SUMMARY_LANGUAGE)
            && self.text.chars().count() > SUMMARY_MIN_CHARS
    }
}

/// Partial update applied to one message by identity; absent fields are left
/// untouched, so concurrent completions merge instead of overwriting each
/// other.
#[derive(Debug, Clone, Default)]
pub struct MessagePatch {
    pub detected_language: Option<String>,
    pub summary: Option<String>,
    pub translation_target: Option<TargetLanguage>,
    pub translation: Option<Translation>,
}

impl MessagePatch {
    pub fn detected_language(language: String) -> Self {
        Self { detected_language: Some(language), ..Self::default() }
    }

    pub fn summary(summary: String) -> Self {
        Self { summary: Some(summary), ..Self::default() }
    }

    pub fn translation_target(target: TargetLanguage) -> Self {
        Self { translation_target: Some(target), ..Self::default() }
    }

    pub fn translation(translation: Translation) -> Self {
        Self { translation: Some(translation), ..Self::default() }
    }
}

// ── View models ───────────────────────────────────────────────────────────────

/// Flattened view of a message for the presentation boundary.
#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    pub id: Uuid,
    pub text: String,
    /// `null` while detection is pending.
    pub detected_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<Translation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation_target: Option<TargetLanguage>,
    pub can_summarize: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&Message> for MessageView {
    fn from(m: &Message) -> Self {
        Self {
            id: m.id,
            text: m.text.clone(),
            detected_language: m.detected_language.clone(),
            summary: m.summary.clone(),
            translation: m.translation.clone(),
            translation_target: m.translation_target,
            can_summarize: m.can_summarize(),
            created_at: m.created_at,
        }
    }
}

// ── Intent requests ───────────────────────────────────────────────────────────

/// Body of the send-message intent.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

/// Body of the request-translation intent.
#[derive(Debug, Deserialize)]
pub struct TranslationRequest {
    pub target_language: TargetLanguage,
}

// ── WebSocket events ──────────────────────────────────────────────────────────

/// Event pushed to presentation clients so they re-render from the current
/// snapshot (internally tagged).
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum WsEvent {
    #[serde(rename = "message_created")]
    MessageCreated { message: MessageView },
    #[serde(rename = "message_updated")]
    MessageUpdated { message: MessageView },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_language_wire_tags() {
        for (lang, tag) in [
            (TargetLanguage::En, "\"en\""),
            (TargetLanguage::Pt, "\"pt\""),
            (TargetLanguage::Es, "\"es\""),
            (TargetLanguage::Ru, "\"ru\""),
            (TargetLanguage::Tr, "\"tr\""),
            (TargetLanguage::Fr, "\"fr\""),
        ] {
            assert_eq!(serde_json::to_string(&lang).unwrap(), tag);
            assert_eq!(serde_json::from_str::<TargetLanguage>(tag).unwrap(), lang);
        }
    }

    #[test]
    fn unsupported_target_language_is_rejected() {
        assert!(serde_json::from_str::<TargetLanguage>("\"de\"").is_err());
    }

    #[test]
    fn summary_offered_only_for_long_english_text() {
        let mut msg = Message::new("a".repeat(151));
        assert!(!msg.can_summarize(), "detection still pending");

        msg.detected_language = Some("en".to_string());
        assert!(msg.can_summarize());

        msg.detected_language = Some("es".to_string());
        assert!(!msg.can_summarize(), "not English");
    }

    #[test]
    fn summary_threshold_is_exclusive() {
        let mut msg = Message::new("a".repeat(150));
        msg.detected_language = Some("en".to_string());
        assert!(!msg.can_summarize(), "exactly 150 characters is not enough");

        msg.text.push('a');
        assert!(msg.can_summarize());
    }

    #[test]
    fn summary_threshold_counts_characters_not_bytes() {
        // 151 three-byte characters: over the character threshold even though
        // a byte count would have crossed it long before.
        let mut msg = Message::new("€".repeat(151));
        msg.detected_language = Some("en".to_string());
        assert!(msg.can_summarize());
    }

    #[test]
    fn view_reflects_message_fields() {
        let mut msg = Message::new("Hola".to_string());
        msg.detected_language = Some("es".to_string());
        msg.translation_target = Some(TargetLanguage::En);
        msg.translation = Some(Translation {
            target: TargetLanguage::En,
            text: "Hello".to_string(),
        });

        let view = MessageView::from(&msg);
        assert_eq!(view.id, msg.id);
        assert_eq!(view.detected_language.as_deref(), Some("es"));
        assert_eq!(view.translation.as_ref().unwrap().text, "Hello");
        assert!(!view.can_summarize);
    }

    #[test]
    fn pending_fields_are_omitted_from_view_json() {
        let view = MessageView::from(&Message::new("hi".to_string()));
        let json = serde_json::to_value(&view).unwrap();

        assert!(json["detected_language"].is_null());
        assert!(json.get("summary").is_none());
        assert!(json.get("translation").is_none());
        assert_eq!(json["can_summarize"], false);
    }
}
