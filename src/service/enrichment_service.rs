use tokio::sync::broadcast;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::annotate::AnnotationClient;
use crate::errors::AppError;
use crate::models::{Message, MessagePatch, MessageView, TargetLanguage, Translation, WsEvent};
use crate::store::MessageStore;

const MAX_MESSAGE_LENGTH: usize = 8000;
const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Coordinates message enrichment: fans out annotation requests keyed by
/// message identity and applies each completion to the store independently.
///
/// Annotation failures are contained here. They are logged and the field
/// stays pending/absent; nothing propagates to the presentation boundary,
/// and one message's failure or latency never delays another.
#[derive(Clone)]
pub struct EnrichmentService {
    store: MessageStore,
    client: AnnotationClient,
    events: broadcast::Sender<WsEvent>,
}

impl EnrichmentService {
    pub fn new(store: MessageStore, client: AnnotationClient) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { store, client, events }
    }

    /// Hands out a receiver for re-render events (one per WS connection).
    pub fn subscribe_events(&self) -> broadcast::Receiver<WsEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> Vec<Message> {
        self.store.snapshot().await
    }

    pub async fn get_message(&self, id: Uuid) -> Result<Message, AppError> {
        self.store.get(id).await.ok_or(AppError::MessageNotFound { id })
    }

    /// The send intent: validates and stores the text, then unconditionally
    /// kicks off language detection keyed by the new identity. Returns the
    /// created message synchronously; detection resolves in the background.
    pub async fn send_message(&self, text: String) -> Result<Message, AppError> {
        // ── Validation ────────────────────────────────────────────────────────
        if text.trim().is_empty() {
            return Err(AppError::EmptyField { field_name: "text".to_string() });
        }
        if text.len() > MAX_MESSAGE_LENGTH {
            return Err(AppError::FieldTooLong {
                field_name: "text".to_string(),
                max_length: MAX_MESSAGE_LENGTH,
                actual_length: text.len(),
            });
        }

        let message = self.store.create(text).await;
        self.broadcast(WsEvent::MessageCreated { message: MessageView::from(&message) });

        let svc = self.clone();
        let (id, text) = (message.id, message.text.clone());
        tokio::spawn(async move {
            match svc.client.detect_language(&text).await {
                Ok(language) => svc.apply(id, MessagePatch::detected_language(language)).await,
                Err(e) => warn!("Language detection failed for message {id}: {e}"),
            }
        });

        Ok(message)
    }

    /// The requestSummary intent. Rejected unless the affordance holds for
    /// the message right now (detected English, more than 150 characters);
    /// summarization is never auto-triggered.
    pub async fn request_summary(&self, id: Uuid) -> Result<(), AppError> {
        let message = self.get_message(id).await?;
        if !message.can_summarize() {
            return Err(AppError::SummaryNotOffered { id });
        }

        let svc = self.clone();
        tokio::spawn(async move {
            match svc.client.summarize(&message.text).await {
                Ok(summary) => svc.apply(id, MessagePatch::summary(summary)).await,
                Err(e) => warn!("Summarization failed for message {id}: {e}"),
            }
        });

        Ok(())
    }

    /// The requestTranslation intent: records the selected target (which
    /// invalidates a translation produced for a different one), then kicks
    /// off the translation keyed by `(id, target)`. A result arriving after
    /// the user has moved on to another target is discarded at apply time.
    pub async fn request_translation(
        &self,
        id: Uuid,
        target: TargetLanguage,
    ) -> Result<(), AppError> {
        let message = self.get_message(id).await?;
        self.apply(id, MessagePatch::translation_target(target)).await;

        let svc = self.clone();
        tokio::spawn(async move {
            match svc.client.translate(&message.text, target).await {
                Ok(text) => {
                    let translation = Translation { target, text };
                    svc.apply(id, MessagePatch::translation(translation)).await;
                }
                Err(e) => warn!("Translation to {target} failed for message {id}: {e}"),
            }
        });

        Ok(())
    }

    /// Applies a completion by identity and broadcasts the post-apply view.
    async fn apply(&self, id: Uuid, patch: MessagePatch) {
        if !self.store.update(id, patch).await {
            debug!("Dropping annotation result for unknown message {id}");
            return;
        }
        if let Some(message) = self.store.get(id).await {
            self.broadcast(WsEvent::MessageUpdated { message: MessageView::from(&message) });
        }
    }

    fn broadcast(&self, event: WsEvent) {
        // Send only fails when no client is subscribed.
        let _ = self.events.send(event);
    }
}
