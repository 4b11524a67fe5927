use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::models::{Message, MessagePatch};

/// Ordered, append-only collection of messages with identity-keyed point
/// updates.
///
/// All mutation funnels through [`MessageStore::create`] and
/// [`MessageStore::update`] behind a single write lock, so annotation
/// completions arriving out of order serialize cleanly and readers always see
/// a consistent point-in-time view. Updates are keyed by `Message::id`, never
/// by position in the ordered collection.
#[derive(Clone, Default)]
pub struct MessageStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    /// Messages in creation (display) order.
    messages: Vec<Message>,
    /// Identity → position in `messages`. Positions stay valid because the
    /// store never removes entries.
    index: HashMap<Uuid, usize>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh identity for `text`, appends the message, and
    /// returns it synchronously (annotation fields start pending/absent).
    pub async fn create(&self, text: String) -> Message {
        let message = Message::new(text);
        let mut inner = self.inner.write().await;
        let slot = inner.messages.len();
        inner.index.insert(message.id, slot);
        inner.messages.push(message.clone());
        message
    }

    /// Applies a partial field update to the message with matching `id`.
    ///
    /// Returns `false` (leaving the store untouched) when the identity does
    /// not exist. Present patch fields overwrite only their own field;
    /// translation results are checked against the currently selected target
    /// here, inside the write section, and discarded when stale.
    pub async fn update(&self, id: Uuid, patch: MessagePatch) -> bool {
        let mut inner = self.inner.write().await;
        let Some(&slot) = inner.index.get(&id) else {
            return false;
        };
        let message = &mut inner.messages[slot];

        if let Some(language) = patch.detected_language {
            message.detected_language = Some(language);
        }
        if let Some(summary) = patch.summary {
            message.summary = Some(summary);
        }
        if let Some(target) = patch.translation_target {
            // Switching targets invalidates a translation produced for a
            // different one.
            if message.translation.as_ref().is_some_and(|t| t.target != target) {
                message.translation = None;
            }
            message.translation_target = Some(target);
        }
        if let Some(translation) = patch.translation {
            if message.translation_target == Some(translation.target) {
                message.translation = Some(translation);
            } else {
                debug!(
                    "Discarding stale {} translation for message {id}",
                    translation.target
                );
            }
        }

        true
    }

    /// Point read by identity.
    pub async fn get(&self, id: Uuid) -> Option<Message> {
        let inner = self.inner.read().await;
        inner.index.get(&id).map(|&slot| inner.messages[slot].clone())
    }

    /// All messages in creation order — a consistent point-in-time view.
    pub async fn snapshot(&self) -> Vec<Message> {
        self.inner.read().await.messages.clone()
    }
}
