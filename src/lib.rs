//! Conversational text-enrichment service.
//!
//! A user submits text messages; each one is asynchronously annotated with a
//! detected language, an optional summary, and an optional translation
//! fetched from external services. Late-arriving results are merged back
//! into the right message by stable identity, so concurrent completions
//! never corrupt unrelated messages or clobber each other's fields.
//!
//! The library exposes the store, the annotation client, the coordinator,
//! and the axum router; the binary wires them up with configuration and
//! logging.

pub mod annotate;
pub mod config;
pub mod errors;
pub mod models;
pub mod routes;
pub mod service;
pub mod store;

pub use annotate::{AnnotationClient, LanguageDetector, LanguageGuess};
pub use errors::AppError;
pub use routes::create_router;
pub use service::EnrichmentService;
pub use store::MessageStore;
