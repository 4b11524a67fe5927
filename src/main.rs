use std::sync::Arc;

use tracing::info;

use polyglot_chat::annotate::{AnnotationClient, LanguageDetector, OllamaLanguageDetector};
use polyglot_chat::config::Config;
use polyglot_chat::routes::create_router;
use polyglot_chat::service::EnrichmentService;
use polyglot_chat::store::MessageStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "polyglot_chat=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env();

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let detector: Option<Arc<dyn LanguageDetector>> = match &config.detector_base_url {
        Some(base_url) => {
            info!("Language detector: {} via {base_url}", config.detector_model);
            Some(Arc::new(OllamaLanguageDetector::new(base_url, &config.detector_model)?))
        }
        None => {
            // Normal condition: messages simply keep their pending language.
            info!("Language detector capability is absent");
            None
        }
    };

    let store = MessageStore::new();
    let client = AnnotationClient::new(
        config.summarizer_url.clone(),
        config.translator_url.clone(),
        detector,
    )?;
    let service = EnrichmentService::new(store, client);

    // ── Router ────────────────────────────────────────────────────────────────
    let app = create_router(service);

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
