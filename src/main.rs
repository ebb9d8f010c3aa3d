use anyhow::{Context, Result};
use axum::http::Method;
use clinical_rag_ai::{GenerationOrchestrator, OpenAiClient};
use clinical_rag_api::{create_router, AppState};
use clinical_rag_knowledge::{bundled_corpus, load_corpus, KnowledgeStore, RetrievalService};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clinical_rag=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting clinical knowledge retrieval service...");

    // Load environment variables
    dotenv::dotenv().ok();

    let ai_client = build_ai_client()?;
    let ai_client = Arc::new(ai_client);

    // Deploy-time corpus override, otherwise the bundled clinical corpus
    let corpus = match std::env::var("CORPUS_PATH") {
        Ok(path) => load_corpus(&PathBuf::from(path))?,
        Err(_) => bundled_corpus()?,
    };

    // Embed the corpus before any route exists. Queries cannot be accepted
    // until the store is ready because the router is built from it below.
    let store = Arc::new(KnowledgeStore::build(corpus, ai_client.as_ref()).await);

    let top_k = match std::env::var("RAG_TOP_K") {
        Ok(raw) => raw.parse().context("RAG_TOP_K must be a positive integer")?,
        Err(_) => clinical_rag_knowledge::DEFAULT_TOP_K,
    };

    let retrieval = RetrievalService::new(store, ai_client.clone()).with_top_k(top_k);
    let orchestrator = GenerationOrchestrator::new(ai_client);

    let app = create_router(AppState::new(retrieval, orchestrator))
        // Allow the hospital front end to call the API from the browser
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        );

    let port = std::env::var("PORT").unwrap_or_else(|_| "8081".to_string());
    let addr = format!("0.0.0.0:{}", port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

fn build_ai_client() -> Result<OpenAiClient> {
    // Key falls back to the OPENAI_API_KEY environment variable
    let api_key = std::env::var("OPENAI_API_KEY").ok();
    let mut client = OpenAiClient::new(api_key);

    if let Ok(raw) = std::env::var("AI_REQUEST_TIMEOUT_SECS") {
        let secs: u64 = raw
            .parse()
            .context("AI_REQUEST_TIMEOUT_SECS must be a positive integer")?;
        client = client.with_request_timeout(Duration::from_secs(secs));
    }

    if let Ok(model) = std::env::var("CHAT_MODEL") {
        client = client.with_chat_model(model);
    }

    if let Ok(model) = std::env::var("EMBEDDING_MODEL") {
        client = client.with_embedding_model(model);
    }

    Ok(client)
}
