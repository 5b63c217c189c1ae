use callrank_core::config;
use callrank_core::HybridSearchEngine;
use callrank_server::api::create_router;
use callrank_server::api::handlers::AppState;
use callrank_server::clients::elastic::ElasticClient;
use callrank_server::clients::embedding::EmbeddingClient;
use callrank_server::clients::llm::LlmClient;
use clap::Parser;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "callrank", about = "Hybrid search for call-center dialogues")]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = config::DEFAULT_PORT)]
    port: u16,

    /// Base URL of the Elasticsearch-compatible lexical index
    #[arg(long, env = "CALLRANK_ELASTIC_URL", default_value = "http://localhost:9200")]
    elastic_url: String,

    /// Index name holding the call records
    #[arg(long, env = "CALLRANK_ELASTIC_INDEX", default_value = "calls")]
    elastic_index: String,

    /// Base URL of the embedding service (omit to disable the semantic signal)
    #[arg(long, env = "CALLRANK_EMBEDDING_URL")]
    embedding_url: Option<String>,

    /// Base URL of the OpenAI-compatible LLM API (omit to use rule-based
    /// query analysis only)
    #[arg(long, env = "CALLRANK_LLM_URL")]
    llm_url: Option<String>,

    /// Model name for LLM query analysis
    #[arg(long, env = "CALLRANK_LLM_MODEL", default_value = "gpt-4o-mini")]
    llm_model: String,

    /// API key for the LLM service
    #[arg(long, env = "CALLRANK_LLM_API_KEY")]
    llm_api_key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(
                    "callrank_server=info"
                        .parse()
                        .expect("valid directive literal"),
                )
                .add_directive(
                    "callrank_core=info"
                        .parse()
                        .expect("valid directive literal"),
                ),
        )
        .init();

    let args = Args::parse();

    if args.port == 0 {
        eprintln!("Error: port must be > 0");
        std::process::exit(1);
    }

    let http = reqwest::Client::new();

    let lexical = Arc::new(ElasticClient::new(
        http.clone(),
        args.elastic_url.clone(),
        args.elastic_index.clone(),
    ));

    let llm = args.llm_url.as_ref().map(|url| {
        Arc::new(LlmClient::new(
            http.clone(),
            url.clone(),
            args.llm_model.clone(),
            args.llm_api_key.clone(),
        )) as Arc<dyn callrank_core::LlmBackend>
    });

    let embedder = args.embedding_url.as_ref().map(|url| {
        Arc::new(EmbeddingClient::new(http.clone(), url.clone()))
            as Arc<dyn callrank_core::EmbeddingBackend>
    });

    let engine = Arc::new(HybridSearchEngine::new(lexical, llm, embedder));

    let state = AppState {
        engine,
        start_time: Instant::now(),
    };
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = args.port,
        elastic_url = %args.elastic_url,
        elastic_index = %args.elastic_index,
        semantic = args.embedding_url.is_some(),
        llm = args.llm_url.is_some(),
        "callrank ready"
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_signal())
        .await?;

    Ok(())
}

async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT"),
        _ = terminate => tracing::info!("Received SIGTERM"),
    }

    tracing::info!("Shutting down gracefully, draining in-flight requests...");
}
