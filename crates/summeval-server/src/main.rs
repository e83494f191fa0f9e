//! Summeval HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use summeval::catalog::VideoCatalog;
use summeval::config::Config;
use summeval::embedding::MiniLmConfig;
use summeval::evaluation::SummaryEvaluator;
use summeval::scoring::SimilarityScorer;
use summeval_server::gateway::{HandlerState, create_router_with_state};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check().await);
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        device = %config.device,
        scoring_method = %config.scoring_method,
        max_batch_size = config.max_batch_size,
        "Summeval starting"
    );

    let embedder_config = if let Some(path) = &config.model_path {
        MiniLmConfig::new(path.clone()).with_device(config.device)
    } else {
        tracing::warn!("No SUMMEVAL_MODEL_PATH configured, running embedder in stub mode");
        MiniLmConfig::stub()
    };
    let scorer = SimilarityScorer::new(embedder_config)?;
    tracing::info!(
        embedding_dim = scorer.embedder().embedding_dim(),
        stub = scorer.is_embedder_stub(),
        "Sentence embedder ready"
    );

    let evaluator = Arc::new(SummaryEvaluator::new(scorer, config.scoring_method));
    let catalog = Arc::new(VideoCatalog::load(config.catalog_path.as_deref())?);
    tracing::info!(videos = catalog.len(), "Video catalog ready");

    let state = HandlerState::new(evaluator, catalog, config.max_batch_size);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Summeval shutdown complete");
    Ok(())
}

async fn run_health_check() -> i32 {
    let port = std::env::var("SUMMEVAL_PORT")
        .or_else(|_| std::env::var("PORT"))
        .ok()
        .and_then(|p| p.trim().parse::<u16>().ok())
        .unwrap_or(5000);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let Ok(client) = reqwest::Client::builder()
        .timeout(Duration::from_secs(1))
        .build()
    else {
        return 1;
    };

    match client.get(&url).send().await {
        Ok(res) if res.status().is_success() => 0,
        _ => 1,
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
