//! Test server harness.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use summeval::catalog::VideoCatalog;
use summeval::constants::DEFAULT_MAX_BATCH_SIZE;
use summeval::evaluation::SummaryEvaluator;
use summeval::scoring::{ScoringMethod, SimilarityScorer};
use summeval_server::gateway::{HandlerState, create_router_with_state};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

const STARTUP_WAIT_TIMEOUT_SECS: u64 = 5;
const STARTUP_POLL_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub port: u16,
    pub default_method: ScoringMethod,
    pub max_batch_size: usize,
    pub catalog_path: Option<std::path::PathBuf>,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            port: 0,
            default_method: ScoringMethod::Embedding,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            catalog_path: None,
        }
    }
}

impl TestServerConfig {
    pub fn with_default_method(mut self, method: ScoringMethod) -> Self {
        self.default_method = method;
        self
    }

    pub fn with_catalog_path(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }
}

pub struct TestServer {
    pub addr: SocketAddr,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn wait_for_server_ready(
    addr: SocketAddr,
    timeout: Duration,
    interval: Duration,
) -> Result<(), ServerStartupError> {
    let start = std::time::Instant::now();

    loop {
        if start.elapsed() > timeout {
            return Err(ServerStartupError::Timeout);
        }

        match tokio::net::TcpStream::connect(addr).await {
            Ok(_) => return Ok(()),
            Err(_) => {
                tokio::time::sleep(interval).await;
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServerStartupError {
    #[error("Server failed to start within timeout")]
    Timeout,
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Server startup failed: {0}")]
    StartupFailed(String),
}

/// Spawns a server backed by the stub embedder on a loopback port.
///
/// Port `0` binds an ephemeral port; read it back from [`TestServer::addr`].
pub async fn spawn_test_server(config: TestServerConfig) -> Result<TestServer, ServerStartupError> {
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    let listener = TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;

    let catalog = VideoCatalog::load(config.catalog_path.as_deref())
        .map_err(|e| ServerStartupError::StartupFailed(e.to_string()))?;

    let evaluator = SummaryEvaluator::new(SimilarityScorer::stub(), config.default_method);
    let state = HandlerState::new(
        Arc::new(evaluator),
        Arc::new(catalog),
        config.max_batch_size,
    );

    let app = create_router_with_state(state);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    wait_for_server_ready(
        local_addr,
        Duration::from_secs(STARTUP_WAIT_TIMEOUT_SECS),
        Duration::from_millis(STARTUP_POLL_INTERVAL_MS),
    )
    .await?;

    Ok(TestServer {
        addr: local_addr,
        _server_handle: server_handle,
        shutdown_tx: Some(shutdown_tx),
    })
}
