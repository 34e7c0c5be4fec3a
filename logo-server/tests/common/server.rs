//! Test server harness for integration tests.
//!
//! Spins up the real API router on a random port, pointed at a mock
//! upstream provider, so tests can drive it with an HTTP client.

use std::net::SocketAddr;

use logo_server::{api_router, AppState, GeminiSettings, ServerConfig};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// A test server instance with control handles.
pub struct TestServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server that talks to the provider at `upstream_url`.
    ///
    /// # Panics
    ///
    /// Panics if no port is available or server fails to bind.
    pub async fn start(upstream_url: &str, api_key: Option<&str>) -> Self {
        Self::start_with_timeout(upstream_url, api_key, 5).await
    }

    /// Start a server whose upstream calls time out after `timeout_secs`.
    ///
    /// # Panics
    ///
    /// Panics if no port is available or server fails to bind.
    pub async fn start_with_timeout(
        upstream_url: &str,
        api_key: Option<&str>,
        timeout_secs: u64,
    ) -> Self {
        let port = portpicker::pick_unused_port().expect("no available port");
        let addr = SocketAddr::from(([127, 0, 0, 1], port));

        let config = ServerConfig {
            port,
            api_key: api_key.map(str::to_string),
            gemini: GeminiSettings {
                request_timeout_secs: timeout_secs,
                ..GeminiSettings::with_base_url(upstream_url)
            },
            ..ServerConfig::default()
        };
        let app = api_router(AppState::new(config).expect("state"));

        let listener = TcpListener::bind(addr).await.expect("failed to bind");
        let actual_addr = listener.local_addr().expect("failed to get local addr");

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .expect("server error");
        });

        // Give the server a moment to start
        tokio::time::sleep(tokio::time::Duration::from_millis(10)).await;

        Self {
            addr: actual_addr,
            shutdown_tx: Some(shutdown_tx),
            handle,
        }
    }

    /// Get the generate endpoint URL.
    pub fn generate_url(&self) -> String {
        format!("http://{}/api/generate", self.addr)
    }

    /// Get the URL for an arbitrary path.
    #[allow(dead_code)]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Gracefully shut down the server.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        let _ = tokio::time::timeout(tokio::time::Duration::from_secs(5), self.handle).await;
    }
}
