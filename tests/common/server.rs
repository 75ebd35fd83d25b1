//! Test server lifecycle management
//!
//! Each test gets its own fake backend on a random port with freshly seeded
//! data, so tests never observe each other's users or collections.

use super::{film_backend, smk_backend};
use axum::Router;
use tokio::net::TcpListener;

/// Fake backend instance
///
/// When dropped, the server gracefully shuts down.
pub struct TestServer {
    /// API root, e.g. "http://127.0.0.1:12345/api"
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns the Filmkassen fake, seeded with the test user and catalog.
    pub async fn filmkassen() -> Self {
        Self::spawn(film_backend::router()).await
    }

    /// Spawns the MitSMK fake, seeded with the test user and artworks.
    pub async fn mitsmk() -> Self {
        Self::spawn(smk_backend::router()).await
    }

    async fn spawn(app: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Test server failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}/api", port),
            port,
            _shutdown_tx: Some(shutdown_tx),
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
