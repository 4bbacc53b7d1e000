//! Application assembly.

use roster_config::AppConfig;
use roster_core::{RosterError, RosterResult};
use roster_repository::Persistence;
use roster_rest::{create_router, AppState};
use roster_security::PasswordHasher;
use roster_service::UserServiceImpl;
use std::{future::Future, net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

/// A bound, ready-to-serve application.
///
/// Building opens the persistence backend and binds the listener, so any
/// startup failure surfaces before the first request.
pub struct Application {
    listener: TcpListener,
    router: axum::Router,
    persistence: Persistence,
}

impl Application {
    /// Opens persistence, wires the services, and binds the listener.
    pub async fn build(config: &AppConfig) -> RosterResult<Self> {
        let persistence = Persistence::open(&config.database).await?;

        let user_service = UserServiceImpl::new(persistence.users.clone(), PasswordHasher::new());
        let state = AppState::new(Arc::new(user_service), persistence.health.clone());
        let router = create_router(state, &config.server);

        let addr = config.server.addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| RosterError::Internal(format!("Failed to bind {addr}: {e}")))?;

        Ok(Self {
            listener,
            router,
            persistence,
        })
    }

    /// Returns the address the listener is bound to.
    pub fn local_addr(&self) -> RosterResult<SocketAddr> {
        self.listener
            .local_addr()
            .map_err(|e| RosterError::Internal(format!("Failed to read local address: {e}")))
    }

    /// Serves requests until `shutdown` resolves, then releases persistence.
    pub async fn run_until<F>(self, shutdown: F) -> RosterResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Self {
            listener,
            router,
            persistence,
        } = self;

        let served = axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| RosterError::Internal(format!("HTTP server error: {e}")));

        persistence.close().await;
        info!("Server shutdown complete");
        served
    }
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application")
            .field("listener", &self.listener.local_addr().ok())
            .field("persistence", &self.persistence)
            .finish_non_exhaustive()
    }
}
