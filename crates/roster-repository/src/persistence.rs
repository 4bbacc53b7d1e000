//! Backend selection and lifecycle for the persistence adapter.

use crate::{DatabasePool, InMemoryUserRepository, MySqlUserRepository, UserRepository};
use roster_config::{DatabaseBackend, DatabaseConfig};
use roster_core::{HealthCheck, RosterError, RosterResult};
use std::sync::Arc;
use tracing::info;

/// Handles to the opened persistence adapter.
#[derive(Clone)]
pub struct Persistence {
    /// User repository for the selected backend.
    pub users: Arc<dyn UserRepository>,
    /// Readiness check for the selected backend.
    pub health: Arc<dyn HealthCheck>,
    pool: Option<Arc<DatabasePool>>,
}

impl Persistence {
    /// Opens the backend named by the database URL scheme.
    ///
    /// For MySQL this connects the pool and, when enabled, applies pending
    /// migrations.
    pub async fn open(config: &DatabaseConfig) -> RosterResult<Self> {
        let backend = config.backend().ok_or_else(|| {
            RosterError::Configuration(format!("Unsupported database URL: {}", config.url))
        })?;
        info!("Opening {} persistence backend", backend);

        match backend {
            DatabaseBackend::MySql => {
                let pool = Arc::new(DatabasePool::connect(config).await?);
                if config.run_migrations {
                    pool.run_migrations().await?;
                }
                Ok(Self::mysql(pool))
            }
            DatabaseBackend::Memory => Ok(Self::in_memory(Arc::new(InMemoryUserRepository::new()))),
        }
    }

    /// Wraps a connected MySQL pool.
    #[must_use]
    pub fn mysql(pool: Arc<DatabasePool>) -> Self {
        Self {
            users: Arc::new(MySqlUserRepository::new(Arc::clone(&pool))),
            health: Arc::clone(&pool) as Arc<dyn HealthCheck>,
            pool: Some(pool),
        }
    }

    /// Wraps an in-memory repository.
    #[must_use]
    pub fn in_memory(repo: Arc<InMemoryUserRepository>) -> Self {
        Self {
            users: Arc::clone(&repo) as Arc<dyn UserRepository>,
            health: repo,
            pool: None,
        }
    }

    /// Releases backend resources.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("health", &self.health.name())
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_core::NewUser;

    #[tokio::test]
    async fn test_open_memory_backend() {
        let config = DatabaseConfig {
            url: "memory://".to_string(),
            ..Default::default()
        };

        let persistence = Persistence::open(&config).await.unwrap();
        assert_eq!(persistence.health.name(), "memory");

        let saved = persistence
            .users
            .save(NewUser::new("Ada", "ada@example.com"))
            .await
            .unwrap();
        assert_eq!(persistence.users.find_all().await.unwrap(), vec![saved]);

        persistence.close().await;
    }

    #[tokio::test]
    async fn test_open_rejects_unknown_scheme() {
        let config = DatabaseConfig {
            url: "mongodb://localhost:27017/users".to_string(),
            ..Default::default()
        };

        let err = Persistence::open(&config).await.unwrap_err();
        assert!(matches!(err, RosterError::Configuration(_)));
    }
}
