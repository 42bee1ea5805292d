//! Application state - shared across all handlers.

use std::sync::Arc;

use quillpress_core::intake::normalize::{Reflow, SentenceReflow};
use quillpress_core::ports::PostStore;
use quillpress_infra::database::DatabaseConfig;
use quillpress_infra::store::InMemoryPostStore;

#[cfg(feature = "postgres")]
use quillpress_infra::database::{DatabaseConnections, PostgresPostStore};

/// Shared application state.
///
/// The store handle is acquired once at startup and passed explicitly into
/// every pipeline invocation; nothing reaches for ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub reflow: Arc<dyn Reflow>,
    #[cfg(feature = "postgres")]
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let reflow: Arc<dyn Reflow> = Arc::new(SentenceReflow);

        #[cfg(feature = "postgres")]
        let (db, posts): (Option<Arc<DatabaseConnections>>, Arc<dyn PostStore>) = {
            if let Some(config) = db_config {
                match DatabaseConnections::init(config).await {
                    Ok(connections) => {
                        let conn = Arc::new(connections);
                        let store = Arc::new(PostgresPostStore::new(conn.main.clone()));
                        (Some(conn), store)
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        (None, Arc::new(InMemoryPostStore::new()))
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (None, Arc::new(InMemoryPostStore::new()))
            }
        };

        #[cfg(not(feature = "postgres"))]
        let posts: Arc<dyn PostStore> = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory store");
            Arc::new(InMemoryPostStore::new())
        };

        tracing::info!("Application state initialized");

        Self {
            posts,
            reflow,
            #[cfg(feature = "postgres")]
            db,
        }
    }
}
