//! HTTP surface for the company registry.
//!
//! # Responsibility
//! - Map the `/empresas` and `/obrigacoes` routes onto core services.
//! - Translate core errors into status codes with localized details.
//!
//! # Invariants
//! - Every request opens its own database session and drops it before the
//!   response is written.
//! - Blocking SQLite work never runs on async worker threads.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;

use empresa_core::{Database, ServiceError};
use error::ApiError;
use std::sync::Arc;

/// Shared router state. Holds no open connection.
#[derive(Clone)]
pub struct AppState {
    db: Arc<Database>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db: Arc::new(db) }
    }

    /// Runs one unit of work against the database on the blocking pool.
    pub(crate) async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Database) -> Result<T, ServiceError> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        let outcome = tokio::task::spawn_blocking(move || op(db.as_ref())).await?;
        Ok(outcome?)
    }
}
