//! # Database State
//!
//! The persistence handle every data command goes through.
//!
//! ## Thread Safety
//! `LocalStore` serialises its own read-modify-write cycles and the SQLite
//! pool is thread-safe, so the handle is shared without extra locking.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! pub async fn list_menu_items(db: &DbState) -> Result<Vec<MenuItem>, ApiError> {
//!     Ok(db.inner().menu_items().get_all().await?)
//! }
//! ```

use std::sync::Arc;

use tracing::info;

use jiko_db::{Database, DbConfig, DbResult, LocalStore, Persistence};

use crate::state::StorageConfig;

#[derive(Clone)]
pub struct DbState {
    persistence: Arc<dyn Persistence>,
}

impl DbState {
    /// Wraps an existing backend, e.g. a networked one or a test store.
    pub fn new(persistence: Arc<dyn Persistence>) -> Self {
        DbState { persistence }
    }

    /// Opens the configured backend. SQLite files get their migrations run.
    pub async fn open(storage: &StorageConfig) -> DbResult<Self> {
        let store = match storage {
            StorageConfig::Memory => {
                info!("Using in-memory storage");
                LocalStore::in_memory()
            }
            StorageConfig::Sqlite { path } => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent).map_err(|e| {
                            jiko_db::DbError::ConnectionFailed(format!(
                                "cannot create {}: {}",
                                parent.display(),
                                e
                            ))
                        })?;
                    }
                }
                let db = Database::new(DbConfig::new(path)).await?;
                info!(path = %path.display(), "Database connected and migrations applied");
                LocalStore::sqlite(db)
            }
        };

        Ok(DbState::new(Arc::new(store)))
    }

    pub fn inner(&self) -> &dyn Persistence {
        self.persistence.as_ref()
    }
}

impl std::fmt::Debug for DbState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbState").finish_non_exhaustive()
    }
}
