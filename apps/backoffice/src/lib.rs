//! # Jiko Back Office
//!
//! The orchestration layer between the back-office panels and the engine.
//! Panels call the functions in [`commands`]; those validate input, call
//! `jiko-core` and `jiko-db`, and turn every failure into an [`ApiError`].
//!
//! ## Module Organization
//! ```text
//! jiko_backoffice/
//! ├── lib.rs          ◄─── You are here (startup, tracing)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── AppConfig (defaults < jiko.toml < JIKO_*)
//! │   ├── db.rs       ◄─── Persistence handle
//! │   ├── order.rs    ◄─── Order in progress + accompaniment picker
//! │   └── session.rs  ◄─── Signed-in user
//! ├── commands/       ◄─── One module per panel
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Back Office Startup                               │
//! │                                                                         │
//! │  1. Load Configuration ───────────────────────────────────────────────► │
//! │     • defaults, then jiko.toml, then JIKO_* variables                   │
//! │                                                                         │
//! │  2. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter                                │
//! │     • RUST_LOG wins over the configured filter                          │
//! │                                                                         │
//! │  3. Open Storage ─────────────────────────────────────────────────────► │
//! │     • memory, or SQLite with WAL mode and pending migrations            │
//! │                                                                         │
//! │  4. Initialize State Objects ─────────────────────────────────────────► │
//! │     • DbState, OrderState (empty), SessionState (signed out)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use jiko_db::Persistence;

pub use error::{ApiError, ErrorCode};
use state::{AppConfig, DbState, OrderState, SessionState};

/// Everything one back-office terminal holds.
#[derive(Debug, Clone)]
pub struct Backoffice {
    config: AppConfig,
    db: DbState,
    order: OrderState,
    session: SessionState,
}

impl Backoffice {
    /// Wires an already opened backend.
    pub fn new(config: AppConfig, persistence: Arc<dyn Persistence>) -> Self {
        Backoffice {
            config,
            db: DbState::new(persistence),
            order: OrderState::new(),
            session: SessionState::new(),
        }
    }

    /// Opens the backend named in `config`.
    pub async fn open(config: AppConfig) -> Result<Self, ApiError> {
        let db = DbState::open(&config.storage).await?;
        info!(store = %config.store_name, "Back office ready");

        Ok(Backoffice {
            config,
            db,
            order: OrderState::new(),
            session: SessionState::new(),
        })
    }

    /// Loads configuration, initializes tracing and opens storage.
    pub async fn start() -> Result<Self, ApiError> {
        let config = AppConfig::load()?;
        init_tracing(&config.log_filter);
        info!("Starting Jiko POS back office");
        Backoffice::open(config).await
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn db(&self) -> &DbState {
        &self.db
    }

    pub fn order(&self) -> &OrderState {
        &self.order
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=jiko=trace` - Show trace for jiko crates only
/// - Otherwise `default_filter` (see [`state::DEFAULT_LOG_FILTER`])
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{menu, order, sales};
    use crate::state::StorageConfig;
    use jiko_core::money::Money;
    use jiko_core::types::{Accompaniment, NewMenuItem, PaymentMethod};

    fn sqlite_config(path: std::path::PathBuf) -> AppConfig {
        AppConfig {
            storage: StorageConfig::Sqlite { path },
            ..AppConfig::default()
        }
    }

    #[tokio::test]
    async fn test_sale_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("jiko.db");

        let app = Backoffice::open(sqlite_config(path.clone())).await.unwrap();
        let stew = menu::create_menu_item(
            app.db(),
            NewMenuItem::new("Beef Stew", Money::from_major(400), "Mains")
                .with_accompaniment(Accompaniment::new("Rice", Money::zero(), true))
                .with_accompaniment(Accompaniment::new("Kachumbari", Money::from_major(50), false)),
        )
        .await
        .unwrap();

        order::select_menu_item(app.db(), app.order(), stew.id)
            .await
            .unwrap();
        order::toggle_accompaniment(app.order(), &stew.accompaniments[1].id).unwrap();
        order::confirm_selection(app.order()).unwrap();
        let receipt = order::complete_sale(app.db(), app.order(), PaymentMethod::Mpesa, 522.0)
            .await
            .unwrap();
        assert_eq!(receipt.sale.total, Money::from_major(522));
        drop(app);

        let reopened = Backoffice::open(sqlite_config(path)).await.unwrap();
        let history = sales::list_sales(reopened.db()).await.unwrap();
        assert_eq!(history, vec![receipt.sale]);
        assert_eq!(menu::list_menu_items(reopened.db()).await.unwrap(), vec![stew]);
    }

    #[tokio::test]
    async fn test_memory_backend_starts_empty() {
        let config = AppConfig {
            storage: StorageConfig::Memory,
            ..AppConfig::default()
        };
        let app = Backoffice::open(config).await.unwrap();
        assert!(menu::list_menu_items(app.db()).await.unwrap().is_empty());
        assert!(app.session().current().is_none());
        assert!(order::get_order(app.order()).lines.is_empty());
    }
}
