//! # State Module
//!
//! Back-office state, split into focused types so each command takes only
//! what it touches.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Backoffice                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │       ┌───────────────┬──────┴────────┬─────────────────┐              │
//! │       ▼               ▼               ▼                 ▼              │
//! │  ┌──────────┐  ┌──────────────┐  ┌──────────────┐  ┌───────────┐       │
//! │  │ DbState  │  │  OrderState  │  │ SessionState │  │ AppConfig │       │
//! │  │          │  │              │  │              │  │           │       │
//! │  │ Arc<dyn  │  │  Arc<Mutex<  │  │ Arc<RwLock<  │  │ read-only │       │
//! │  │ Persist- │  │    Till      │  │ Option<User> │  │           │       │
//! │  │ ence>    │  │  >>          │  │ >>           │  │           │       │
//! │  └──────────┘  └──────────────┘  └──────────────┘  └───────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod order;
mod session;

pub use config::{default_config_path, AppConfig, ConfigError, StorageConfig, DEFAULT_LOG_FILTER};
pub use db::DbState;
pub use order::{AccompanimentOption, OrderState, OrderView, PendingItem, SelectionView, Till};
pub use session::SessionState;
