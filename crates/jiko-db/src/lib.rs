//! # jiko-db: Persistence Layer for Jiko POS
//!
//! Storage-backend-agnostic repositories for menu items, inventory, sales,
//! expenses and expense categories.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Jiko POS Data Flow                               │
//! │                                                                         │
//! │  Back-office command (complete_sale)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     jiko-db (THIS CRATE)                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  Persistence  │    │  LocalStore   │    │ KeyValueStore│  │   │
//! │  │   │  (traits)     │◄───│ LocalRepo<T>  │───►│ MemoryStore  │  │   │
//! │  │   │ Repository<T> │    │ one JSON      │    │ Database     │  │   │
//! │  │   │ SaleRepo ...  │    │ array per key │    │ (SQLite)     │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │            <data dir>/jiko.db, table kv_store                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `KeyValueStore` trait and the in-memory backend
//! - [`pool`] - SQLite pool configuration and the SQLite backend
//! - [`migrations`] - Embedded database migrations
//! - [`entity`] - What a stored record must provide
//! - [`ids`] - Epoch-millisecond id assignment
//! - [`repository`] - Repository traits and the key-value implementation
//! - [`error`] - Persistence error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jiko_db::{Database, DbConfig, LocalStore, Persistence, Repository};
//!
//! let db = Database::new(DbConfig::new("jiko.db")).await?;
//! let store = LocalStore::sqlite(db);
//!
//! let menu = store.menu_items().get_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod entity;
pub mod error;
pub mod ids;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use entity::{Entity, EntityId};
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::{
    InventoryRepository, LocalRepository, LocalStore, Persistence, Repository, SaleRepository,
};
pub use store::{KeyValueStore, MemoryStore};
