//! # Repository Module
//!
//! Storage-backend-agnostic access to every Jiko POS collection.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Back-office command                                                   │
//! │       │                                                                 │
//! │       │  persistence.sales().get_by_date_range(start, end)             │
//! │       ▼                                                                 │
//! │  Arc<dyn Persistence>                                                  │
//! │  ├── menu_items()          → &dyn Repository<MenuItem>                 │
//! │  ├── inventory()           → &dyn InventoryRepository                  │
//! │  ├── sales()               → &dyn SaleRepository                       │
//! │  ├── expenses()            → &dyn Repository<Expense>                  │
//! │  └── expense_categories()  → &dyn Repository<ExpenseCategory>          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LocalStore (this crate)        or a networked implementation          │
//! │  └── KeyValueStore: MemoryStore | Database (SQLite)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The persistence handle is passed in explicitly. There is no global store,
//! so tests and parallel instances each own their own.
//!
//! ## Available Repositories
//!
//! - [`Repository`] - get_all / create / update / delete for any [`Entity`]
//! - [`SaleRepository`] - adds an inclusive date-range query
//! - [`InventoryRepository`] - adds clamped stock adjustment and low-stock listing

use async_trait::async_trait;

use jiko_core::types::{Expense, ExpenseCategory, MenuItem};

use crate::entity::Entity;
use crate::error::{DbError, DbResult};

pub mod inventory;
pub mod local;
pub mod sale;

pub use inventory::InventoryRepository;
pub use local::{LocalRepository, LocalStore};
pub use sale::SaleRepository;

/// CRUD over one collection.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// All records, in insertion order.
    async fn get_all(&self) -> DbResult<Vec<T>>;

    /// Assigns a fresh id, appends, persists and returns the stored record.
    async fn create(&self, new: T::New) -> DbResult<T>;

    /// Merges `patch` onto the record with `id`.
    ///
    /// Fails with [`DbError::NotFound`] if there is no such record.
    async fn update(&self, id: &T::Id, patch: T::Patch) -> DbResult<T>;

    /// Removes the record with `id` if present. Deleting an absent id is not
    /// an error.
    async fn delete(&self, id: &T::Id) -> DbResult<()>;

    /// One record by id.
    async fn get(&self, id: &T::Id) -> DbResult<T> {
        self.get_all()
            .await?
            .into_iter()
            .find(|record| record.id() == id)
            .ok_or_else(|| DbError::not_found(T::NAME, id))
    }
}

/// Every repository the back office needs, behind one handle.
pub trait Persistence: Send + Sync {
    fn menu_items(&self) -> &dyn Repository<MenuItem>;

    fn inventory(&self) -> &dyn InventoryRepository;

    fn sales(&self) -> &dyn SaleRepository;

    fn expenses(&self) -> &dyn Repository<Expense>;

    fn expense_categories(&self) -> &dyn Repository<ExpenseCategory>;
}
