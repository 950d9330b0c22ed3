//! # Local Repositories
//!
//! [`Repository`] over a [`KeyValueStore`]: one JSON array per collection.
//!
//! ## Read-Modify-Write
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create / update / delete                                               │
//! │                                                                         │
//! │   lock writes ──► get(key) ──► decode Vec<T> ──► modify ──► encode ──►  │
//! │   set(key) ──► unlock                                                   │
//! │                                                                         │
//! │  get_all / get_by_date_range / low_stock                                │
//! │                                                                         │
//! │   get(key) ──► decode Vec<T> ──► filter                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All repositories of one [`LocalStore`] share a single write lock, so two
//! tasks writing through the same store never lose each other's updates.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info};

use jiko_core::types::{Expense, ExpenseCategory, InventoryItem, MenuItem, Sale};

use crate::entity::{Entity, EntityId};
use crate::error::{DbError, DbResult};
use crate::ids::IdGenerator;
use crate::pool::Database;
use crate::repository::{InventoryRepository, Persistence, Repository, SaleRepository};
use crate::store::{KeyValueStore, MemoryStore};

// =============================================================================
// LocalRepository
// =============================================================================

/// Repository for one collection in a key-value store.
pub struct LocalRepository<T> {
    store: Arc<dyn KeyValueStore>,
    write_lock: Arc<Mutex<()>>,
    ids: Arc<IdGenerator>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> LocalRepository<T> {
    /// A repository with its own write lock and id generator.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        LocalRepository::with_shared(store, Arc::new(Mutex::new(())), Arc::new(IdGenerator::new()))
    }

    fn with_shared(
        store: Arc<dyn KeyValueStore>,
        write_lock: Arc<Mutex<()>>,
        ids: Arc<IdGenerator>,
    ) -> Self {
        LocalRepository {
            store,
            write_lock,
            ids,
            _entity: PhantomData,
        }
    }

    /// Decodes the stored collection; a key never written is an empty one.
    pub(crate) async fn load(&self) -> DbResult<Vec<T>> {
        match self.store.get(T::COLLECTION).await? {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| DbError::serialization(T::COLLECTION, e)),
            None => Ok(Vec::new()),
        }
    }

    pub(crate) async fn save(&self, records: &[T]) -> DbResult<()> {
        let json = serde_json::to_string(records)
            .map_err(|e| DbError::serialization(T::COLLECTION, e))?;
        self.store.set(T::COLLECTION, &json).await
    }

    /// Runs one read-modify-write cycle under the store's write lock.
    pub(crate) async fn modify<R: Send>(
        &self,
        change: impl FnOnce(&mut Vec<T>) -> DbResult<R> + Send,
    ) -> DbResult<R> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        let result = change(&mut records)?;
        self.save(&records).await?;
        Ok(result)
    }

    fn check_unique(records: &[T], candidate: &T) -> DbResult<()> {
        let Some((field, key)) = candidate.unique_key() else {
            return Ok(());
        };

        let clash = records.iter().any(|r| {
            r.id() != candidate.id() && r.unique_key().is_some_and(|(_, k)| k == key)
        });
        if clash {
            return Err(DbError::duplicate(field, key));
        }
        Ok(())
    }
}

impl<T> Clone for LocalRepository<T> {
    fn clone(&self) -> Self {
        LocalRepository {
            store: Arc::clone(&self.store),
            write_lock: Arc::clone(&self.write_lock),
            ids: Arc::clone(&self.ids),
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for LocalRepository<T> {
    async fn get_all(&self) -> DbResult<Vec<T>> {
        let records = self.load().await?;
        debug!(collection = T::COLLECTION, count = records.len(), "Loaded collection");
        Ok(records)
    }

    async fn create(&self, new: T::New) -> DbResult<T> {
        let ids = Arc::clone(&self.ids);

        let record = self
            .modify(move |records| {
                let taken = records.iter().filter_map(|r| r.id().as_millis());
                let id = T::Id::from_millis(ids.next(taken));
                let record = T::from_new(id, new);

                Self::check_unique(records, &record)?;
                records.push(record.clone());
                Ok(record)
            })
            .await?;

        debug!(entity = T::NAME, id = %record.id(), "Created record");
        Ok(record)
    }

    async fn update(&self, id: &T::Id, patch: T::Patch) -> DbResult<T> {
        if !T::MUTABLE {
            return Err(DbError::immutable(T::NAME, "updated"));
        }

        let record = self
            .modify(|records| {
                let index = records
                    .iter()
                    .position(|r| r.id() == id)
                    .ok_or_else(|| DbError::not_found(T::NAME, id))?;

                let mut merged = records[index].clone();
                merged.apply(patch);
                Self::check_unique(records, &merged)?;

                records[index] = merged.clone();
                Ok(merged)
            })
            .await?;

        debug!(entity = T::NAME, id = %id, "Updated record");
        Ok(record)
    }

    async fn delete(&self, id: &T::Id) -> DbResult<()> {
        if !T::MUTABLE {
            return Err(DbError::immutable(T::NAME, "deleted"));
        }

        let removed = self
            .modify(|records| {
                let before = records.len();
                records.retain(|r| r.id() != id);
                Ok(before - records.len())
            })
            .await?;

        debug!(entity = T::NAME, id = %id, removed, "Deleted record");
        Ok(())
    }
}

// =============================================================================
// LocalStore
// =============================================================================

/// [`Persistence`] over one key-value store.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use jiko_db::{LocalStore, Persistence};
///
/// let persistence: Arc<dyn Persistence> = Arc::new(LocalStore::in_memory());
/// let _menu = persistence.menu_items();
/// ```
#[derive(Clone)]
pub struct LocalStore {
    menu_items: LocalRepository<MenuItem>,
    inventory: LocalRepository<InventoryItem>,
    sales: LocalRepository<Sale>,
    expenses: LocalRepository<Expense>,
    expense_categories: LocalRepository<ExpenseCategory>,
}

impl LocalStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let write_lock = Arc::new(Mutex::new(()));
        let ids = Arc::new(IdGenerator::new());

        LocalStore {
            menu_items: LocalRepository::with_shared(store.clone(), write_lock.clone(), ids.clone()),
            inventory: LocalRepository::with_shared(store.clone(), write_lock.clone(), ids.clone()),
            sales: LocalRepository::with_shared(store.clone(), write_lock.clone(), ids.clone()),
            expenses: LocalRepository::with_shared(store.clone(), write_lock.clone(), ids.clone()),
            expense_categories: LocalRepository::with_shared(store, write_lock, ids),
        }
    }

    /// Backed by a fresh [`MemoryStore`].
    pub fn in_memory() -> Self {
        info!("Opening in-memory store");
        LocalStore::new(Arc::new(MemoryStore::new()))
    }

    /// Backed by the SQLite `kv_store` table.
    pub fn sqlite(db: Database) -> Self {
        info!("Opening SQLite store");
        LocalStore::new(Arc::new(db))
    }
}

impl Persistence for LocalStore {
    fn menu_items(&self) -> &dyn Repository<MenuItem> {
        &self.menu_items
    }

    fn inventory(&self) -> &dyn InventoryRepository {
        &self.inventory
    }

    fn sales(&self) -> &dyn SaleRepository {
        &self.sales
    }

    fn expenses(&self) -> &dyn Repository<Expense> {
        &self.expenses
    }

    fn expense_categories(&self) -> &dyn Repository<ExpenseCategory> {
        &self.expense_categories
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
