//! # Stored Entities
//!
//! What every collection record must provide so one generic repository can
//! store it.
//!
//! | Entity            | Id     | Key                       | Mutable | Unique key |
//! |-------------------|--------|---------------------------|---------|------------|
//! | `MenuItem`        | `i64`  | `jiko.menu_items`         | yes     | -          |
//! | `InventoryItem`   | String | `jiko.inventory`          | yes     | -          |
//! | `Sale`            | String | `jiko.sales`              | no      | -          |
//! | `Expense`         | String | `jiko.expenses`           | yes     | -          |
//! | `ExpenseCategory` | String | `jiko.expense_categories` | yes     | name       |

use std::convert::Infallible;
use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use jiko_core::types::{
    Expense, ExpenseCategory, ExpenseCategoryPatch, ExpensePatch, InventoryItem,
    InventoryItemPatch, MenuItem, MenuItemPatch, NewExpense, NewExpenseCategory,
    NewInventoryItem, NewMenuItem, NewSale, Sale,
};

// =============================================================================
// Ids
// =============================================================================

/// An id built from an epoch-millisecond timestamp.
pub trait EntityId: Clone + PartialEq + fmt::Display + Send + Sync + 'static {
    fn from_millis(millis: i64) -> Self;

    /// The timestamp this id was built from, if it was.
    fn as_millis(&self) -> Option<i64>;
}

impl EntityId for i64 {
    fn from_millis(millis: i64) -> Self {
        millis
    }

    fn as_millis(&self) -> Option<i64> {
        Some(*self)
    }
}

impl EntityId for String {
    fn from_millis(millis: i64) -> Self {
        millis.to_string()
    }

    fn as_millis(&self) -> Option<i64> {
        self.parse().ok()
    }
}

// =============================================================================
// Entity
// =============================================================================

/// A record stored as one element of a JSON-array collection.
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: EntityId;
    /// Creation payload, the entity without its id.
    type New: Send + 'static;
    /// Partial update; absent fields are left alone.
    type Patch: Send + 'static;

    /// Storage key of the collection.
    const COLLECTION: &'static str;
    /// Name used in errors and logs.
    const NAME: &'static str;
    /// `false` for history records that are never updated or deleted.
    const MUTABLE: bool = true;

    fn id(&self) -> &Self::Id;

    fn from_new(id: Self::Id, new: Self::New) -> Self;

    fn apply(&mut self, patch: Self::Patch);

    /// Field and normalised value that must be unique across the collection.
    fn unique_key(&self) -> Option<(&'static str, String)> {
        None
    }
}

impl Entity for MenuItem {
    type Id = i64;
    type New = NewMenuItem;
    type Patch = MenuItemPatch;

    const COLLECTION: &'static str = "jiko.menu_items";
    const NAME: &'static str = "MenuItem";

    fn id(&self) -> &i64 {
        &self.id
    }

    fn from_new(id: i64, new: NewMenuItem) -> Self {
        MenuItem::from_new(id, new)
    }

    fn apply(&mut self, patch: MenuItemPatch) {
        patch.apply_to(self);
    }
}

impl Entity for InventoryItem {
    type Id = String;
    type New = NewInventoryItem;
    type Patch = InventoryItemPatch;

    const COLLECTION: &'static str = "jiko.inventory";
    const NAME: &'static str = "InventoryItem";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_new(id: String, new: NewInventoryItem) -> Self {
        InventoryItem::from_new(id, new)
    }

    fn apply(&mut self, patch: InventoryItemPatch) {
        patch.apply_to(self);
    }
}

impl Entity for Sale {
    type Id = String;
    type New = NewSale;
    type Patch = Infallible;

    const COLLECTION: &'static str = "jiko.sales";
    const NAME: &'static str = "Sale";
    const MUTABLE: bool = false;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_new(id: String, new: NewSale) -> Self {
        Sale::from_new(id, new)
    }

    fn apply(&mut self, patch: Infallible) {
        match patch {}
    }
}

impl Entity for Expense {
    type Id = String;
    type New = NewExpense;
    type Patch = ExpensePatch;

    const COLLECTION: &'static str = "jiko.expenses";
    const NAME: &'static str = "Expense";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_new(id: String, new: NewExpense) -> Self {
        Expense::from_new(id, new)
    }

    fn apply(&mut self, patch: ExpensePatch) {
        patch.apply_to(self);
    }
}

impl Entity for ExpenseCategory {
    type Id = String;
    type New = NewExpenseCategory;
    type Patch = ExpenseCategoryPatch;

    const COLLECTION: &'static str = "jiko.expense_categories";
    const NAME: &'static str = "ExpenseCategory";

    fn id(&self) -> &String {
        &self.id
    }

    fn from_new(id: String, new: NewExpenseCategory) -> Self {
        ExpenseCategory::from_new(id, new)
    }

    fn apply(&mut self, patch: ExpenseCategoryPatch) {
        patch.apply_to(self);
    }

    fn unique_key(&self) -> Option<(&'static str, String)> {
        Some(("name", self.name.trim().to_lowercase()))
    }
}
