//! # Domain Types
//!
//! Core domain types used throughout Jiko POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    MenuItem     │   │      Sale       │   │  InventoryItem  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (epoch ms)  │   │  id (epoch ms)  │   │  id (epoch ms)  │       │
//! │  │  base_price     │   │  items[]        │   │  quantity ≥ 0   │       │
//! │  │  vat_rate       │   │  subtotal/vat   │   │  min_stock      │       │
//! │  │  ingredients[]  │   │  total/change   │   │  expiry_date?   │       │
//! │  │  accompaniments │   │  payment_method │   └─────────────────┘       │
//! │  └────────┬────────┘   └────────┬────────┘                              │
//! │           │ owns                 │ owns          ┌─────────────────┐    │
//! │           ▼                      ▼               │     Expense     │    │
//! │  ┌─────────────────┐   ┌─────────────────┐      │  category ──────┼─┐  │
//! │  │ Accompaniment / │   │    SaleItem     │      └─────────────────┘ │  │
//! │  │   Ingredient    │   │ (snapshot, no   │      ┌─────────────────┐ │  │
//! │  │ (embedded copy) │   │  link back)     │      │ ExpenseCategory │◄┘  │
//! │  └─────────────────┘   └─────────────────┘      │  name (unique)  │    │
//! │                                                  └─────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Creation and Patch Payloads
//! Every stored entity has a `New*` payload (the entity without its id) and,
//! except for the immutable [`Sale`], a `*Patch` whose `None` fields leave the
//! stored value untouched.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;
use uuid::Uuid;

use crate::money::Money;

/// Deserializes a present field (even `null`) as `Some`, so patches can tell
/// "clear this" apart from "leave it alone".
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// =============================================================================
// VAT Rate
// =============================================================================

/// VAT rate as a fraction (0.16 = 16%).
///
/// Kenyan standard VAT is 16%, which is the default everywhere a rate is not
/// given explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VatRate(#[serde(with = "rust_decimal::serde::float")] Decimal);

/// The standard rate, 16%.
pub const DEFAULT_VAT_RATE: VatRate = VatRate(Decimal::from_parts(16, 0, 0, false, 2));

impl VatRate {
    /// Creates a rate from a fraction.
    #[inline]
    pub const fn new(fraction: Decimal) -> Self {
        VatRate(fraction)
    }

    /// Creates a rate from whole percent (16 → 0.16).
    pub fn from_percent(percent: u32) -> Self {
        VatRate(Decimal::new(percent as i64, 2))
    }

    /// Returns the fraction.
    #[inline]
    pub const fn fraction(&self) -> Decimal {
        self.0
    }

    /// Zero-rated.
    #[inline]
    pub const fn zero() -> Self {
        VatRate(Decimal::ZERO)
    }
}

impl Default for VatRate {
    fn default() -> Self {
        DEFAULT_VAT_RATE
    }
}

impl fmt::Display for VatRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.0 * Decimal::ONE_HUNDRED).normalize())
    }
}

// =============================================================================
// Menu
// =============================================================================

/// A recipe component of a menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    /// Always positive.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub quantity: Decimal,
    /// Free text: "kg", "pieces", "ml".
    pub unit: String,
}

impl Ingredient {
    /// Creates an ingredient with a fresh id.
    pub fn new(name: impl Into<String>, quantity: Decimal, unit: impl Into<String>) -> Self {
        Ingredient {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

/// A side or add-on that can be ordered with a menu item.
///
/// Owned by the menu item (or sale line) that embeds it. There is no global
/// catalog; two dishes offering "Rice" hold two independent copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Accompaniment {
    pub id: String,
    pub name: String,
    /// Surcharge added to the dish base price. Never negative.
    #[ts(type = "number")]
    pub price: Money,
    /// Member of the "pick at least one" group.
    pub required: bool,
}

impl Accompaniment {
    /// Creates an accompaniment with a fresh id.
    pub fn new(name: impl Into<String>, price: Money, required: bool) -> Self {
        Accompaniment {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            price,
            required,
        }
    }
}

/// A dish or drink on the menu.
///
/// ## Invariant
/// `total_price == round(base_price × (1 + vat_rate))`. It is recomputed by
/// [`MenuItem::from_new`] and [`MenuItemPatch::apply_to`]; nothing else
/// writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    /// Epoch-millisecond id.
    pub id: i64,
    pub name: String,
    /// Price before VAT.
    #[ts(type = "number")]
    pub base_price: Money,
    #[ts(type = "number")]
    pub vat_rate: VatRate,
    /// Derived, rounded to whole shillings.
    #[ts(type = "number")]
    pub total_price: Money,
    pub category: String,
    #[serde(rename = "availability")]
    pub available: bool,
    pub description: String,
    pub ingredients: Vec<Ingredient>,
    pub accompaniments: Vec<Accompaniment>,
}

impl MenuItem {
    /// Builds a stored menu item from its creation payload.
    pub fn from_new(id: i64, new: NewMenuItem) -> Self {
        let mut item = MenuItem {
            id,
            name: new.name,
            base_price: new.base_price,
            vat_rate: new.vat_rate,
            total_price: Money::zero(),
            category: new.category,
            available: new.available,
            description: new.description,
            ingredients: new.ingredients,
            accompaniments: new.accompaniments,
        };
        item.reprice();
        item
    }

    /// Recomputes `total_price` from base price and VAT rate.
    pub fn reprice(&mut self) {
        self.total_price = crate::pricing::calculate_total_price(self.base_price, self.vat_rate);
    }

    /// Accompaniments in the "pick at least one" group.
    pub fn required_accompaniments(&self) -> impl Iterator<Item = &Accompaniment> {
        self.accompaniments.iter().filter(|a| a.required)
    }

    /// Accompaniments that can be freely added.
    pub fn optional_accompaniments(&self) -> impl Iterator<Item = &Accompaniment> {
        self.accompaniments.iter().filter(|a| !a.required)
    }

    pub fn has_required_accompaniments(&self) -> bool {
        self.accompaniments.iter().any(|a| a.required)
    }

    /// Looks up an embedded accompaniment by id.
    pub fn accompaniment(&self, id: &str) -> Option<&Accompaniment> {
        self.accompaniments.iter().find(|a| a.id == id)
    }
}

/// Creation payload for [`MenuItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub name: String,
    #[ts(type = "number")]
    pub base_price: Money,
    #[serde(default)]
    #[ts(type = "number")]
    pub vat_rate: VatRate,
    pub category: String,
    #[serde(rename = "availability", default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub accompaniments: Vec<Accompaniment>,
}

fn default_true() -> bool {
    true
}

impl NewMenuItem {
    /// Minimal payload: available, standard VAT, no recipe or sides.
    pub fn new(name: impl Into<String>, base_price: Money, category: impl Into<String>) -> Self {
        NewMenuItem {
            name: name.into(),
            base_price,
            vat_rate: VatRate::default(),
            category: category.into(),
            available: true,
            description: String::new(),
            ingredients: Vec::new(),
            accompaniments: Vec::new(),
        }
    }

    pub fn with_accompaniment(mut self, accompaniment: Accompaniment) -> Self {
        self.accompaniments.push(accompaniment);
        self
    }

    pub fn with_ingredient(mut self, ingredient: Ingredient) -> Self {
        self.ingredients.push(ingredient);
        self
    }
}

/// Partial update for [`MenuItem`]. `total_price` is derived and never patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub base_price: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub vat_rate: Option<VatRate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(rename = "availability", skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<Ingredient>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accompaniments: Option<Vec<Accompaniment>>,
}

impl MenuItemPatch {
    /// Merges the present fields onto `item` and reprices it.
    pub fn apply_to(self, item: &mut MenuItem) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(base_price) = self.base_price {
            item.base_price = base_price;
        }
        if let Some(vat_rate) = self.vat_rate {
            item.vat_rate = vat_rate;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(available) = self.available {
            item.available = available;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(ingredients) = self.ingredients {
            item.ingredients = ingredients;
        }
        if let Some(accompaniments) = self.accompaniments {
            item.accompaniments = accompaniments;
        }
        item.reprice();
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// A stocked ingredient or supply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    /// Never negative; may be fractional (2.5 kg).
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub quantity: Decimal,
    pub unit: String,
    /// Reorder threshold.
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub min_stock: Decimal,
    /// Cost per unit.
    #[ts(type = "number")]
    pub cost: Money,
    #[ts(as = "Option<String>")]
    pub expiry_date: Option<NaiveDate>,
}

impl InventoryItem {
    pub fn from_new(id: String, new: NewInventoryItem) -> Self {
        InventoryItem {
            id,
            name: new.name,
            quantity: new.quantity.max(Decimal::ZERO),
            unit: new.unit,
            min_stock: new.min_stock,
            cost: new.cost,
            expiry_date: new.expiry_date,
        }
    }

    /// Adds a signed delta, clamping at zero: `max(0, quantity + delta)`.
    pub fn adjust_quantity(&mut self, delta: Decimal) {
        self.quantity = (self.quantity + delta).max(Decimal::ZERO);
    }

    /// At or below the reorder threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_stock
    }

    /// Expired strictly before `today`.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.expiry_date.is_some_and(|d| d < today)
    }

    /// Value of the stock on hand (cost × quantity).
    pub fn stock_value(&self) -> Money {
        self.cost.scale(self.quantity)
    }
}

/// Creation payload for [`InventoryItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub quantity: Decimal,
    pub unit: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[ts(type = "number")]
    pub min_stock: Decimal,
    #[ts(type = "number")]
    pub cost: Money,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub expiry_date: Option<NaiveDate>,
}

/// Partial update for [`InventoryItem`]. A quantity set here is clamped at
/// zero like any other stock mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct InventoryItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[ts(type = "number | null")]
    pub quantity: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[ts(type = "number | null")]
    pub min_stock: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub cost: Option<Money>,
    /// `Some(None)` clears the expiry date.
    #[serde(
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[ts(as = "Option<String>")]
    pub expiry_date: Option<Option<NaiveDate>>,
}

impl InventoryItemPatch {
    pub fn apply_to(self, item: &mut InventoryItem) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity.max(Decimal::ZERO);
        }
        if let Some(unit) = self.unit {
            item.unit = unit;
        }
        if let Some(min_stock) = self.min_stock {
            item.min_stock = min_stock;
        }
        if let Some(cost) = self.cost {
            item.cost = cost;
        }
        if let Some(expiry_date) = self.expiry_date {
            item.expiry_date = expiry_date;
        }
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale or an expense was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Notes and coins; the only method where change is normally handed back.
    Cash,
    /// Card on an external terminal.
    Card,
    /// Other digital wallets.
    Digital,
    /// M-Pesa mobile money.
    Mpesa,
    /// Bank transfer.
    Bank,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Cash,
        PaymentMethod::Card,
        PaymentMethod::Digital,
        PaymentMethod::Mpesa,
        PaymentMethod::Bank,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Digital => "digital",
            PaymentMethod::Mpesa => "mpesa",
            PaymentMethod::Bank => "bank",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Sale Item
// =============================================================================

/// A priced line of an order or a completed sale.
///
/// Uses the snapshot pattern: name, prices and accompaniments are frozen at
/// add time. There is deliberately no menu item id here, so later menu edits
/// can never reach back into history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: String,
    pub name: String,
    /// Dish base price plus accompaniment surcharges, before VAT.
    #[ts(type = "number")]
    pub base_price: Money,
    /// VAT on one unit, unrounded.
    #[ts(type = "number")]
    pub vat_amount: Money,
    /// One unit including VAT, rounded to whole shillings.
    #[ts(type = "number")]
    pub total_price: Money,
    /// Always ≥ 1 inside an order; a line reaching 0 is removed.
    pub quantity: u32,
    pub accompaniments: Vec<Accompaniment>,
}

impl SaleItem {
    /// `base_price × quantity`.
    pub fn line_subtotal(&self) -> Money {
        self.base_price * self.quantity
    }

    /// `vat_amount × quantity`.
    pub fn line_vat(&self) -> Money {
        self.vat_amount * self.quantity
    }

    /// `total_price × quantity`, the figure printed next to the line.
    pub fn line_total(&self) -> Money {
        self.total_price * self.quantity
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A completed sale. Created once at checkout, never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub items: Vec<SaleItem>,
    #[ts(type = "number")]
    pub subtotal: Money,
    #[ts(type = "number")]
    pub vat_total: Money,
    /// `subtotal + vat_total`.
    #[ts(type = "number")]
    pub total: Money,
    pub payment_method: PaymentMethod,
    #[ts(type = "number")]
    pub amount_paid: Money,
    /// `max(0, amount_paid - total)`.
    #[ts(type = "number")]
    pub change: Money,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

impl Sale {
    pub fn from_new(id: String, new: NewSale) -> Self {
        Sale {
            id,
            items: new.items,
            subtotal: new.subtotal,
            vat_total: new.vat_total,
            total: new.total,
            payment_method: new.payment_method,
            amount_paid: new.amount_paid,
            change: new.change,
            timestamp: new.timestamp,
        }
    }

    /// Number of units sold across all lines.
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

/// Creation payload for [`Sale`], produced by [`crate::order::Order::checkout`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub items: Vec<SaleItem>,
    #[ts(type = "number")]
    pub subtotal: Money,
    #[ts(type = "number")]
    pub vat_total: Money,
    #[ts(type = "number")]
    pub total: Money,
    pub payment_method: PaymentMethod,
    #[ts(type = "number")]
    pub amount_paid: Money,
    #[ts(type = "number")]
    pub change: Money,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// Expenses
// =============================================================================

/// Approval state of an expense claim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

/// Money spent running the restaurant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub description: String,
    /// Always positive.
    #[ts(type = "number")]
    pub amount: Money,
    /// Name of an existing [`ExpenseCategory`].
    pub category: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
    /// Receipt number or file reference.
    pub receipt: Option<String>,
    /// User id of whoever logged it.
    pub added_by: String,
    pub approval_status: ApprovalStatus,
}

impl Expense {
    pub fn from_new(id: String, new: NewExpense) -> Self {
        Expense {
            id,
            description: new.description,
            amount: new.amount,
            category: new.category,
            date: new.date,
            payment_method: new.payment_method,
            receipt: new.receipt,
            added_by: new.added_by,
            approval_status: new.approval_status,
        }
    }
}

/// Creation payload for [`Expense`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub description: String,
    #[ts(type = "number")]
    pub amount: Money,
    pub category: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub receipt: Option<String>,
    pub added_by: String,
    #[serde(default)]
    pub approval_status: ApprovalStatus,
}

/// Partial update for [`Expense`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpensePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    /// `Some(None)` clears the receipt reference.
    #[serde(
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[ts(as = "Option<String>")]
    pub receipt: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_status: Option<ApprovalStatus>,
}

impl ExpensePatch {
    pub fn apply_to(self, expense: &mut Expense) {
        if let Some(description) = self.description {
            expense.description = description;
        }
        if let Some(amount) = self.amount {
            expense.amount = amount;
        }
        if let Some(category) = self.category {
            expense.category = category;
        }
        if let Some(date) = self.date {
            expense.date = date;
        }
        if let Some(payment_method) = self.payment_method {
            expense.payment_method = payment_method;
        }
        if let Some(receipt) = self.receipt {
            expense.receipt = receipt;
        }
        if let Some(approval_status) = self.approval_status {
            expense.approval_status = approval_status;
        }
    }
}

/// A budget bucket for expenses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategory {
    pub id: String,
    /// Unique (case-insensitive).
    pub name: String,
    /// Spending ceiling.
    #[ts(type = "number")]
    pub budget: Money,
    /// Display hint only.
    pub color: String,
}

impl ExpenseCategory {
    pub fn from_new(id: String, new: NewExpenseCategory) -> Self {
        ExpenseCategory {
            id,
            name: new.name,
            budget: new.budget,
            color: new.color,
        }
    }

    /// Case-insensitive name comparison used for uniqueness and lookups.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.trim().eq_ignore_ascii_case(name.trim())
    }
}

/// Creation payload for [`ExpenseCategory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewExpenseCategory {
    pub name: String,
    #[ts(type = "number")]
    pub budget: Money,
    #[serde(default)]
    pub color: String,
}

/// Partial update for [`ExpenseCategory`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseCategoryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[ts(type = "number | null")]
    pub budget: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ExpenseCategoryPatch {
    pub fn apply_to(self, category: &mut ExpenseCategory) {
        if let Some(name) = self.name {
            category.name = name;
        }
        if let Some(budget) = self.budget {
            category.budget = budget;
        }
        if let Some(color) = self.color {
            category.color = color;
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
