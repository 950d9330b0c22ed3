//! # Error Types
//!
//! Domain-specific error types for jiko-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  jiko-core errors (this file)                                          │
//! │  ├── CoreError        - Order, accompaniment and access rule failures  │
//! │  └── ValidationError  - Boundary input failures                        │
//! │                                                                         │
//! │  jiko-db errors (separate crate)                                       │
//! │  └── DbError          - Storage and collection failures                │
//! │                                                                         │
//! │  Back-office errors (in app)                                           │
//! │  └── ApiError         - What a panel sees (serialized)                 │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError ─┐                                   │
//! │                          DbError ───┴─► ApiError → Panel               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by the order engine, the accompaniment
/// state machine and the access policy.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The menu item is switched off and cannot be ordered.
    #[error("{name} is not available")]
    MenuItemUnavailable { name: String },

    /// The dish has a required accompaniment group and none was picked.
    ///
    /// ## User Workflow
    /// ```text
    /// Open "Beef Stew"  (required: Rice, Ugali)
    ///      │
    ///      ▼
    /// Confirm with no starch selected
    ///      │
    ///      ▼
    /// RequiredAccompanimentMissing { item: "Beef Stew" }
    ///      │
    ///      ▼
    /// Panel shows: "Beef Stew needs at least one of its required sides"
    /// ```
    #[error("{item} needs at least one of its required sides")]
    RequiredAccompanimentMissing { item: String },

    /// An accompaniment id that is not offered by the dish.
    #[error("{item} has no accompaniment {id}")]
    UnknownAccompaniment { item: String, id: String },

    /// No order line carries this id.
    #[error("Order line not found: {0}")]
    OrderLineNotFound(String),

    /// Order has reached the maximum number of lines.
    #[error("Order cannot have more than {max} lines")]
    OrderTooLarge { max: usize },

    /// Line quantity would exceed the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: u32 },

    /// Checkout was attempted with no lines.
    #[error("Cannot complete a sale with no items")]
    EmptyOrder,

    /// The tendered amount does not cover the total.
    #[error("Amount paid {paid} is less than the total {total}")]
    Underpayment { total: Money, paid: Money },

    /// Payment amount is invalid.
    #[error("Invalid payment amount: {reason}")]
    InvalidPaymentAmount { reason: String },

    /// Role is not allowed to open the panel.
    #[error("{role} cannot open the {panel} panel")]
    AccessDenied { role: String, panel: String },

    /// A panel tag that names no panel.
    #[error("Unknown panel: {0}")]
    UnknownPanel(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised at the boundary, before any value reaches the pricing functions.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
    },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    MustBeNonNegative { field: String },

    /// Text or float that is not a finite number.
    #[error("{field} is not a valid number")]
    NotANumber { field: String },

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., duplicate category name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
