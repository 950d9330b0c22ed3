//! # Accompaniment Selection
//!
//! State machine for configuring one dish before it goes into the order.
//!
//! ## States and Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   open(item) ─► every required side pre-selected                        │
//! │        │                                                                │
//! │        ▼                                                                │
//! │   ┌─────────┐  toggle(optional)          → add / remove freely          │
//! │   │ editing │  toggle(required, off)     → select                       │
//! │   │         │  toggle(required, on)      → deselect only if another     │
//! │   └────┬────┘                              required side stays on,      │
//! │        │                                   otherwise Rejected           │
//! │        ├── confirm() ─► Vec<Accompaniment> (menu order)                 │
//! │        └── cancel()  ─► nothing                                         │
//! │                                                                         │
//! │   Invariant: no required sides, or at least one of them selected.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use jiko_core::accompaniment::{AccompanimentSelection, Toggle};
//! use jiko_core::money::Money;
//! use jiko_core::types::{Accompaniment, MenuItem, NewMenuItem};
//!
//! let rice = Accompaniment::new("Rice", Money::zero(), true);
//! let ugali = Accompaniment::new("Ugali", Money::zero(), true);
//! let item = MenuItem::from_new(
//!     1,
//!     NewMenuItem::new("Beef Stew", Money::from_major(400), "Mains")
//!         .with_accompaniment(rice.clone())
//!         .with_accompaniment(ugali.clone()),
//! );
//!
//! let mut selection = AccompanimentSelection::open(&item);
//! assert_eq!(selection.toggle(&rice.id), Toggle::Deselected);
//! assert_eq!(selection.toggle(&ugali.id), Toggle::Rejected);
//! assert!(selection.is_selected(&ugali.id));
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Accompaniment, MenuItem};

/// Outcome of [`AccompanimentSelection::toggle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Toggle {
    Selected,
    Deselected,
    /// Would have left no required side selected. State unchanged.
    Rejected,
    /// The dish offers no accompaniment with that id. State unchanged.
    Unknown,
}

/// One item-configuration session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccompanimentSelection {
    menu_item_id: i64,
    item_name: String,
    options: Vec<Accompaniment>,
    selected: BTreeSet<String>,
}

impl AccompanimentSelection {
    /// Starts a session with every required accompaniment selected.
    pub fn open(menu_item: &MenuItem) -> Self {
        let selected = menu_item
            .required_accompaniments()
            .map(|a| a.id.clone())
            .collect();

        AccompanimentSelection {
            menu_item_id: menu_item.id,
            item_name: menu_item.name.clone(),
            options: menu_item.accompaniments.clone(),
            selected,
        }
    }

    pub fn menu_item_id(&self) -> i64 {
        self.menu_item_id
    }

    /// All accompaniments the dish offers, in menu order.
    pub fn options(&self) -> &[Accompaniment] {
        &self.options
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Flips one accompaniment.
    pub fn toggle(&mut self, id: &str) -> Toggle {
        let Some(option) = self.options.iter().find(|a| a.id == id) else {
            return Toggle::Unknown;
        };

        if !self.selected.contains(id) {
            self.selected.insert(id.to_string());
            return Toggle::Selected;
        }

        if option.required {
            let others = self
                .options
                .iter()
                .filter(|a| a.required && a.id != id && self.selected.contains(&a.id))
                .count();
            if others == 0 {
                return Toggle::Rejected;
            }
        }

        self.selected.remove(id);
        Toggle::Deselected
    }

    /// No required accompaniments, or at least one of them selected.
    pub fn is_valid(&self) -> bool {
        let mut required = self.options.iter().filter(|a| a.required).peekable();
        required.peek().is_none() || required.any(|a| self.selected.contains(&a.id))
    }

    /// Currently selected accompaniments in menu order.
    pub fn selected(&self) -> Vec<&Accompaniment> {
        self.options
            .iter()
            .filter(|a| self.selected.contains(&a.id))
            .collect()
    }

    /// Ends the session and hands back the chosen accompaniments.
    pub fn confirm(self) -> CoreResult<Vec<Accompaniment>> {
        if !self.is_valid() {
            return Err(CoreError::RequiredAccompanimentMissing {
                item: self.item_name,
            });
        }

        let selected = self.selected;
        Ok(self
            .options
            .into_iter()
            .filter(|a| selected.contains(&a.id))
            .collect())
    }

    /// Ends the session without producing anything.
    pub fn cancel(self) {}
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::NewMenuItem;

    fn stew() -> MenuItem {
        MenuItem::from_new(
            7,
            NewMenuItem::new("Beef Stew", Money::from_major(400), "Mains")
                .with_accompaniment(Accompaniment::new("Rice", Money::from_major(50), true))
                .with_accompaniment(Accompaniment::new("Ugali", Money::from_major(30), true))
                .with_accompaniment(Accompaniment::new("Kachumbari", Money::from_major(40), false)),
        )
    }

    fn ids(item: &MenuItem) -> (String, String, String) {
        (
            item.accompaniments[0].id.clone(),
            item.accompaniments[1].id.clone(),
            item.accompaniments[2].id.clone(),
        )
    }

    #[test]
    fn test_open_selects_required() {
        let item = stew();
        let (rice, ugali, kachumbari) = ids(&item);
        let selection = AccompanimentSelection::open(&item);

        assert!(selection.is_selected(&rice));
        assert!(selection.is_selected(&ugali));
        assert!(!selection.is_selected(&kachumbari));
        assert!(selection.is_valid());
        assert_eq!(selection.menu_item_id(), 7);
    }

    #[test]
    fn test_last_required_cannot_be_deselected() {
        let item = stew();
        let (rice, ugali, _) = ids(&item);
        let mut selection = AccompanimentSelection::open(&item);

        assert_eq!(selection.toggle(&rice), Toggle::Deselected);
        assert_eq!(selection.toggle(&ugali), Toggle::Rejected);

        let names: Vec<&str> = selection.selected().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Ugali"]);
        assert!(selection.is_valid());
    }

    #[test]
    fn test_required_can_be_reselected() {
        let item = stew();
        let (rice, _, _) = ids(&item);
        let mut selection = AccompanimentSelection::open(&item);

        selection.toggle(&rice);
        assert_eq!(selection.toggle(&rice), Toggle::Selected);
        assert_eq!(selection.selected().len(), 2);
    }

    #[test]
    fn test_optional_toggles_freely() {
        let item = stew();
        let (_, _, kachumbari) = ids(&item);
        let mut selection = AccompanimentSelection::open(&item);

        assert_eq!(selection.toggle(&kachumbari), Toggle::Selected);
        assert_eq!(selection.toggle(&kachumbari), Toggle::Deselected);
        assert_eq!(selection.toggle(&kachumbari), Toggle::Selected);
    }

    #[test]
    fn test_unknown_id() {
        let mut selection = AccompanimentSelection::open(&stew());
        assert_eq!(selection.toggle("chapati"), Toggle::Unknown);
        assert_eq!(selection.selected().len(), 2);
    }

    #[test]
    fn test_invariant_holds_under_any_toggle_sequence() {
        let item = stew();
        let (rice, ugali, kachumbari) = ids(&item);
        let mut selection = AccompanimentSelection::open(&item);

        let sequence = [&rice, &ugali, &kachumbari, &ugali, &rice, &ugali, &rice, &rice];
        for id in sequence {
            selection.toggle(id);
            assert!(selection.is_valid());
        }
    }

    #[test]
    fn test_confirm_returns_menu_order() {
        let item = stew();
        let (rice, _, kachumbari) = ids(&item);
        let mut selection = AccompanimentSelection::open(&item);
        selection.toggle(&kachumbari);
        selection.toggle(&rice);

        let chosen = selection.confirm().unwrap();
        let names: Vec<&str> = chosen.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Ugali", "Kachumbari"]);
    }

    #[test]
    fn test_no_required_sides_is_vacuously_valid() {
        let item = MenuItem::from_new(
            3,
            NewMenuItem::new("Chai", Money::from_major(60), "Drinks").with_accompaniment(
                Accompaniment::new("Mandazi", Money::from_major(20), false),
            ),
        );
        let selection = AccompanimentSelection::open(&item);
        assert!(selection.is_valid());
        assert!(selection.confirm().unwrap().is_empty());
    }

    #[test]
    fn test_cancel_consumes_session() {
        let selection = AccompanimentSelection::open(&stew());
        selection.cancel();
    }
}
