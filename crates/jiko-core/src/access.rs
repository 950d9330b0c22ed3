//! # Access Policy
//!
//! Which role may open which back-office panel.
//!
//! ## Policy Table
//! ```text
//! ┌─────────────┬───────────┬───────┬──────┬───────────┬──────────┬─────────┬───────┬──────────┐
//! │             │ Dashboard │ Sales │ Menu │ Inventory │ Expenses │ Reports │ Users │ Settings │
//! ├─────────────┼───────────┼───────┼──────┼───────────┼──────────┼─────────┼───────┼──────────┤
//! │ staff       │     ✓     │   ✓   │      │           │          │         │       │          │
//! │ manager     │     ✓     │   ✓   │  ✓   │     ✓     │    ✓     │    ✓    │       │          │
//! │ admin       │     ✓     │   ✓   │  ✓   │     ✓     │    ✓     │    ✓    │   ✓   │    ✓     │
//! └─────────────┴───────────┴───────┴──────┴───────────┴──────────┴─────────┴───────┴──────────┘
//! ```
//!
//! The table lives in [`allowed_panels`] and nowhere else. Routing parses the
//! `tab` tag into a [`Panel`] and asks [`authorize`] once.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// A signed-in user's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Staff,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Staff => "staff",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A back-office screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Dashboard,
    Sales,
    Menu,
    Inventory,
    Expenses,
    Reports,
    Users,
    Settings,
}

impl Panel {
    pub const ALL: [Panel; 8] = [
        Panel::Dashboard,
        Panel::Sales,
        Panel::Menu,
        Panel::Inventory,
        Panel::Expenses,
        Panel::Reports,
        Panel::Users,
        Panel::Settings,
    ];

    /// The `tab` tag for this panel.
    pub fn tag(&self) -> &'static str {
        match self {
            Panel::Dashboard => "dashboard",
            Panel::Sales => "sales",
            Panel::Menu => "menu",
            Panel::Inventory => "inventory",
            Panel::Expenses => "expenses",
            Panel::Reports => "reports",
            Panel::Users => "users",
            Panel::Settings => "settings",
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Panel {
    type Err = CoreError;

    /// Parses a `tab` tag. Case and surrounding whitespace are ignored; an
    /// empty tag is the dashboard.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let tag = tag.trim().to_ascii_lowercase();
        if tag.is_empty() {
            return Ok(Panel::Dashboard);
        }

        Panel::ALL
            .into_iter()
            .find(|p| p.tag() == tag)
            .ok_or(CoreError::UnknownPanel(tag))
    }
}

/// Panels each role may open.
pub fn allowed_panels(role: Role) -> &'static [Panel] {
    const STAFF: &[Panel] = &[Panel::Dashboard, Panel::Sales];
    const MANAGER: &[Panel] = &[
        Panel::Dashboard,
        Panel::Sales,
        Panel::Menu,
        Panel::Inventory,
        Panel::Expenses,
        Panel::Reports,
    ];

    match role {
        Role::Staff => STAFF,
        Role::Manager => MANAGER,
        Role::Admin => &Panel::ALL,
    }
}

pub fn can_access(role: Role, panel: Panel) -> bool {
    allowed_panels(role).contains(&panel)
}

/// Resolves a `tab` tag for a role, or explains why it cannot be opened.
pub fn authorize(role: Role, tag: &str) -> CoreResult<Panel> {
    let panel = Panel::from_str(tag)?;
    if !can_access(role, panel) {
        return Err(CoreError::AccessDenied {
            role: role.to_string(),
            panel: panel.to_string(),
        });
    }
    Ok(panel)
}

/// The signed-in user, as returned by the auth backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub role: Role,
}

impl User {
    pub fn can_access(&self, panel: Panel) -> bool {
        can_access(self.role, panel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_panels() {
        assert!(can_access(Role::Staff, Panel::Dashboard));
        assert!(can_access(Role::Staff, Panel::Sales));
        assert!(!can_access(Role::Staff, Panel::Inventory));
        assert!(!can_access(Role::Staff, Panel::Settings));
    }

    #[test]
    fn test_manager_panels() {
        assert!(can_access(Role::Manager, Panel::Reports));
        assert!(can_access(Role::Manager, Panel::Expenses));
        assert!(!can_access(Role::Manager, Panel::Users));
    }

    #[test]
    fn test_admin_sees_everything() {
        for panel in Panel::ALL {
            assert!(can_access(Role::Admin, panel));
        }
    }

    #[test]
    fn test_parse_tab_tag() {
        assert_eq!("Inventory".parse::<Panel>().unwrap(), Panel::Inventory);
        assert_eq!("".parse::<Panel>().unwrap(), Panel::Dashboard);
        assert!(matches!(
            "kitchen".parse::<Panel>(),
            Err(CoreError::UnknownPanel(_))
        ));
    }

    #[test]
    fn test_authorize() {
        assert_eq!(authorize(Role::Manager, "menu").unwrap(), Panel::Menu);

        let err = authorize(Role::Staff, "expenses").unwrap_err();
        assert_eq!(err.to_string(), "staff cannot open the expenses panel");
    }

    #[test]
    fn test_role_serialization() {
        let user: User =
            serde_json::from_str(r#"{"id":"3","username":"wanjiku","role":"manager"}"#).unwrap();
        assert_eq!(user.role, Role::Manager);
        assert!(user.can_access(Panel::Inventory));
    }
}
