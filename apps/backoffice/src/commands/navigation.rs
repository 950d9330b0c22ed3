//! # Navigation Commands
//!
//! The one place panel access is checked. The panel router asks here before
//! it renders anything.

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use jiko_core::access::{allowed_panels, authorize};
use jiko_core::Panel;

use crate::error::ApiError;
use crate::state::SessionState;

#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NavigationView {
    pub active: Panel,
    /// Panels shown in the sidebar for the signed-in role.
    pub panels: Vec<Panel>,
}

/// Resolves the `tab` tag for the signed-in user.
///
/// ## Errors
/// - `UNAUTHORIZED` with nobody signed in
/// - `NOT_FOUND` for a tag that names no panel
/// - `FORBIDDEN` when the role may not open it
pub fn open_panel(session: &SessionState, tab: &str) -> Result<NavigationView, ApiError> {
    debug!(tab, "open_panel command");
    let user = session.require_user()?;
    let active = authorize(user.role, tab)?;

    Ok(NavigationView {
        active,
        panels: allowed_panels(user.role).to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::testing;
    use jiko_core::Role;

    #[test]
    fn test_staff_navigation() {
        let session = testing::session(Role::Staff);

        let view = open_panel(&session, "").unwrap();
        assert_eq!(view.active, Panel::Dashboard);
        assert_eq!(view.panels, vec![Panel::Dashboard, Panel::Sales]);

        assert_eq!(open_panel(&session, " Sales ").unwrap().active, Panel::Sales);
        assert_eq!(
            open_panel(&session, "inventory").unwrap_err().code,
            ErrorCode::Forbidden
        );
    }

    #[test]
    fn test_admin_sees_everything() {
        let session = testing::session(Role::Admin);
        let view = open_panel(&session, "users").unwrap();
        assert_eq!(view.panels.len(), Panel::ALL.len());
    }

    #[test]
    fn test_unknown_tab_and_no_session() {
        let session = testing::session(Role::Manager);
        assert_eq!(
            open_panel(&session, "payroll").unwrap_err().code,
            ErrorCode::NotFound
        );

        session.sign_out();
        assert_eq!(
            open_panel(&session, "dashboard").unwrap_err().code,
            ErrorCode::Unauthorized
        );
    }
}
