//! # Session State
//!
//! The user signed in at this terminal, as handed back by the auth backend.
//! Panel gating reads the role from here.

use std::sync::{Arc, RwLock};

use tracing::info;

use jiko_core::User;

use crate::error::ApiError;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    user: Arc<RwLock<Option<User>>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, user: User) {
        info!(username = %user.username, role = %user.role, "Signed in");
        let mut slot = self.user.write().unwrap_or_else(|p| p.into_inner());
        *slot = Some(user);
    }

    /// Clears the session and returns who was signed in.
    pub fn sign_out(&self) -> Option<User> {
        let mut slot = self.user.write().unwrap_or_else(|p| p.into_inner());
        let previous = slot.take();
        if let Some(user) = &previous {
            info!(username = %user.username, "Signed out");
        }
        previous
    }

    pub fn current(&self) -> Option<User> {
        self.user.read().unwrap_or_else(|p| p.into_inner()).clone()
    }

    /// The signed-in user, or `Unauthorized`.
    pub fn require_user(&self) -> Result<User, ApiError> {
        self.current()
            .ok_or_else(|| ApiError::unauthorized("Sign in to continue"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use jiko_core::Role;

    #[test]
    fn test_sign_in_and_out() {
        let session = SessionState::new();
        assert_eq!(
            session.require_user().unwrap_err().code,
            ErrorCode::Unauthorized
        );

        session.sign_in(User {
            id: "7".to_string(),
            username: "wanjiru".to_string(),
            role: Role::Manager,
        });
        assert_eq!(session.require_user().unwrap().role, Role::Manager);

        let previous = session.sign_out().unwrap();
        assert_eq!(previous.username, "wanjiru");
        assert!(session.current().is_none());
    }
}
