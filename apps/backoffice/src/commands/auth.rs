//! # Auth Commands
//!
//! Credential checks belong to an external backend. The back office only
//! asks it through [`Authenticator`] and remembers who came back.

use async_trait::async_trait;
use tracing::{debug, warn};

use jiko_core::User;

use crate::error::ApiError;
use crate::state::{OrderState, SessionState};

/// The auth backend.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// The user for these credentials, or `ApiError` with code
    /// `UNAUTHORIZED` when they are refused.
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, ApiError>;
}

pub async fn login(
    auth: &dyn Authenticator,
    session: &SessionState,
    username: &str,
    password: &str,
) -> Result<User, ApiError> {
    debug!(username, "login command");
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(ApiError::validation("Username and password are required"));
    }

    let user = match auth.authenticate(username, password).await {
        Ok(user) => user,
        Err(e) => {
            warn!(username, code = ?e.code, "Sign-in refused");
            return Err(e);
        }
    };

    session.sign_in(user.clone());
    Ok(user)
}

/// Ends the session. An order in progress at this terminal is discarded.
pub fn logout(session: &SessionState, order: &OrderState) {
    debug!("logout command");
    session.sign_out();
    order.with_till_mut(|till| {
        till.order.clear();
        till.pending = None;
    });
}

pub fn current_user(session: &SessionState) -> Option<User> {
    session.current()
}
