//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards, the navbar, and the OTP flow. Restoration on startup
//! is trust-on-read: the persisted record is not revalidated with the server.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::logging::{log, warn};
use serde::{Deserialize, Serialize};

use super::account::AccountType;
use crate::store::session::SessionStore;

pub const DEFAULT_USER_NAME: &str = "User";

/// Identifier of a logged-in user.
///
/// `Provisional` holds the phone number when the verify response carried no
/// id. It is kept distinct so code expecting an opaque server id can refuse
/// it instead of leaking the phone number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum UserId {
    Server(String),
    Provisional(String),
}

impl UserId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Server(id) | Self::Provisional(id) => id,
        }
    }

    #[must_use]
    pub fn is_provisional(&self) -> bool {
        matches!(self, Self::Provisional(_))
    }

    /// The server-issued id, if there is one.
    #[must_use]
    pub fn server_id(&self) -> Option<&str> {
        match self {
            Self::Server(id) => Some(id),
            Self::Provisional(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub phone: String,
    pub name: String,
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<AccountType>,
    /// RFC 3339, set client-side at login.
    pub created_at: String,
    pub updated_at: String,
}

/// Snapshot of the current session, cheap to clone into views.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<UserRecord>,
}

impl AuthState {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Session service with an `init` / `dispose` lifecycle.
#[derive(Clone, Debug)]
pub struct AuthSession {
    store: SessionStore,
    state: AuthState,
}

impl AuthSession {
    /// Restore whatever session the store holds.
    #[must_use]
    pub fn init(store: SessionStore) -> Self {
        let user = store.load_session();
        if let Some(user) = &user {
            log!("auth: restored session for user {}", user.id.as_str());
        }
        Self { store, state: AuthState { user } }
    }

    #[must_use]
    pub fn state(&self) -> &AuthState {
        &self.state
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    #[must_use]
    pub fn user(&self) -> Option<&UserRecord> {
        self.state.user.as_ref()
    }

    #[must_use]
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Mark `user` as logged in and persist it. Calling again overwrites.
    pub fn login(&mut self, user: UserRecord) {
        if let Err(e) = self.store.save_session(&user) {
            warn!("auth: session not persisted: {e}");
        }
        log!("auth: logged in user {}", user.id.as_str());
        self.state.user = Some(user);
    }

    /// Forget the user in memory and in storage.
    pub fn logout(&mut self) {
        self.store.clear_session();
        if self.state.user.take().is_some() {
            log!("auth: logged out");
        }
    }

    /// Profile edit: rename the current user and write it through.
    ///
    /// Returns `false` when nobody is logged in or the name is blank.
    pub fn update_name(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let Some(mut user) = self.state.user.clone() else {
            return false;
        };
        user.name = name.to_owned();
        user.updated_at = crate::util::time::now_rfc3339();
        if let Err(e) = self.store.set_user_name(&user.name) {
            warn!("auth: user name not persisted: {e}");
        }
        self.persist_user(user);
        true
    }

    /// Swap in a refreshed record for the same session.
    ///
    /// Ignored when logged out; refreshing never logs anyone in.
    pub fn replace_user(&mut self, user: UserRecord) {
        if self.state.user.is_none() {
            return;
        }
        if let Err(e) = self.store.set_user_name(&user.name) {
            warn!("auth: user name not persisted: {e}");
        }
        self.persist_user(user);
    }

    /// End the service lifecycle, handing back the store.
    #[must_use]
    pub fn dispose(self) -> SessionStore {
        self.store
    }

    fn persist_user(&mut self, user: UserRecord) {
        if let Err(e) = self.store.save_session(&user) {
            warn!("auth: session not persisted: {e}");
        }
        self.state.user = Some(user);
    }
}
