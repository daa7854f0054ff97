//! Which side of the marketplace the session is acting as.
//!
//! The stored preference always wins. A user's role only seeds the
//! preference when none has been stored yet, and navigation never changes it.

#[cfg(test)]
#[path = "account_test.rs"]
mod account_test;

use leptos::logging::{log, warn};
use serde::{Deserialize, Serialize};

use super::auth::UserRecord;
use crate::store::session::SessionStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Customer posting jobs.
    #[default]
    User,
    /// Worker listing skills and applying to jobs.
    Worker,
}

impl AccountType {
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "user" => Some(Self::User),
            "worker" => Some(Self::Worker),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Worker => "worker",
        }
    }

    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::User => Self::Worker,
            Self::Worker => Self::User,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "Customer",
            Self::Worker => "Worker",
        }
    }
}

#[derive(Clone, Debug)]
pub struct AccountTypeState {
    store: SessionStore,
    current: AccountType,
}

impl AccountTypeState {
    /// Stored preference, else the user's role, else [`AccountType::User`].
    #[must_use]
    pub fn init(store: SessionStore, user: Option<&UserRecord>) -> Self {
        let current = store
            .account_type()
            .or_else(|| user.and_then(|u| u.role))
            .unwrap_or_default();
        Self { store, current }
    }

    #[must_use]
    pub fn current(&self) -> AccountType {
        self.current
    }

    /// Explicit switch from the account toggle.
    pub fn set_account_type(&mut self, account_type: AccountType) {
        self.current = account_type;
        if let Err(e) = self.store.set_account_type(account_type) {
            warn!("account: preference not persisted: {e}");
        }
        log!("account: switched to {}", account_type.as_str());
    }

    /// React to login/logout.
    ///
    /// Seeds and persists the new user's role only while no preference is
    /// stored, so this takes effect at most once per store.
    pub fn on_user_changed(&mut self, user: Option<&UserRecord>) {
        if self.store.account_type().is_some() {
            return;
        }
        let Some(role) = user.and_then(|u| u.role) else {
            return;
        };
        self.current = role;
        if let Err(e) = self.store.set_account_type(role) {
            warn!("account: seeded preference not persisted: {e}");
        }
        log!("account: seeded from role {}", role.as_str());
    }

    #[must_use]
    pub fn dispose(self) -> SessionStore {
        self.store
    }
}
