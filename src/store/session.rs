//! Typed session keys over a [`KeyValueStore`].
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthSession`, `AccountTypeState`, and the OTP controller all write here.
//! Keys are plain strings with no schema version; values other than the user
//! record are stored raw.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::logging::warn;

use super::kv::{SharedStore, StorageError};
use crate::state::account::AccountType;
use crate::state::auth::UserRecord;

pub const KEY_IS_AUTHENTICATED: &str = "isAuthenticated";
pub const KEY_USER: &str = "user";
pub const KEY_USER_PHONE: &str = "userPhone";
pub const KEY_USER_NAME: &str = "userName";
pub const KEY_USER_ID: &str = "userId";
pub const KEY_AUTH_TOKEN: &str = "authToken";
pub const KEY_LANGUAGE: &str = "language";
pub const KEY_ACCOUNT_TYPE: &str = "accountType";

pub const DEFAULT_LANGUAGE: &str = "en";

/// Every key owned by a login session; logout removes all of them.
const SESSION_KEYS: [&str; 6] = [
    KEY_IS_AUTHENTICATED,
    KEY_USER,
    KEY_USER_PHONE,
    KEY_USER_NAME,
    KEY_USER_ID,
    KEY_AUTH_TOKEN,
];

/// Fields written when the server confirms an OTP.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedIdentity<'a> {
    pub user_id: &'a str,
    pub phone: &'a str,
    pub name: &'a str,
    pub token: Option<&'a str>,
}

#[derive(Clone)]
pub struct SessionStore {
    kv: SharedStore,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new(kv: SharedStore) -> Self {
        Self { kv }
    }

    /// Read the persisted session.
    ///
    /// Returns the user only when the flag is `"true"` and the record parses.
    /// Any other combination is a desynchronized session; it is cleared so it
    /// cannot survive another reload.
    #[must_use]
    pub fn load_session(&self) -> Option<UserRecord> {
        let flag = self.kv.get(KEY_IS_AUTHENTICATED);
        let raw_user = self.kv.get(KEY_USER);
        if flag.is_none() && raw_user.is_none() {
            return None;
        }

        let user = raw_user.as_deref().and_then(|raw| serde_json::from_str::<UserRecord>(raw).ok());
        match (flag.as_deref(), user) {
            (Some("true"), Some(user)) => Some(user),
            _ => {
                warn!("session: discarding desynchronized persisted session");
                self.kv.remove(KEY_IS_AUTHENTICATED);
                self.kv.remove(KEY_USER);
                None
            }
        }
    }

    /// Persist the authenticated flag and the user record together.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if either write fails; a partial write is
    /// rolled back so the pair never disagrees.
    pub fn save_session(&self, user: &UserRecord) -> Result<(), StorageError> {
        let raw = serde_json::to_string(user).map_err(|_| StorageError::WriteFailed { key: KEY_USER.to_owned() })?;
        let written = self
            .kv
            .set(KEY_USER, &raw)
            .and_then(|()| self.kv.set(KEY_IS_AUTHENTICATED, "true"));
        if written.is_err() {
            self.kv.remove(KEY_USER);
            self.kv.remove(KEY_IS_AUTHENTICATED);
        }
        written
    }

    pub fn clear_session(&self) {
        for key in SESSION_KEYS {
            self.kv.remove(key);
        }
    }

    #[must_use]
    pub fn phone(&self) -> Option<String> {
        self.kv.get(KEY_USER_PHONE).filter(|p| !p.is_empty())
    }

    /// Record the phone number of an in-progress login.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the write fails.
    pub fn set_phone(&self, phone: &str) -> Result<(), StorageError> {
        self.kv.set(KEY_USER_PHONE, phone)
    }

    /// Write the identity fields returned by a successful verification.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when any write fails.
    pub fn save_identity(&self, identity: &VerifiedIdentity<'_>) -> Result<(), StorageError> {
        self.kv.set(KEY_USER_ID, identity.user_id)?;
        self.kv.set(KEY_USER_PHONE, identity.phone)?;
        self.kv.set(KEY_USER_NAME, identity.name)?;
        match identity.token {
            Some(token) => self.kv.set(KEY_AUTH_TOKEN, token)?,
            None => self.kv.remove(KEY_AUTH_TOKEN),
        }
        Ok(())
    }

    #[must_use]
    pub fn user_id(&self) -> Option<String> {
        self.kv.get(KEY_USER_ID)
    }

    #[must_use]
    pub fn user_name(&self) -> Option<String> {
        self.kv.get(KEY_USER_NAME)
    }

    /// # Errors
    ///
    /// Returns [`StorageError`] when the write fails.
    pub fn set_user_name(&self, name: &str) -> Result<(), StorageError> {
        self.kv.set(KEY_USER_NAME, name)
    }

    #[must_use]
    pub fn auth_token(&self) -> Option<String> {
        self.kv.get(KEY_AUTH_TOKEN)
    }

    #[must_use]
    pub fn language(&self) -> String {
        self.kv
            .get(KEY_LANGUAGE)
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned())
    }

    /// # Errors
    ///
    /// Returns [`StorageError`] when the write fails.
    pub fn set_language(&self, language: &str) -> Result<(), StorageError> {
        self.kv.set(KEY_LANGUAGE, language.trim())
    }

    /// Stored account-type preference; unknown values read as absent.
    #[must_use]
    pub fn account_type(&self) -> Option<AccountType> {
        self.kv.get(KEY_ACCOUNT_TYPE).and_then(|raw| AccountType::parse(&raw))
    }

    /// # Errors
    ///
    /// Returns [`StorageError`] when the write fails.
    pub fn set_account_type(&self, account_type: AccountType) -> Result<(), StorageError> {
        self.kv.set(KEY_ACCOUNT_TYPE, account_type.as_str())
    }
}
