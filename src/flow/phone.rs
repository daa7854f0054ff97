//! Phone-number input model.

#[cfg(test)]
#[path = "phone_test.rs"]
mod phone_test;

use std::fmt;

use crate::error::AuthError;

pub const PHONE_LEN: usize = 10;

/// Keep digits only, capped at [`PHONE_LEN`].
#[must_use]
pub fn sanitize_phone_input(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(PHONE_LEN).collect()
}

/// A validated 10-digit phone number.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] unless `raw` is exactly ten digits.
    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        if raw.len() == PHONE_LEN && raw.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(AuthError::Validation("Enter a valid 10-digit phone number".to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last four digits, for logs.
    #[must_use]
    pub fn masked(&self) -> String {
        format!("******{}", &self.0[PHONE_LEN - 4..])
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
