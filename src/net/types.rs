//! Wire DTOs for the auth endpoints.
//!
//! DESIGN
//! ======
//! Response types are lenient: every field except `success` is optional and
//! ids may arrive as strings or integers under `id` or `_id`. The client only
//! relies on what it reads, since the server contract is external.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// `POST /users/register` body; issues an OTP to `phone`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub phone: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerifyOtpRequest {
    pub phone: String,
    pub otp: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResendOtpRequest {
    pub phone: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SendOtpResponse {
    #[serde(default)]
    pub success: bool,
    /// Echoed code, only present on development servers.
    #[serde(default)]
    pub otp: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct AckResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct VerifyOtpResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<RemoteUser>,
    #[serde(default)]
    pub token: Option<String>,
}

impl VerifyOtpResponse {
    /// Token from the user object, else the top-level one.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.user
            .as_ref()
            .and_then(|u| u.token.as_deref())
            .or(self.token.as_deref())
            .filter(|t| !t.is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct FetchUserResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<RemoteUser>,
}

/// User object as returned by the server.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteUser {
    #[serde(default, deserialize_with = "deserialize_opt_id")]
    pub id: Option<String>,
    #[serde(default, rename = "_id", deserialize_with = "deserialize_opt_id")]
    pub object_id: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_verified: Option<bool>,
}

impl RemoteUser {
    /// `id`, else `_id`, ignoring blanks.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .or_else(|| self.object_id.as_deref().filter(|id| !id.trim().is_empty()))
    }

    /// Display name, ignoring blanks.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(id)) => Ok(Some(id)),
        Some(serde_json::Value::Number(number)) if number.is_i64() || number.is_u64() => Ok(Some(number.to_string())),
        Some(_) => Err(D::Error::custom("expected string or integer id")),
    }
}
