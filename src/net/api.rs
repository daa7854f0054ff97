//! REST gateway for registration, OTP, and user lookup.
//!
//! Client-side (csr): real HTTP calls via `gloo-net`.
//! Native builds: every call fails with a network error, since these
//! endpoints are only reachable from the browser bundle.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures and unreadable bodies map to `AuthError::Network`. A
//! readable body is returned even on a non-2xx status so the caller can
//! surface the server's own `message`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;

use super::types::{
    AckResponse, FetchUserResponse, RegisterRequest, ResendOtpRequest, SendOtpResponse, VerifyOtpRequest,
    VerifyOtpResponse,
};
use crate::error::AuthError;

/// Remote endpoints the auth core depends on.
#[async_trait(?Send)]
pub trait AuthGateway: Send + Sync {
    /// Register (or re-register) `phone` and dispatch an OTP.
    async fn register_with_otp(&self, request: &RegisterRequest) -> Result<SendOtpResponse, AuthError>;

    async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<VerifyOtpResponse, AuthError>;

    async fn resend_otp(&self, request: &ResendOtpRequest) -> Result<AckResponse, AuthError>;

    async fn fetch_user(&self, user_id: &str, token: Option<&str>) -> Result<FetchUserResponse, AuthError>;
}

/// [`AuthGateway`] over HTTP + JSON.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpAuthGateway {
    base_url: String,
}

impl HttpAuthGateway {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into().trim_end_matches('/').to_owned() }
    }

    #[cfg(any(test, feature = "csr"))]
    fn register_endpoint(&self) -> String {
        format!("{}/users/register", self.base_url)
    }

    #[cfg(any(test, feature = "csr"))]
    fn verify_endpoint(&self) -> String {
        format!("{}/users/verify-otp", self.base_url)
    }

    #[cfg(any(test, feature = "csr"))]
    fn resend_endpoint(&self) -> String {
        format!("{}/users/resend-otp", self.base_url)
    }

    #[cfg(any(test, feature = "csr"))]
    fn user_endpoint(&self, user_id: &str) -> String {
        format!("{}/users/{user_id}", self.base_url)
    }
}

#[cfg(any(test, feature = "csr"))]
fn request_failed_message(what: &str, status: u16) -> String {
    format!("{what} failed: {status}")
}

#[async_trait(?Send)]
impl AuthGateway for HttpAuthGateway {
    async fn register_with_otp(&self, request: &RegisterRequest) -> Result<SendOtpResponse, AuthError> {
        #[cfg(feature = "csr")]
        {
            post_json(&self.register_endpoint(), request, "send code").await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(not_available())
        }
    }

    async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<VerifyOtpResponse, AuthError> {
        #[cfg(feature = "csr")]
        {
            post_json(&self.verify_endpoint(), request, "verify code").await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(not_available())
        }
    }

    async fn resend_otp(&self, request: &ResendOtpRequest) -> Result<AckResponse, AuthError> {
        #[cfg(feature = "csr")]
        {
            post_json(&self.resend_endpoint(), request, "resend code").await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(not_available())
        }
    }

    async fn fetch_user(&self, user_id: &str, token: Option<&str>) -> Result<FetchUserResponse, AuthError> {
        #[cfg(feature = "csr")]
        {
            let mut builder = gloo_net::http::Request::get(&self.user_endpoint(user_id));
            if let Some(token) = token {
                builder = builder.header("Authorization", &format!("Bearer {token}"));
            }
            let resp = builder.send().await.map_err(|e| AuthError::Network(e.to_string()))?;
            read_json(resp, "fetch user").await
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (user_id, token);
            Err(not_available())
        }
    }
}

#[cfg(not(feature = "csr"))]
fn not_available() -> AuthError {
    AuthError::Network("not available outside the browser".to_owned())
}

#[cfg(feature = "csr")]
async fn post_json<B, R>(url: &str, body: &B, what: &str) -> Result<R, AuthError>
where
    B: serde::Serialize,
    R: serde::de::DeserializeOwned,
{
    let resp = gloo_net::http::Request::post(url)
        .json(body)
        .map_err(|e| AuthError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))?;
    read_json(resp, what).await
}

#[cfg(feature = "csr")]
async fn read_json<R>(resp: gloo_net::http::Response, what: &str) -> Result<R, AuthError>
where
    R: serde::de::DeserializeOwned,
{
    let ok = resp.ok();
    let status = resp.status();
    match resp.json::<R>().await {
        Ok(body) => Ok(body),
        Err(_) if !ok => Err(AuthError::Network(request_failed_message(what, status))),
        Err(e) => Err(AuthError::Network(e.to_string())),
    }
}
