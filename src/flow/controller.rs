//! Runs the OTP flow's network steps and owns its persistence points.
//!
//! SYSTEM CONTEXT
//! ==============
//! The login page calls `begin_*` on the state machine, awaits one of the
//! controller methods here, then applies the outcome with `finish_*` (or
//! [`complete_verification`]). Storage writes happen only in the two named
//! hooks, `on_phone_submitted` and `on_verify_success`.
//!
//! Every gateway call is bounded by the configured timeout and observes the
//! controller's cancellation flag, which the page trips on teardown.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use leptos::logging::{log, warn};

use super::machine::{OtpAuthFlow, VerifyAttempt};
use super::phone::PhoneNumber;
use crate::config::ClientConfig;
use crate::error::AuthError;
use crate::net::api::AuthGateway;
use crate::net::types::{RegisterRequest, RemoteUser, ResendOtpRequest, VerifyOtpRequest, VerifyOtpResponse};
use crate::state::account::AccountType;
use crate::state::auth::{AuthSession, DEFAULT_USER_NAME, UserId, UserRecord};
use crate::store::session::{SessionStore, VerifiedIdentity};
use crate::util::geolocation::LocationProvider;
use crate::util::time::now_rfc3339;
use crate::util::timer::{BrowserTimer, Timer, race_deadline};

/// Tripped once when the owning component is torn down.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Clone)]
pub struct AuthFlowController {
    gateway: Arc<dyn AuthGateway>,
    location: Arc<dyn LocationProvider>,
    store: SessionStore,
    timer: Arc<dyn Timer>,
    timeout: Duration,
    cancel: CancelFlag,
}

impl AuthFlowController {
    pub fn new(
        gateway: Arc<dyn AuthGateway>,
        location: Arc<dyn LocationProvider>,
        store: SessionStore,
        config: &ClientConfig,
    ) -> Self {
        Self {
            gateway,
            location,
            store,
            timer: Arc::new(BrowserTimer),
            timeout: config.request_timeout,
            cancel: CancelFlag::default(),
        }
    }

    /// Replace the deadline source.
    #[must_use]
    pub fn with_timer(mut self, timer: Arc<dyn Timer>) -> Self {
        self.timer = timer;
        self
    }

    /// Cancel outstanding and future calls. Late results become `Cancelled`.
    pub fn dispose(&self) {
        self.cancel.cancel();
    }

    #[must_use]
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    async fn call<T, F>(&self, request: F) -> Result<T, AuthError>
    where
        F: Future<Output = Result<T, AuthError>>,
    {
        if self.cancel.is_cancelled() {
            return Err(AuthError::Cancelled);
        }
        let outcome = race_deadline(request, self.timer.sleep(self.timeout))
            .await
            .map_err(|_| AuthError::Timeout);
        if outcome.is_err() {
            warn!("otp flow: request timed out after {}s", self.timeout.as_secs());
        }
        if self.cancel.is_cancelled() {
            return Err(AuthError::Cancelled);
        }
        outcome?
    }

    fn on_phone_submitted(&self, phone: &PhoneNumber) {
        if let Err(e) = self.store.set_phone(phone.as_str()) {
            warn!("otp flow: phone not persisted: {e}");
        }
    }

    fn on_verify_success(&self, user: &UserRecord, token: Option<&str>) {
        let identity = VerifiedIdentity { user_id: user.id.as_str(), phone: &user.phone, name: &user.name, token };
        if let Err(e) = self.store.save_identity(&identity) {
            warn!("otp flow: identity not persisted: {e}");
        }
    }

    /// Register `phone` and dispatch an OTP.
    ///
    /// The phone is persisted before the request so a reload can resume the
    /// login, whatever the network outcome.
    ///
    /// # Errors
    ///
    /// `Network`, `Timeout`, `Cancelled`, or `ServerRejected` with the
    /// server's message.
    pub async fn send_code(&self, phone: &PhoneNumber) -> Result<(), AuthError> {
        self.on_phone_submitted(phone);

        let coordinates = race_deadline(self.location.current_position(), self.timer.sleep(self.timeout))
            .await
            .ok()
            .flatten()
            .unwrap_or_default();
        let request = RegisterRequest {
            phone: phone.as_str().to_owned(),
            name: DEFAULT_USER_NAME.to_owned(),
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        };

        let response = self.call(self.gateway.register_with_otp(&request)).await?;
        if !response.success {
            warn!("otp flow: send rejected for {}", phone.masked());
            return Err(AuthError::rejected(response.message, "Failed to send OTP. Please try again."));
        }
        if response.otp.is_some() {
            log!("otp flow: server echoed the code (development mode)");
        }
        log!("otp flow: code sent to {}", phone.masked());
        Ok(())
    }

    /// Verify the entered code and persist the returned identity.
    ///
    /// # Errors
    ///
    /// `Network`, `Timeout`, `Cancelled`, or `ServerRejected` with the
    /// server's message.
    pub async fn verify_code(&self, attempt: &VerifyAttempt) -> Result<UserRecord, AuthError> {
        let request = VerifyOtpRequest { phone: attempt.phone.as_str().to_owned(), otp: attempt.code.clone() };
        let response = self.call(self.gateway.verify_otp(&request)).await?;
        if !response.success {
            warn!("otp flow: verification rejected for {}", attempt.phone.masked());
            return Err(AuthError::rejected(response.message, "Invalid OTP. Please try again."));
        }

        let user = user_record_from_verify(&attempt.phone, &response, &now_rfc3339());
        if user.id.is_provisional() {
            warn!("otp flow: verify response carried no user id; using provisional id");
        }
        self.on_verify_success(&user, response.token());
        Ok(user)
    }

    /// Ask the server to send a fresh code.
    ///
    /// # Errors
    ///
    /// `Network`, `Timeout`, `Cancelled`, or `ServerRejected`.
    pub async fn resend_code(&self, phone: &PhoneNumber) -> Result<(), AuthError> {
        let request = ResendOtpRequest { phone: phone.as_str().to_owned() };
        let response = self.call(self.gateway.resend_otp(&request)).await?;
        if !response.success {
            return Err(AuthError::rejected(response.message, "Failed to resend OTP."));
        }
        log!("otp flow: code resent to {}", phone.masked());
        Ok(())
    }

    /// Reload the current user's profile from the server.
    ///
    /// # Errors
    ///
    /// `Validation` for a provisional id, which the server cannot look up;
    /// otherwise the gateway's failures.
    pub async fn refresh_user(&self, current: &UserRecord) -> Result<UserRecord, AuthError> {
        let Some(user_id) = current.id.server_id() else {
            return Err(AuthError::Validation("Profile is not linked to a server account yet".to_owned()));
        };
        let token = self.store.auth_token();
        let response = self.call(self.gateway.fetch_user(user_id, token.as_deref())).await?;
        let remote = match response.data {
            Some(remote) if response.success => remote,
            _ => return Err(AuthError::rejected(response.message, "Failed to load profile.")),
        };
        Ok(merge_remote_user(current, &remote, &now_rfc3339()))
    }
}

/// Build the session record from a successful verify response.
///
/// Without `user.id` / `user._id` the phone becomes a provisional id.
#[must_use]
pub fn user_record_from_verify(phone: &PhoneNumber, response: &VerifyOtpResponse, now: &str) -> UserRecord {
    let remote = response.user.as_ref();
    let id = remote
        .and_then(RemoteUser::id)
        .map_or_else(|| UserId::Provisional(phone.as_str().to_owned()), |id| UserId::Server(id.to_owned()));
    UserRecord {
        id,
        phone: phone.as_str().to_owned(),
        name: remote.and_then(RemoteUser::name).unwrap_or(DEFAULT_USER_NAME).to_owned(),
        is_verified: remote.and_then(|u| u.is_verified).unwrap_or(true),
        role: remote.and_then(|u| u.role.as_deref()).and_then(AccountType::parse),
        created_at: now.to_owned(),
        updated_at: now.to_owned(),
    }
}

/// Overlay server profile fields onto the current record.
///
/// The id and phone never change through a refresh.
#[must_use]
pub fn merge_remote_user(current: &UserRecord, remote: &RemoteUser, now: &str) -> UserRecord {
    UserRecord {
        id: current.id.clone(),
        phone: current.phone.clone(),
        name: remote.name().map_or_else(|| current.name.clone(), str::to_owned),
        is_verified: remote.is_verified.unwrap_or(current.is_verified),
        role: remote.role.as_deref().and_then(AccountType::parse).or(current.role),
        created_at: current.created_at.clone(),
        updated_at: now.to_owned(),
    }
}

/// Apply a verify outcome: log the user in, then advance the flow.
///
/// # Errors
///
/// Passes the verify failure through after clearing the in-flight flag.
pub fn complete_verification(
    flow: &mut OtpAuthFlow,
    auth: &mut AuthSession,
    result: Result<UserRecord, AuthError>,
) -> Result<(), AuthError> {
    match result {
        Ok(user) => {
            auth.login(user);
            flow.finish_verify(Ok(()))
        }
        Err(e) => flow.finish_verify(Err(e)),
    }
}
