//! In-memory fakes shared by unit tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::AuthError;
use crate::flow::controller::CancelFlag;
use crate::net::api::AuthGateway;
use crate::net::types::{
    AckResponse, FetchUserResponse, RegisterRequest, RemoteUser, ResendOtpRequest, SendOtpResponse,
    VerifyOtpRequest, VerifyOtpResponse,
};
use crate::state::account::AccountType;
use crate::state::auth::{UserId, UserRecord};
use crate::store::session::SessionStore;
use crate::util::geolocation::{Coordinates, LocationProvider};
use crate::util::timer::Timer;

pub fn sample_user(id: &str, name: &str, role: Option<AccountType>) -> UserRecord {
    UserRecord {
        id: UserId::Server(id.to_owned()),
        phone: "9876543210".to_owned(),
        name: name.to_owned(),
        is_verified: true,
        role,
        created_at: "2026-01-01T00:00:00Z".to_owned(),
        updated_at: "2026-01-01T00:00:00Z".to_owned(),
    }
}

pub fn remote_user(id: Option<&str>, name: Option<&str>) -> RemoteUser {
    RemoteUser {
        object_id: id.map(str::to_owned),
        phone: Some("9876543210".to_owned()),
        name: name.map(str::to_owned),
        ..RemoteUser::default()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GatewayCall {
    Register(RegisterRequest),
    Verify(VerifyOtpRequest),
    Resend(String),
    Fetch { user_id: String, token: Option<String> },
}

/// Scripted [`AuthGateway`] that records every call.
pub struct FakeGateway {
    send: Mutex<Result<SendOtpResponse, AuthError>>,
    verify: Mutex<Result<VerifyOtpResponse, AuthError>>,
    resend: Mutex<Result<AckResponse, AuthError>>,
    fetch: Mutex<Result<FetchUserResponse, AuthError>>,
    calls: Mutex<Vec<GatewayCall>>,
    phone_seen_at_send: Mutex<Option<Option<String>>>,
    probe: Option<SessionStore>,
    cancel_during_call: Option<CancelFlag>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            send: Mutex::new(Ok(SendOtpResponse { success: true, ..SendOtpResponse::default() })),
            verify: Mutex::new(Ok(VerifyOtpResponse { success: true, ..VerifyOtpResponse::default() })),
            resend: Mutex::new(Ok(AckResponse { success: true, message: None })),
            fetch: Mutex::new(Err(AuthError::Network("no fetch scripted".to_owned()))),
            calls: Mutex::new(Vec::new()),
            phone_seen_at_send: Mutex::new(None),
            probe: None,
            cancel_during_call: None,
        }
    }
}

impl FakeGateway {
    pub fn with_send(self, response: Result<SendOtpResponse, AuthError>) -> Self {
        *self.send.lock().unwrap() = response;
        self
    }

    pub fn with_verify(self, response: Result<VerifyOtpResponse, AuthError>) -> Self {
        *self.verify.lock().unwrap() = response;
        self
    }

    pub fn with_resend(self, response: Result<AckResponse, AuthError>) -> Self {
        *self.resend.lock().unwrap() = response;
        self
    }

    pub fn with_fetch(self, response: Result<FetchUserResponse, AuthError>) -> Self {
        *self.fetch.lock().unwrap() = response;
        self
    }

    /// Record the store's phone at the moment the send request arrives.
    pub fn probing(mut self, store: SessionStore) -> Self {
        self.probe = Some(store);
        self
    }

    /// Trip `flag` while a request is in flight, as a teardown would.
    pub fn cancelling(mut self, flag: CancelFlag) -> Self {
        self.cancel_during_call = Some(flag);
        self
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn phone_seen_at_send(&self) -> Option<String> {
        self.phone_seen_at_send.lock().unwrap().clone().flatten()
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
        if let Some(flag) = &self.cancel_during_call {
            flag.cancel();
        }
    }
}

#[async_trait(?Send)]
impl AuthGateway for FakeGateway {
    async fn register_with_otp(&self, request: &RegisterRequest) -> Result<SendOtpResponse, AuthError> {
        if let Some(store) = &self.probe {
            *self.phone_seen_at_send.lock().unwrap() = Some(store.phone());
        }
        self.record(GatewayCall::Register(request.clone()));
        self.send.lock().unwrap().clone()
    }

    async fn verify_otp(&self, request: &VerifyOtpRequest) -> Result<VerifyOtpResponse, AuthError> {
        self.record(GatewayCall::Verify(request.clone()));
        self.verify.lock().unwrap().clone()
    }

    async fn resend_otp(&self, request: &ResendOtpRequest) -> Result<AckResponse, AuthError> {
        self.record(GatewayCall::Resend(request.phone.clone()));
        self.resend.lock().unwrap().clone()
    }

    async fn fetch_user(&self, user_id: &str, token: Option<&str>) -> Result<FetchUserResponse, AuthError> {
        self.record(GatewayCall::Fetch { user_id: user_id.to_owned(), token: token.map(str::to_owned) });
        self.fetch.lock().unwrap().clone()
    }
}

/// Location provider returning a fixed answer.
pub struct FixedLocation(pub Option<Coordinates>);

#[async_trait(?Send)]
impl LocationProvider for FixedLocation {
    async fn current_position(&self) -> Option<Coordinates> {
        self.0
    }
}

/// Gateway whose requests never complete.
pub struct HangingGateway;

#[async_trait(?Send)]
impl AuthGateway for HangingGateway {
    async fn register_with_otp(&self, _request: &RegisterRequest) -> Result<SendOtpResponse, AuthError> {
        futures::future::pending().await
    }

    async fn verify_otp(&self, _request: &VerifyOtpRequest) -> Result<VerifyOtpResponse, AuthError> {
        futures::future::pending().await
    }

    async fn resend_otp(&self, _request: &ResendOtpRequest) -> Result<AckResponse, AuthError> {
        futures::future::pending().await
    }

    async fn fetch_user(&self, _user_id: &str, _token: Option<&str>) -> Result<FetchUserResponse, AuthError> {
        futures::future::pending().await
    }
}

/// Timer whose deadlines have always passed.
pub struct ExpiredTimer;

#[async_trait(?Send)]
impl Timer for ExpiredTimer {
    async fn sleep(&self, _duration: Duration) {}
}
