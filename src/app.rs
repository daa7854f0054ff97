//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::logging::warn;
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::config::ClientConfig;
use crate::net::api::{AuthGateway, HttpAuthGateway};
use crate::pages::{home::HomePage, login::LoginPage, role_select::RoleSelectPage, worker::WorkerPage};
use crate::state::account::AccountTypeState;
use crate::state::auth::AuthSession;
use crate::store::kv::BrowserStorage;
use crate::store::session::SessionStore;
use crate::util::geolocation::{BrowserLocation, LocationProvider};

/// Remote ports shared by every page.
#[derive(Clone)]
pub struct Services {
    pub gateway: Arc<dyn AuthGateway>,
    pub location: Arc<dyn LocationProvider>,
}

impl Services {
    #[must_use]
    pub fn browser(config: &ClientConfig) -> Self {
        Self {
            gateway: Arc::new(HttpAuthGateway::new(config.api_base_url.clone())),
            location: Arc::new(BrowserLocation),
        }
    }
}

/// Root application component.
///
/// Restores the persisted session, provides the shared contexts, and keeps the
/// account type in step with whoever is logged in.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env().unwrap_or_else(|e| {
        warn!("config: {e}; using defaults");
        ClientConfig::default()
    });
    let store = SessionStore::new(BrowserStorage::shared());
    let session = AuthSession::init(store.clone());
    let account_state = AccountTypeState::init(store, session.user());

    let auth = RwSignal::new(session);
    let account = RwSignal::new(account_state);

    provide_context(Services::browser(&config));
    provide_context(config);
    provide_context(auth);
    provide_context(account);

    Effect::new(move || {
        let user = auth.with(|a| a.user().cloned());
        account.update(|a| a.on_user_changed(user.as_ref()));
    });

    view! {
        <Title text="Marketplace"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("role-select") view=RoleSelectPage/>
                <Route path=StaticSegment("worker") view=WorkerPage/>
            </Routes>
        </Router>
    }
}
