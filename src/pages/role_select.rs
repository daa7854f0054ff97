//! Post-login landing: confirm the profile and pick an account type.
//!
//! SYSTEM CONTEXT
//! ==============
//! Successful logins arrive here. The page refreshes the profile from the
//! server once, lets the user fix their display name, and switches the
//! account type explicitly.

use leptos::logging::warn;
use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::app::Services;
use crate::config::ClientConfig;
use crate::error::AuthError;
use crate::flow::controller::AuthFlowController;
use crate::state::account::{AccountType, AccountTypeState};
use crate::state::auth::AuthSession;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn RoleSelectPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthSession>>();
    let account = expect_context::<RwSignal<AccountTypeState>>();
    let config = expect_context::<ClientConfig>();
    let services = expect_context::<Services>();
    let navigate = use_navigate();

    install_unauth_redirect(auth, "/role-select", navigate.clone());

    let store = auth.with_untracked(|a| a.store().clone());
    let controller = AuthFlowController::new(services.gateway, services.location, store, &config);
    let cancel = controller.cancel_flag();
    on_cleanup(move || cancel.cancel());

    if let Some(current) = auth.with_untracked(|a| a.user().cloned()) {
        leptos::task::spawn_local(async move {
            match controller.refresh_user(&current).await {
                Ok(user) => auth.update(|a| a.replace_user(user)),
                Err(AuthError::Cancelled | AuthError::Validation(_)) => {}
                Err(e) => warn!("profile: refresh failed: {e}"),
            }
        });
    }

    let name = RwSignal::new(auth.with_untracked(|a| a.user().map(|u| u.name.clone()).unwrap_or_default()));
    let saved = RwSignal::new(false);
    let on_save_name = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let value = name.get_untracked();
        let updated = auth.try_update(|a| a.update_name(&value)).unwrap_or(false);
        saved.set(updated);
    };

    let choose = move |account_type: AccountType| {
        account.update(|a| a.set_account_type(account_type));
        let path = match account_type {
            AccountType::User => "/",
            AccountType::Worker => "/worker",
        };
        navigate(path, NavigateOptions::default());
    };
    let choose_user = choose.clone();
    let choose_worker = choose;

    let is_current = move |account_type: AccountType| account.with(|a| a.current() == account_type);

    view! {
        <div class="role-page">
            <h1>"How will you use the marketplace?"</h1>
            <form class="profile-form" on:submit=on_save_name>
                <label class="profile-form__label" for="profile-name">"Your name"</label>
                <input
                    id="profile-name"
                    class="profile-form__input"
                    type="text"
                    prop:value=move || name.get()
                    on:input=move |ev| {
                        saved.set(false);
                        name.set(event_target_value(&ev));
                    }
                />
                <button class="profile-form__save" type="submit">"Save"</button>
                <span class="profile-form__status">{move || if saved.get() { "Saved" } else { "" }}</span>
            </form>
            <div class="role-options">
                <button
                    class="role-option"
                    class:role-option--current=move || is_current(AccountType::User)
                    type="button"
                    on:click=move |_| choose_user(AccountType::User)
                >
                    <strong>{AccountType::User.label()}</strong>
                    <span>"Post jobs and hire local workers"</span>
                </button>
                <button
                    class="role-option"
                    class:role-option--current=move || is_current(AccountType::Worker)
                    type="button"
                    on:click=move |_| choose_worker(AccountType::Worker)
                >
                    <strong>{AccountType::Worker.label()}</strong>
                    <span>"Offer your skills and apply to jobs"</span>
                </button>
            </div>
        </div>
    }
}
