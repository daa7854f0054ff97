//! Worker-only area; requires a logged-in session.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::state::account::{AccountType, AccountTypeState};
use crate::state::auth::AuthSession;
use crate::util::auth::install_unauth_redirect;

#[component]
pub fn WorkerPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthSession>>();
    let account = expect_context::<RwSignal<AccountTypeState>>();
    install_unauth_redirect(auth, "/worker", use_navigate());

    let is_worker = move || account.with(|a| a.current() == AccountType::Worker);
    let on_switch = move |_| account.update(|a| a.set_account_type(AccountType::Worker));

    view! {
        <Show when=move || auth.with(AuthSession::is_authenticated)>
            <div class="worker-page">
                <h1>"Find work"</h1>
                <Show
                    when=is_worker
                    fallback=move || {
                        view! {
                            <div class="worker-page__switch">
                                <p>"You are browsing as a customer."</p>
                                <button class="login-button" type="button" on:click=on_switch>
                                    "Switch to worker mode"
                                </button>
                            </div>
                        }
                    }
                >
                    <p class="worker-page__empty">"No open jobs near you yet."</p>
                </Show>
            </div>
        </Show>
    }
}
