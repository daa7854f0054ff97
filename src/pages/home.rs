//! Landing page with the navbar login/logout entry point.

use leptos::prelude::*;

use crate::state::account::AccountTypeState;
use crate::state::auth::AuthSession;
use crate::util::auth::LOGIN_PATH;

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthSession>>();
    let account = expect_context::<RwSignal<AccountTypeState>>();

    let signed_in = move || auth.with(AuthSession::is_authenticated);
    let display_name = move || auth.with(|a| a.user().map(|u| u.name.clone()).unwrap_or_default());
    let mode_label = move || account.with(|a| a.current().label());

    let on_logout = move |_| auth.update(AuthSession::logout);

    view! {
        <div class="home-page">
            <nav class="navbar">
                <a href="/" class="navbar__brand">"Marketplace"</a>
                <Show
                    when=signed_in
                    fallback=|| view! { <a href=LOGIN_PATH class="navbar__login">"Login"</a> }
                >
                    <span class="navbar__mode">{mode_label}</span>
                    <a href="/role-select" class="navbar__user">{display_name}</a>
                    <button class="navbar__logout" type="button" on:click=on_logout>
                        "Logout"
                    </button>
                </Show>
            </nav>
            <main class="home-hero">
                <h1>"Get local work done"</h1>
                <p>"Post a job and hire nearby workers, or find work that fits your skills."</p>
                <div class="home-hero__actions">
                    <a href="/role-select" class="home-hero__action">"Post a job"</a>
                    <a href="/worker" class="home-hero__action">"Find work"</a>
                </div>
            </main>
        </div>
    }
}
