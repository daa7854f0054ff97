//! Shared auth route-guard helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guarded routes apply identical redirect behavior: an unauthenticated visit
//! opens the login flow and remembers where to return.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthSession;

pub const LOGIN_PATH: &str = "/login";

/// Same-origin absolute path: one leading `/`, no backslash, no whitespace or
/// control characters. Browsers read `\` as `/`, so `/\host` is off-origin.
fn is_local_path(path: &str) -> bool {
    let mut chars = path.chars();
    chars.next() == Some('/')
        && !matches!(chars.next(), Some('/' | '\\'))
        && !path.chars().any(|c| c == '\\' || c.is_whitespace() || c.is_control())
}

/// Login URL that returns to `from` after authentication.
#[must_use]
pub fn login_redirect_path(from: &str) -> String {
    if from == "/" || !is_local_path(from) {
        return LOGIN_PATH.to_owned();
    }
    format!("{LOGIN_PATH}?next={from}")
}

/// Only same-origin absolute paths are accepted as return targets.
#[must_use]
pub fn sanitize_next(next: Option<&str>) -> Option<String> {
    let next = next?.trim();
    (is_local_path(next) && next != LOGIN_PATH).then(|| next.to_owned())
}

/// Redirect to the login flow whenever nobody is logged in.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthSession>, from: &'static str, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if !auth.with(AuthSession::is_authenticated) {
            navigate(&login_redirect_path(from), NavigateOptions::default());
        }
    });
}
