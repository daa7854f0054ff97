//! Dismissable notice banner.

use leptos::prelude::*;

use crate::error::{NOTICE_DISMISS_AFTER, Notice};
use crate::util::timer::sleep;

/// Shows the current notice and clears it after a few seconds.
///
/// A newer notice restarts the timer; the older timer leaves it alone.
#[component]
pub fn NoticeBanner(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    let generation = StoredValue::new(0_u64);

    Effect::new(move || {
        if notice.with(Option::is_none) {
            return;
        }
        let current = generation.try_update_value(|g| {
            *g += 1;
            *g
        });
        let Some(current) = current else {
            return;
        };
        leptos::task::spawn_local(async move {
            sleep(NOTICE_DISMISS_AFTER).await;
            if generation.try_get_value() == Some(current) {
                notice.try_set(None);
            }
        });
    });

    view! {
        <Show when=move || notice.with(Option::is_some)>
            <div
                class=move || notice.with(|n| n.as_ref().map_or("notice", Notice::class))
                role="status"
            >
                <span class="notice__message">
                    {move || notice.with(|n| n.as_ref().map(|n| n.message.clone()).unwrap_or_default())}
                </span>
                <button
                    class="notice__dismiss"
                    type="button"
                    aria-label="Dismiss"
                    on:click=move |_| notice.set(None)
                >
                    "×"
                </button>
            </div>
        </Show>
    }
}
