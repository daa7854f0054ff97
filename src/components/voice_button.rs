//! Microphone toggle for voice-enabled fields.

use leptos::prelude::*;

#[component]
pub fn VoiceButton(
    #[prop(into)] listening: Signal<bool>,
    #[prop(into)] disabled: Signal<bool>,
    on_toggle: Callback<()>,
) -> impl IntoView {
    view! {
        <button
            class="voice-button"
            class:voice-button--active=move || listening.get()
            type="button"
            disabled=move || disabled.get()
            aria-pressed=move || if listening.get() { "true" } else { "false" }
            title=move || if listening.get() { "Stop listening" } else { "Speak" }
            on:click=move |_| on_toggle.run(())
        >
            {move || if listening.get() { "Listening..." } else { "🎤" }}
        </button>
    }
}
