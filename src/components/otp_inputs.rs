//! Six single-digit OTP cells.
//!
//! Typing advances focus, backspace on an empty cell steps back, and pasting a
//! full code fills the cells left to right. All edits go through the flow so
//! the cells never hold anything but digits.

use leptos::html;
use leptos::prelude::*;

use crate::flow::machine::OtpAuthFlow;
use crate::flow::otp_cells::OTP_LEN;

#[component]
pub fn OtpInputs(flow: RwSignal<OtpAuthFlow>) -> impl IntoView {
    let refs: [NodeRef<html::Input>; OTP_LEN] = std::array::from_fn(|_| NodeRef::new());
    let disabled = move || flow.with(OtpAuthFlow::is_verifying);

    let focus = move |index: Option<usize>| {
        #[cfg(feature = "csr")]
        if let Some(input) = index.and_then(|i| refs.get(i)).and_then(NodeRef::get_untracked) {
            let _ = input.focus();
        }
        #[cfg(not(feature = "csr"))]
        let _ = (index, refs);
    };

    let cells = (0..OTP_LEN)
        .map(|index| {
            view! {
                <input
                    node_ref=refs[index]
                    class="otp-cell"
                    type="text"
                    inputmode="numeric"
                    autocomplete="one-time-code"
                    maxlength=OTP_LEN.to_string()
                    aria-label=format!("Digit {}", index + 1)
                    disabled=disabled
                    prop:value=move || flow.with(|f| f.cells().display(index))
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        focus(flow.try_update(|f| f.input_cell(index, &value)).flatten());
                    }
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Backspace" {
                            focus(flow.with_untracked(|f| f.backspace_cell(index)));
                        }
                    }
                    on:paste=move |ev: leptos::ev::ClipboardEvent| {
                        ev.prevent_default();
                        let text = clipboard_text(&ev);
                        focus(flow.try_update(|f| f.paste_code(&text)).flatten());
                    }
                />
            }
        })
        .collect_view();

    view! { <div class="otp-cells">{cells}</div> }
}

fn clipboard_text(ev: &leptos::ev::ClipboardEvent) -> String {
    #[cfg(feature = "csr")]
    {
        ev.clipboard_data().and_then(|data| data.get_data("text").ok()).unwrap_or_default()
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = ev;
        String::new()
    }
}
