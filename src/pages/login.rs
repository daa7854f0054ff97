//! Phone + OTP login page.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page owns one `OtpAuthFlow` and one `AuthFlowController`. Handlers run
//! a `begin_*` transition, await the controller in a local task, then apply the
//! outcome. The countdown ticker, the auto-verify timer, and any voice session
//! all stop when the page is torn down.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::app::Services;
use crate::components::notice::NoticeBanner;
use crate::components::otp_inputs::OtpInputs;
use crate::components::voice_button::VoiceButton;
use crate::config::{AUTO_VERIFY_DELAY, ClientConfig};
use crate::error::{AuthError, Notice, NoticeKind};
use crate::flow::controller::{AuthFlowController, complete_verification};
use crate::flow::machine::{OtpAuthFlow, Phase};
use crate::flow::phone::{PHONE_LEN, PhoneNumber};
use crate::state::auth::AuthSession;
use crate::util::auth::sanitize_next;
use crate::util::timer::sleep;
use crate::voice::{self, VoiceResult};

const TICK: std::time::Duration = std::time::Duration::from_secs(1);

/// Which field a voice session is filling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum VoiceTarget {
    Phone,
    Code,
}

/// Where "Continue" leads: a safe `?next=` target, else the configured path.
fn destination(next: Option<&str>, config: &ClientConfig) -> String {
    sanitize_next(next).unwrap_or_else(|| config.post_auth_path.clone())
}

fn resend_label(remaining: u32) -> String {
    if remaining == 0 { "Resend OTP".to_owned() } else { format!("Resend OTP in {remaining}s") }
}

fn sent_message(phone: &PhoneNumber) -> String {
    format!("OTP sent to {}", phone.masked())
}

/// Notice for an applied verify outcome; `None` when nothing was applied.
fn verification_notice(outcome: Option<Result<(), AuthError>>) -> Option<Notice> {
    match outcome? {
        Ok(()) => Some(Notice::info("Login successful")),
        Err(e) => e.is_user_visible().then(|| e.notice()),
    }
}

fn phone_progress(phone: &str) -> String {
    format!("{}/{PHONE_LEN} digits", phone.len())
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthSession>>();
    let config = expect_context::<ClientConfig>();
    let services = expect_context::<Services>();
    let navigate = use_navigate();
    let query = use_query_map();

    let store = auth.with_untracked(|a| a.store().clone());
    let stored_phone = store.phone();
    let flow = RwSignal::new(OtpAuthFlow::resume(config.resend_cooldown_secs, stored_phone.as_deref()));
    let notice = RwSignal::new(None::<Notice>);
    let listening = RwSignal::new(None::<VoiceTarget>);
    let controller = StoredValue::new(AuthFlowController::new(services.gateway, services.location, store, &config));

    let cancel = controller.with_value(AuthFlowController::cancel_flag);
    let torn_down = move || controller.try_with_value(|c| c.cancel_flag().is_cancelled()).unwrap_or(true);
    on_cleanup(move || {
        cancel.cancel();
        voice::with_shared(|v| v.stop_listening());
    });

    let next = query.with_untracked(|q| q.get("next"));
    let continue_href = destination(next.as_deref(), &config);

    // Already logged in: skip straight to the destination.
    let skip_to = continue_href.clone();
    Effect::new(move || {
        if auth.with_untracked(AuthSession::is_authenticated) && flow.with_untracked(|f| f.phase() == Phase::Phone) {
            navigate(&skip_to, NavigateOptions::default());
        }
    });

    let report = move |e: AuthError| {
        if e.is_user_visible() {
            notice.try_set(Some(e.notice()));
        }
    };

    let stop_voice = move || {
        voice::with_shared(|v| v.stop_listening());
        listening.set(None);
    };

    let start_ticker = move |epoch: u64| {
        leptos::task::spawn_local(async move {
            loop {
                sleep(TICK).await;
                if torn_down() {
                    break;
                }
                if !flow.try_update(|f| f.tick(epoch)).unwrap_or(false) {
                    break;
                }
            }
        });
    };

    let run_verify = move || {
        let attempt = match flow.try_update(OtpAuthFlow::begin_verify) {
            Some(Ok(attempt)) => attempt,
            Some(Err(e)) => return report(e),
            None => return,
        };
        stop_voice();
        notice.set(None);
        leptos::task::spawn_local(async move {
            let Some(ctrl) = controller.try_get_value() else {
                return;
            };
            let result = ctrl.verify_code(&attempt).await;
            if matches!(result, Err(AuthError::Cancelled)) {
                return;
            }
            let outcome = flow.try_update(|f| auth.try_update(|a| complete_verification(f, a, result))).flatten();
            if let Some(shown) = verification_notice(outcome) {
                notice.try_set(Some(shown));
            }
        });
    };

    let schedule_verify = move || {
        leptos::task::spawn_local(async move {
            sleep(AUTO_VERIFY_DELAY).await;
            if !torn_down() && flow.with_untracked(OtpAuthFlow::can_verify) {
                run_verify();
            }
        });
    };

    let on_voice_result = move |target: VoiceTarget, result: VoiceResult| {
        if result.is_final {
            listening.try_set(None);
        }
        match target {
            VoiceTarget::Phone => {
                flow.try_update(|f| f.apply_phone_transcript(&result.transcript));
            }
            VoiceTarget::Code => {
                let ready = flow.try_update(|f| f.apply_code_transcript(&result.transcript, result.is_final));
                if ready == Some(true) {
                    schedule_verify();
                }
            }
        }
    };

    let toggle_voice = move |target: VoiceTarget| {
        if listening.get_untracked() == Some(target) {
            stop_voice();
            return;
        }
        listening.set(Some(target));
        let language = auth.with_untracked(|a| a.store().language());
        voice::with_shared(|v| {
            v.set_language(&language);
            v.start_listening(
                move |result| on_voice_result(target, result),
                move |message| {
                    listening.try_set(None);
                    notice.try_set(Some(Notice { kind: NoticeKind::Warning, message }));
                },
            );
        });
    };

    let on_send = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let phone = match flow.try_update(OtpAuthFlow::begin_send) {
            Some(Ok(phone)) => phone,
            Some(Err(e)) => return report(e),
            None => return,
        };
        stop_voice();
        notice.set(None);
        leptos::task::spawn_local(async move {
            let Some(ctrl) = controller.try_get_value() else {
                return;
            };
            let result = ctrl.send_code(&phone).await;
            if matches!(result, Err(AuthError::Cancelled)) {
                return;
            }
            match flow.try_update(|f| f.finish_send(result)) {
                Some(Ok(())) => {
                    notice.set(Some(Notice::info(sent_message(&phone))));
                    start_ticker(flow.with_untracked(OtpAuthFlow::countdown_epoch));
                }
                Some(Err(e)) => report(e),
                None => {}
            }
        });
    };

    let on_verify = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        run_verify();
    };

    let on_resend = move |_| {
        let phone = match flow.try_update(OtpAuthFlow::begin_resend) {
            Some(Ok(phone)) => phone,
            Some(Err(e)) => return report(e),
            None => return,
        };
        stop_voice();
        start_ticker(flow.with_untracked(OtpAuthFlow::countdown_epoch));
        leptos::task::spawn_local(async move {
            let Some(ctrl) = controller.try_get_value() else {
                return;
            };
            match ctrl.resend_code(&phone).await {
                Ok(()) => {
                    notice.try_set(Some(Notice::info("A new OTP has been sent")));
                }
                Err(e) => report(e),
            }
        });
    };

    let on_back = move |_| {
        if flow.try_update(OtpAuthFlow::back).unwrap_or(false) {
            stop_voice();
            notice.set(None);
        }
    };

    let phase = move || flow.with(OtpAuthFlow::phase);
    let phone_voice = Signal::derive(move || listening.get() == Some(VoiceTarget::Phone));
    let code_voice = Signal::derive(move || listening.get() == Some(VoiceTarget::Code));
    let sending = Signal::derive(move || flow.with(OtpAuthFlow::is_sending));
    let verifying = Signal::derive(move || flow.with(OtpAuthFlow::is_verifying));

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Welcome"</h1>
                <NoticeBanner notice=notice/>

                <Show when=move || phase() == Phase::Phone>
                    <p class="login-card__subtitle">"Enter your mobile number to continue"</p>
                    <form class="login-form" on:submit=on_send>
                        <div class="login-input-row">
                            <span class="login-input__prefix">"+91"</span>
                            <input
                                class="login-input"
                                type="tel"
                                inputmode="numeric"
                                autocomplete="tel-national"
                                maxlength=PHONE_LEN.to_string()
                                placeholder="10-digit mobile number"
                                prop:value=move || flow.with(|f| f.phone().to_owned())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    flow.update(|f| f.set_phone_input(&value));
                                }
                            />
                            <VoiceButton
                                listening=phone_voice
                                disabled=sending
                                on_toggle=Callback::new(move |()| toggle_voice(VoiceTarget::Phone))
                            />
                        </div>
                        <p class="login-hint">{move || flow.with(|f| phone_progress(f.phone()))}</p>
                        <button
                            class="login-button"
                            type="submit"
                            disabled=move || !flow.with(OtpAuthFlow::can_send)
                        >
                            {move || if sending.get() { "Sending..." } else { "Send OTP" }}
                        </button>
                    </form>
                </Show>

                <Show when=move || phase() == Phase::Otp>
                    <p class="login-card__subtitle">
                        "Enter the 6-digit code sent to "
                        {move || flow.with(|f| PhoneNumber::parse(f.phone()).map(|p| p.masked()).unwrap_or_default())}
                    </p>
                    <form class="login-form" on:submit=on_verify>
                        <div class="login-input-row">
                            <OtpInputs flow=flow/>
                            <VoiceButton
                                listening=code_voice
                                disabled=verifying
                                on_toggle=Callback::new(move |()| toggle_voice(VoiceTarget::Code))
                            />
                        </div>
                        <button
                            class="login-button"
                            type="submit"
                            disabled=move || !flow.with(OtpAuthFlow::can_verify)
                        >
                            {move || if verifying.get() { "Verifying..." } else { "Verify" }}
                        </button>
                    </form>
                    <div class="login-actions">
                        <button
                            class="login-link"
                            type="button"
                            disabled=move || !flow.with(OtpAuthFlow::can_resend)
                            on:click=on_resend
                        >
                            {move || resend_label(flow.with(OtpAuthFlow::cooldown_remaining))}
                        </button>
                        <button class="login-link" type="button" disabled=move || verifying.get() on:click=on_back>
                            "Change number"
                        </button>
                    </div>
                </Show>

                <Show when=move || phase() == Phase::Success>
                    <p class="login-card__subtitle">"You're logged in."</p>
                    <a href=continue_href.clone() class="login-button">
                        "Continue"
                    </a>
                </Show>
            </div>
        </div>
    }
}
