//! Single-session speech recognition adapter.
//!
//! SYSTEM CONTEXT
//! ==============
//! The phone field, the OTP cells, and search fields all share one adapter.
//! Starting a session stops whichever one is active, and callbacks from a
//! stopped session are dropped, so at most one caller ever hears results.
//! Callers own their "listening" UI flag and clear it on final results,
//! errors, or their own stop.

#[cfg(test)]
#[path = "adapter_test.rs"]
mod adapter_test;

use std::cell::Cell;
use std::rc::Rc;

use leptos::logging::warn;

use crate::error::AuthError;

pub const UNSUPPORTED_MESSAGE: &str = "Voice input is not supported in this browser.";
pub const DEFAULT_RECOGNITION_LANG: &str = "en-IN";

/// One recognition update for the current utterance.
#[derive(Clone, Debug, PartialEq)]
pub struct VoiceResult {
    pub transcript: String,
    pub confidence: f32,
    /// Terminal result for the utterance.
    pub is_final: bool,
}

/// Callbacks a backend drives for one session.
pub struct SessionHandlers {
    pub on_result: Box<dyn FnMut(VoiceResult)>,
    pub on_error: Box<dyn FnMut(String)>,
    pub on_end: Box<dyn FnMut()>,
}

/// Host speech-recognition capability.
pub trait SpeechBackend {
    fn is_available(&self) -> bool;

    /// BCP 47 tag for sessions started after this call.
    fn set_language(&mut self, _lang: &str) {}

    /// Begin one non-continuous session with interim results.
    ///
    /// Start failures are reported through `handlers.on_error`.
    fn start(&mut self, handlers: SessionHandlers);

    /// Cancel the running session.
    ///
    /// # Errors
    ///
    /// Returns the backend's message; the adapter ignores it.
    fn stop(&mut self) -> Result<(), String>;
}

pub struct VoiceInput<B: SpeechBackend> {
    backend: B,
    supported: bool,
    session: Option<Rc<Cell<bool>>>,
}

impl<B: SpeechBackend> VoiceInput<B> {
    /// Capability is probed once, here.
    pub fn new(backend: B) -> Self {
        let supported = backend.is_available();
        Self { backend, supported, session: None }
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Recognize `language` (a stored UI language such as `"hi"`) from the
    /// next session on.
    pub fn set_language(&mut self, language: &str) {
        self.backend.set_language(&recognition_lang(language));
    }

    #[must_use]
    pub fn is_listening(&self) -> bool {
        self.session.as_ref().is_some_and(|live| live.get())
    }

    /// Start a session, stopping any active one first.
    ///
    /// Errors, including an unsupported environment, arrive through
    /// `on_error` and end the session.
    pub fn start_listening<R, E>(&mut self, mut on_result: R, mut on_error: E)
    where
        R: FnMut(VoiceResult) + 'static,
        E: FnMut(String) + 'static,
    {
        if !self.supported {
            on_error(AuthError::UnsupportedCapability(UNSUPPORTED_MESSAGE.to_owned()).to_string());
            return;
        }
        self.stop_listening();

        let live = Rc::new(Cell::new(true));
        self.session = Some(live.clone());

        let result_live = live.clone();
        let error_live = live.clone();
        let end_live = live;
        self.backend.start(SessionHandlers {
            on_result: Box::new(move |result| {
                if result_live.get() {
                    on_result(result);
                }
            }),
            on_error: Box::new(move |message| {
                if error_live.replace(false) {
                    on_error(message);
                }
            }),
            on_end: Box::new(move || end_live.set(false)),
        });
    }

    /// Cancel the active session. No-op when idle.
    pub fn stop_listening(&mut self) {
        let Some(live) = self.session.take() else {
            return;
        };
        if live.replace(false) {
            if let Err(e) = self.backend.stop() {
                warn!("voice: stop failed: {e}");
            }
        }
    }
}

/// Backend for hosts without speech recognition.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unavailable;

impl SpeechBackend for Unavailable {
    fn is_available(&self) -> bool {
        false
    }

    fn start(&mut self, mut handlers: SessionHandlers) {
        (handlers.on_error)(UNSUPPORTED_MESSAGE.to_owned());
    }

    fn stop(&mut self) -> Result<(), String> {
        Ok(())
    }
}

/// Recognizer tag for a UI language; bare codes get the `IN` region.
#[must_use]
pub fn recognition_lang(language: &str) -> String {
    let language = language.trim();
    if language.is_empty() {
        DEFAULT_RECOGNITION_LANG.to_owned()
    } else if language.contains('-') {
        language.to_owned()
    } else {
        format!("{language}-IN")
    }
}

/// User-facing text for a Web Speech API error code.
#[must_use]
pub fn describe_recognition_error(code: &str) -> String {
    match code {
        "no-speech" => "No speech detected. Please try again.".to_owned(),
        "audio-capture" => "No microphone was found.".to_owned(),
        "not-allowed" | "service-not-allowed" => "Microphone access was denied.".to_owned(),
        "network" => "Voice recognition needs a network connection.".to_owned(),
        "aborted" => "Voice input was cancelled.".to_owned(),
        other => format!("Voice recognition error: {other}"),
    }
}
