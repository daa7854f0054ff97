//! Voice input for text and digit fields.
//!
//! ARCHITECTURE
//! ============
//! `adapter` enforces the single-session contract over any [`SpeechBackend`];
//! `browser` is the Web Speech API backend; `digits` turns transcripts into
//! digit strings for the phone and OTP fields.

pub mod adapter;
#[cfg(feature = "csr")]
pub mod browser;
pub mod digits;

use std::cell::RefCell;

pub use adapter::{SessionHandlers, SpeechBackend, VoiceInput, VoiceResult};

#[cfg(feature = "csr")]
pub type PlatformSpeech = browser::BrowserSpeech;
#[cfg(not(feature = "csr"))]
pub type PlatformSpeech = adapter::Unavailable;

fn platform_speech() -> PlatformSpeech {
    #[cfg(feature = "csr")]
    {
        browser::BrowserSpeech::detect()
    }
    #[cfg(not(feature = "csr"))]
    {
        adapter::Unavailable
    }
}

/// Run `f` against the process-wide voice adapter.
///
/// `f` must not call back into `with_shared`.
pub fn with_shared<R>(f: impl FnOnce(&mut VoiceInput<PlatformSpeech>) -> R) -> R {
    thread_local! {
        static SHARED: RefCell<VoiceInput<PlatformSpeech>> = RefCell::new(VoiceInput::new(platform_speech()));
    }
    SHARED.with(|voice| f(&mut voice.borrow_mut()))
}
