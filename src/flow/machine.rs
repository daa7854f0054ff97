//! OTP login state machine.
//!
//! DESIGN
//! ======
//! The machine is synchronous and side-effect free. Every network-backed step
//! is split into a `begin_*` transition, which validates and returns the
//! request to send, and a `finish_*` transition, which applies the outcome.
//! The phase only moves forward (Phone → Otp → Success) except for `back`,
//! which returns Otp → Phone.

#[cfg(test)]
#[path = "machine_test.rs"]
mod machine_test;

use leptos::logging::log;

use super::cooldown::Cooldown;
use super::otp_cells::OtpCells;
use super::phone::{PhoneNumber, sanitize_phone_input};
use crate::error::AuthError;
use crate::voice::digits::transcript_to_digits;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Phone,
    Otp,
    Success,
}

/// What a verify call needs, captured when verification begins.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyAttempt {
    pub phone: PhoneNumber,
    pub code: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OtpAuthFlow {
    phase: Phase,
    phone: String,
    cells: OtpCells,
    cooldown: Cooldown,
    cooldown_secs: u32,
    countdown_epoch: u64,
    is_sending: bool,
    is_verifying: bool,
}

impl OtpAuthFlow {
    #[must_use]
    pub fn new(cooldown_secs: u32) -> Self {
        Self {
            phase: Phase::Phone,
            phone: String::new(),
            cells: OtpCells::default(),
            cooldown: Cooldown::default(),
            cooldown_secs,
            countdown_epoch: 0,
            is_sending: false,
            is_verifying: false,
        }
    }

    /// Start at Phone, pre-filled with a number from an earlier submission.
    #[must_use]
    pub fn resume(cooldown_secs: u32, stored_phone: Option<&str>) -> Self {
        let mut flow = Self::new(cooldown_secs);
        if let Some(phone) = stored_phone {
            flow.phone = sanitize_phone_input(phone);
        }
        flow
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    #[must_use]
    pub fn cells(&self) -> &OtpCells {
        &self.cells
    }

    #[must_use]
    pub fn cooldown_remaining(&self) -> u32 {
        self.cooldown.remaining()
    }

    /// Identifies the live countdown; bumped on every (re)start and on `back`.
    #[must_use]
    pub fn countdown_epoch(&self) -> u64 {
        self.countdown_epoch
    }

    #[must_use]
    pub fn is_sending(&self) -> bool {
        self.is_sending
    }

    #[must_use]
    pub fn is_verifying(&self) -> bool {
        self.is_verifying
    }

    // =============================================================
    // Phone
    // =============================================================

    pub fn set_phone_input(&mut self, raw: &str) {
        if self.phase == Phase::Phone && !self.is_sending {
            self.phone = sanitize_phone_input(raw);
        }
    }

    /// Replace the phone field with the digits spoken in `transcript`.
    pub fn apply_phone_transcript(&mut self, transcript: &str) {
        self.set_phone_input(&transcript_to_digits(transcript));
    }

    #[must_use]
    pub fn can_send(&self) -> bool {
        self.phase == Phase::Phone && !self.is_sending && PhoneNumber::parse(&self.phone).is_ok()
    }

    /// # Errors
    ///
    /// `Validation` outside Phone or without exactly ten digits; `InFlight`
    /// while a send is outstanding.
    pub fn begin_send(&mut self) -> Result<PhoneNumber, AuthError> {
        if self.phase != Phase::Phone {
            return Err(AuthError::Validation("Phone number already submitted".to_owned()));
        }
        if self.is_sending {
            return Err(AuthError::InFlight);
        }
        let phone = PhoneNumber::parse(&self.phone)?;
        self.is_sending = true;
        Ok(phone)
    }

    /// Apply the send outcome; success enters Otp.
    ///
    /// # Errors
    ///
    /// Passes the send failure through; the flow stays in Phone.
    pub fn finish_send(&mut self, result: Result<(), AuthError>) -> Result<(), AuthError> {
        self.is_sending = false;
        result?;
        if self.phase == Phase::Phone {
            self.enter_otp();
        }
        Ok(())
    }

    fn enter_otp(&mut self) {
        self.phase = Phase::Otp;
        self.cells.clear();
        self.restart_countdown();
        log!("otp flow: entered otp phase");
    }

    fn restart_countdown(&mut self) {
        self.cooldown.restart(self.cooldown_secs);
        self.countdown_epoch += 1;
    }

    // =============================================================
    // Otp
    // =============================================================

    fn accepts_code_input(&self) -> bool {
        self.phase == Phase::Otp && !self.is_verifying
    }

    /// Returns the cell to focus next.
    pub fn input_cell(&mut self, index: usize, raw: &str) -> Option<usize> {
        if !self.accepts_code_input() {
            return None;
        }
        self.cells.input(index, raw)
    }

    #[must_use]
    pub fn backspace_cell(&self, index: usize) -> Option<usize> {
        if !self.accepts_code_input() {
            return None;
        }
        self.cells.backspace(index)
    }

    pub fn paste_code(&mut self, raw: &str) -> Option<usize> {
        if !self.accepts_code_input() {
            return None;
        }
        self.cells.paste(raw)
    }

    /// Fill cells from a cumulative voice transcript.
    ///
    /// Returns `true` when the result is final and all six digits are present,
    /// meaning verification should start.
    pub fn apply_code_transcript(&mut self, transcript: &str, is_final: bool) -> bool {
        if !self.accepts_code_input() {
            return false;
        }
        self.cells.fill_from(&transcript_to_digits(transcript));
        is_final && self.cells.is_complete()
    }

    #[must_use]
    pub fn can_verify(&self) -> bool {
        self.accepts_code_input() && self.cells.is_complete()
    }

    /// Mark verification as in flight and capture the request.
    ///
    /// # Errors
    ///
    /// `InFlight` while a verify is outstanding; `Validation` outside Otp or
    /// with fewer than six digits. Errors leave the state untouched.
    pub fn begin_verify(&mut self) -> Result<VerifyAttempt, AuthError> {
        if self.phase != Phase::Otp {
            return Err(AuthError::Validation("No code has been requested".to_owned()));
        }
        if self.is_verifying {
            return Err(AuthError::InFlight);
        }
        let code = self
            .cells
            .code()
            .ok_or_else(|| AuthError::Validation("Enter the 6-digit code".to_owned()))?;
        let phone = PhoneNumber::parse(&self.phone)?;
        self.is_verifying = true;
        Ok(VerifyAttempt { phone, code })
    }

    /// Apply the verify outcome; success enters Success.
    ///
    /// # Errors
    ///
    /// Passes the verify failure through; the phase and digits are kept.
    pub fn finish_verify(&mut self, result: Result<(), AuthError>) -> Result<(), AuthError> {
        self.is_verifying = false;
        result?;
        if self.phase == Phase::Otp {
            self.phase = Phase::Success;
            self.cooldown.stop();
            log!("otp flow: verified");
        }
        Ok(())
    }

    #[must_use]
    pub fn can_resend(&self) -> bool {
        self.accepts_code_input() && self.cooldown.is_ready()
    }

    /// Clear the cells, restart the cooldown, and return the number to resend to.
    ///
    /// # Errors
    ///
    /// `CooldownActive` while the countdown runs; `InFlight` during a verify;
    /// `Validation` outside Otp. No state changes on error.
    pub fn begin_resend(&mut self) -> Result<PhoneNumber, AuthError> {
        if self.phase != Phase::Otp {
            return Err(AuthError::Validation("No code has been requested".to_owned()));
        }
        if self.is_verifying {
            return Err(AuthError::InFlight);
        }
        if !self.cooldown.is_ready() {
            return Err(AuthError::CooldownActive { remaining: self.cooldown.remaining() });
        }
        let phone = PhoneNumber::parse(&self.phone)?;
        self.cells.clear();
        self.restart_countdown();
        Ok(phone)
    }

    /// One-second countdown tick from the ticker started for `epoch`.
    ///
    /// Returns whether that ticker should keep running. Ticks from a stale
    /// epoch or outside Otp change nothing.
    pub fn tick(&mut self, epoch: u64) -> bool {
        if self.phase != Phase::Otp || epoch != self.countdown_epoch {
            return false;
        }
        self.cooldown.tick() > 0
    }

    /// Return to Phone, keeping the number. Ignored while verifying.
    pub fn back(&mut self) -> bool {
        if !self.accepts_code_input() {
            return false;
        }
        self.phase = Phase::Phone;
        self.cells.clear();
        self.cooldown.stop();
        self.countdown_epoch += 1;
        true
    }

    // =============================================================
    // Success
    // =============================================================

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Success
    }
}
