//! Reusable UI components.
//!
//! DESIGN
//! ======
//! Components render state they are handed and report user intent through
//! callbacks; flow transitions stay in the pages that own the state.

pub mod notice;
pub mod otp_inputs;
pub mod voice_button;
