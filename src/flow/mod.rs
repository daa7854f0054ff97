//! The phone → OTP → success login flow.
//!
//! ARCHITECTURE
//! ============
//! `machine` is the pure state machine; `controller` runs the network calls
//! between its `begin_*` / `finish_*` transitions and owns the persistence
//! hooks. `phone`, `otp_cells`, and `cooldown` are the per-phase input models.

pub mod controller;
pub mod cooldown;
pub mod machine;
pub mod otp_cells;
pub mod phone;
