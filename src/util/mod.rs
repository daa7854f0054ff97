//! Utility helpers shared across client modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (timers, geolocation,
//! clocks) from flow and page logic to keep the latter testable natively.

pub mod auth;
pub mod geolocation;
pub mod time;
pub mod timer;
