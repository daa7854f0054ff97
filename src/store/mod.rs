//! Durable key/value persistence for session state.
//!
//! DESIGN
//! ======
//! `kv` is the storage port with browser and in-memory adapters; `session`
//! maps the auth core's typed values onto plain string keys.

pub mod kv;
pub mod session;
