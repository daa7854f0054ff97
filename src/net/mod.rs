//! Networking modules for the marketplace REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` defines the auth gateway port and its HTTP implementation, and
//! `types` defines the request/response wire schema.

pub mod api;
pub mod types;
