//! Shared client-side session state.
//!
//! DESIGN
//! ======
//! `auth` owns who is logged in, `account` owns which side of the marketplace
//! the session is acting as. Both are services over `SessionStore` with an
//! explicit lifecycle, provided to the component tree from `App`.

pub mod account;
pub mod auth;
