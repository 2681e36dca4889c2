//! Core domain layer for Lookbook.
//!
//! Contains the session and catalog domain models, the transport mapping,
//! the gateway/store contracts, and the shared error type. Everything here
//! is storage- and transport-agnostic; concrete HTTP clients live in
//! `lookbook-gateway` and local persistence in `lookbook-infrastructure`.

pub mod catalog;
pub mod error;
pub mod session;

// Re-export common error type
pub use error::LookbookError;
