//! Session domain module.
//!
//! This module contains the session entity, its transport mapping, and the
//! contracts for the two persistence tiers (remote gateway, local store).
//!
//! # Module Structure
//!
//! - `model`: Core session domain model (`Session`, `SelectionField`, `SessionPatch`)
//! - `transport`: Loosely-typed payload (de)serialization
//! - `gateway`: Remote session service contract (`SessionGateway`)
//! - `store`: Local persistent mirror contract (`SessionStore`)

mod gateway;
mod model;
mod store;
mod transport;

// Re-export public API
pub use gateway::SessionGateway;
pub use model::{SelectionField, Session, SessionPatch};
pub use store::{SESSION_DATA_KEY, SESSION_ID_KEY, SessionStore};
