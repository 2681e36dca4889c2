//! Session application services.
//!
//! This module contains the session synchronizer, the single owner of the
//! current-session state and of the read/write protocol across the remote
//! gateway and the local mirror.

mod synchronizer;

pub use synchronizer::SessionSynchronizer;
