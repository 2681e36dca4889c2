//! Application services for Lookbook.
//!
//! Orchestrates the core contracts into the flows the wizard shell drives:
//! the session synchronizer (current-session state, incremental updates,
//! load-with-fallback) and the recommendation board service.

pub mod recommendation;
pub mod session;

pub use recommendation::RecommendationService;
pub use session::SessionSynchronizer;
