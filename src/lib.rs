// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod consensus;
pub mod history;
pub mod metrics;
pub mod parse;
pub mod providers;
pub mod ratings;
pub mod sources;

// ---- Re-exports for stable public API ----
pub use crate::consensus::compute_consensus;
pub use crate::parse::parse_rating_value;
pub use crate::ratings::{ConsensusResult, RatingBundle, RatingObservation};
pub use crate::sources::RatingSource;
