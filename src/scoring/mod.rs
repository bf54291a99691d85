//! Source credibility and score fusion.
//!
//! Both stages are pure functions over already-computed values: the classifier's
//! `prob_fake` and the caller-supplied source string. See
//! [`crate::constants`] for the fixed weights and scores.

pub mod fuser;
pub mod trust;
pub mod types;

#[cfg(test)]
mod tests;

pub use fuser::{fuse, predicted_label};
pub use trust::{TrustTable, source_score};
pub use types::{FakeLabel, ScoreResult};
