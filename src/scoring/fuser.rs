use crate::constants::{CREDIBILITY_WEIGHT, LABEL_THRESHOLD, PROB_WEIGHT};

use super::types::FakeLabel;

/// `0.7 * prob_fake + 0.3 * credibility`.
pub fn fuse(prob_fake: f64, credibility: f64) -> f64 {
    PROB_WEIGHT * prob_fake + CREDIBILITY_WEIGHT * credibility
}

/// Fake only when `prob_fake` is strictly above the threshold.
pub fn predicted_label(prob_fake: f64) -> FakeLabel {
    if prob_fake > LABEL_THRESHOLD {
        FakeLabel::Fake
    } else {
        FakeLabel::Real
    }
}
