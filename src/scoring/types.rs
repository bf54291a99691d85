use serde::{Serialize, Serializer};

use super::fuser::{fuse, predicted_label};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Binary prediction. Serialized as `0` / `1`.
pub enum FakeLabel {
    Real,
    Fake,
}

impl FakeLabel {
    pub fn as_u8(self) -> u8 {
        match self {
            FakeLabel::Real => 0,
            FakeLabel::Fake => 1,
        }
    }
}

impl Serialize for FakeLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

/// Successful prediction, as returned by `POST /predict`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    /// Text recovered from the uploaded image (empty without an image).
    pub extracted_text: String,
    /// Classifier probability of the "fake" class.
    pub prob_fake: f64,
    /// `1` iff `prob_fake > 0.5`.
    pub pred_label: FakeLabel,
    /// Probability fused with source credibility.
    pub final_score: f64,
}

impl ScoreResult {
    /// Derives the label and fused score from the two inputs.
    pub fn new(extracted_text: String, prob_fake: f64, credibility: f64) -> Self {
        Self {
            extracted_text,
            prob_fake,
            pred_label: predicted_label(prob_fake),
            final_score: fuse(prob_fake, credibility),
        }
    }
}
