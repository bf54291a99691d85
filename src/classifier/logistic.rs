use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use super::error::ClassifierError;
use crate::constants::validate_embedding_dim;

/// Coefficients as exported: either a flat vector or a one-row matrix.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Coefficients {
    Flat(Vec<f64>),
    Rows(Vec<Vec<f64>>),
}

/// Intercept as exported: a scalar or a one-element vector.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Intercept {
    Scalar(f64),
    Vector(Vec<f64>),
}

/// On-disk classifier artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierArtifact {
    coef: Coefficients,
    intercept: Intercept,
    #[serde(default)]
    classes: Option<Vec<i64>>,
}

impl ClassifierArtifact {
    fn into_parts(self) -> Result<(Vec<f64>, f64), ClassifierError> {
        if let Some(classes) = &self.classes
            && classes.as_slice() != [0, 1]
        {
            return Err(ClassifierError::InvalidArtifact {
                reason: format!("expected binary classes [0, 1], got {:?}", classes),
            });
        }

        let weights = match self.coef {
            Coefficients::Flat(w) => w,
            Coefficients::Rows(mut rows) => {
                if rows.len() != 1 {
                    return Err(ClassifierError::InvalidArtifact {
                        reason: format!("expected exactly one coefficient row, got {}", rows.len()),
                    });
                }
                rows.remove(0)
            }
        };

        let bias = match self.intercept {
            Intercept::Scalar(b) => b,
            Intercept::Vector(v) if v.len() == 1 => v[0],
            Intercept::Vector(v) => {
                return Err(ClassifierError::InvalidArtifact {
                    reason: format!("expected a single intercept, got {}", v.len()),
                });
            }
        };

        Ok((weights, bias))
    }
}

/// Binary logistic regression: `p(fake) = σ(w·x + b)`.
///
/// Immutable once built.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    weights: Vec<f64>,
    bias: f64,
}

impl LogisticRegression {
    /// Builds a classifier from explicit coefficients.
    pub fn new(weights: Vec<f64>, bias: f64) -> Result<Self, ClassifierError> {
        if weights.is_empty() {
            return Err(ClassifierError::InvalidArtifact {
                reason: "coefficient vector is empty".to_string(),
            });
        }

        if !bias.is_finite() || weights.iter().any(|w| !w.is_finite()) {
            return Err(ClassifierError::InvalidArtifact {
                reason: "coefficients must be finite".to_string(),
            });
        }

        Ok(Self { weights, bias })
    }

    /// Parses an artifact from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ClassifierError> {
        let artifact: ClassifierArtifact = serde_json::from_str(json)?;
        let (weights, bias) = artifact.into_parts()?;
        Self::new(weights, bias)
    }

    /// Loads an artifact from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ClassifierError::ArtifactNotFound {
                path: path.to_path_buf(),
            });
        }

        let json = std::fs::read_to_string(path).map_err(|source| {
            ClassifierError::ArtifactRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let model = Self::from_json(&json)?;

        info!(
            path = %path.display(),
            input_dim = model.input_dim(),
            "Classifier loaded"
        );

        Ok(model)
    }

    /// Number of features the classifier expects.
    pub fn input_dim(&self) -> usize {
        self.weights.len()
    }

    /// Startup check that the embedder feeds vectors of the right length.
    pub fn ensure_input_dim(&self, embedding_dim: usize) -> Result<(), ClassifierError> {
        validate_embedding_dim(embedding_dim, self.input_dim()).map_err(|_| {
            ClassifierError::DimensionMismatch {
                expected: self.input_dim(),
                actual: embedding_dim,
            }
        })
    }

    /// Probability that `features` describes fake news, in `[0, 1]`.
    pub fn predict_proba(&self, features: &[f32]) -> Result<f64, ClassifierError> {
        if features.len() != self.weights.len() {
            return Err(ClassifierError::DimensionMismatch {
                expected: self.weights.len(),
                actual: features.len(),
            });
        }

        let logit = self
            .weights
            .iter()
            .zip(features)
            .fold(self.bias, |acc, (w, x)| acc + w * f64::from(*x));

        let prob = sigmoid(logit);
        debug!(logit = logit, prob_fake = prob, "Classified embedding");
        Ok(prob)
    }
}

/// Logistic function, stable for large `|x|`.
pub(crate) fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}
