//! Fake-news classifier.
//!
//! A fitted binary logistic regression over embedding vectors. The artifact is a
//! JSON document exported from the training side:
//!
//! ```json
//! { "coef": [0.12, -0.4, ...], "intercept": -0.03, "classes": [0, 1] }
//! ```
//!
//! `coef` may also be the single-row matrix form (`[[...]]`). The probability
//! reported is that of class `1` ("fake").

pub mod error;
pub mod logistic;


pub use error::ClassifierError;
pub use logistic::{ClassifierArtifact, LogisticRegression};
