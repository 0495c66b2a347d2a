#![deny(missing_docs)]
//! Potability classification for water samples.
//!
//! A prediction runs the fixed three element feature vector through a fitted [Scaler] and then a
//! [Classifier]. Both are loaded once from JSON artifacts and are read-only afterwards, so a
//! single [PotabilityPredictor] can be shared across every invocation of a warm lambda.

mod classifier;
mod error;
mod features;
mod predictor;
mod scaler;
mod tree;

pub use classifier::{Classifier, Estimator, Voting, VotingClassifier};
pub use error::ModelError;
pub use features::{FEATURE_COUNT, FeatureVector};
pub use predictor::{DefaultPredictor, PotabilityPredictor};
pub use scaler::{Scaler, StandardScaler};
pub use tree::{Node, RegressionTree};
