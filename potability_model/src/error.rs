use thiserror::Error;

/// Errors produced while loading or evaluating the model artifacts
#[derive(Debug, Error)]
pub enum ModelError {
    /// The artifact was not valid JSON or did not match the expected layout
    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    /// The scaler parameters cannot be used
    #[error("invalid scaler: {0}")]
    InvalidScaler(String),
    /// The ensemble definition cannot be used
    #[error("invalid ensemble: {0}")]
    InvalidEnsemble(String),
    /// A regression tree is malformed
    #[error("invalid tree {tree} at node {node}: {reason}")]
    InvalidTree {
        /// index of the tree within its estimator
        tree: usize,
        /// index of the offending node
        node: usize,
        /// what is wrong with the node
        reason: &'static str,
    },
    /// A computation produced NaN or infinity
    #[error("non-finite value produced while {0}")]
    NonFinite(&'static str),
}
