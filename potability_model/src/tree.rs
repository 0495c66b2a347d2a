use serde::Deserialize;

use crate::{FEATURE_COUNT, FeatureVector, ModelError};

/// A node of a [RegressionTree]
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Go to `left` when `features[feature] < threshold`, otherwise go to `right`
    Split {
        /// index into the feature vector
        feature: usize,
        /// split point
        threshold: f64,
        /// node index taken when the feature is below the threshold
        left: usize,
        /// node index taken otherwise
        right: usize,
    },
    /// Terminal node contributing `value` to the margin
    Leaf {
        /// margin contribution
        value: f64,
    },
}

/// A single boosted regression tree stored as a flat node list rooted at index 0
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RegressionTree {
    nodes: Vec<Node>,
}

impl RegressionTree {
    /// Construct a tree, checking that every path from the root ends in a leaf
    pub fn new(nodes: Vec<Node>) -> Result<Self, ModelError> {
        let tree = Self { nodes };
        tree.validate(0)?;
        Ok(tree)
    }

    /// Children must point strictly forward, which rules out cycles and guarantees that
    /// [Self::evaluate] terminates.
    pub(crate) fn validate(&self, tree: usize) -> Result<(), ModelError> {
        let invalid = |node, reason| ModelError::InvalidTree { tree, node, reason };

        if self.nodes.is_empty() {
            return Err(invalid(0, "tree has no nodes"));
        }

        for (index, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= FEATURE_COUNT {
                        return Err(invalid(index, "feature index out of range"));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(index, "threshold is not finite"));
                    }
                    if left <= index || right <= index {
                        return Err(invalid(index, "child does not point forward"));
                    }
                    if left >= self.nodes.len() || right >= self.nodes.len() {
                        return Err(invalid(index, "child index out of range"));
                    }
                }
                Node::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(invalid(index, "leaf value is not finite"));
                    }
                }
            }
        }

        Ok(())
    }

    /// Walk the tree and return the value of the leaf reached
    pub(crate) fn evaluate(&self, features: &FeatureVector) -> f64 {
        let mut index = 0;
        loop {
            match self.nodes[index] {
                Node::Leaf { value } => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if features.get(feature) < threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stump() -> RegressionTree {
        RegressionTree::new(vec![
            Node::Split {
                feature: 0,
                threshold: 0.5,
                left: 1,
                right: 2,
            },
            Node::Leaf { value: -1.0 },
            Node::Leaf { value: 2.0 },
        ])
        .unwrap()
    }

    #[test]
    fn goes_left_below_threshold() {
        let tree = stump();
        assert_eq!(tree.evaluate(&FeatureVector([0.4, 0.0, 0.0])), -1.0);
        assert_eq!(tree.evaluate(&FeatureVector([0.5, 0.0, 0.0])), 2.0);
    }

    #[test]
    fn parses_untagged_nodes() {
        let tree: RegressionTree = serde_json::from_str(
            r#"{"nodes":[{"feature":2,"threshold":1.0,"left":1,"right":2},{"value":0.25},{"value":-0.25}]}"#,
        )
        .unwrap();
        tree.validate(0).unwrap();
        assert_eq!(tree.evaluate(&FeatureVector([0.0, 0.0, 3.0])), -0.25);
    }

    #[test]
    fn rejects_cycles() {
        let err = RegressionTree::new(vec![
            Node::Split {
                feature: 0,
                threshold: 0.0,
                left: 1,
                right: 0,
            },
            Node::Leaf { value: 1.0 },
        ])
        .unwrap_err();

        assert!(matches!(
            err,
            ModelError::InvalidTree {
                node: 0,
                reason: "child does not point forward",
                ..
            }
        ));
    }

    #[test]
    fn rejects_unknown_feature() {
        let err = RegressionTree::new(vec![
            Node::Split {
                feature: 3,
                threshold: 0.0,
                left: 1,
                right: 2,
            },
            Node::Leaf { value: 1.0 },
            Node::Leaf { value: 1.0 },
        ])
        .unwrap_err();
        assert!(err.to_string().contains("feature index out of range"));
    }

    #[test]
    fn rejects_dangling_child() {
        let err = RegressionTree::new(vec![Node::Split {
            feature: 0,
            threshold: 0.0,
            left: 1,
            right: 2,
        }])
        .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn rejects_empty_tree() {
        assert!(RegressionTree::new(vec![]).is_err());
    }
}
