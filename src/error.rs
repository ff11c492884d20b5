use super::Node;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Cannot sample from {candidates} candidates with total weight {total}")]
    DegenerateWeights { candidates: usize, total: f64 },

    #[error("Weight {weight} of candidate {index} is negative or not finite")]
    InvalidWeight { index: usize, weight: f64 },

    #[error("Malformed adjacency at node {node}: {reason}")]
    MalformedGraph { node: Node, reason: String },
}

impl GraphError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        GraphError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(node: Node, reason: impl Into<String>) -> Self {
        GraphError::MalformedGraph {
            node,
            reason: reason.into(),
        }
    }
}
