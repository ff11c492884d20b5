pub mod algorithm;
pub mod edge_writer;
pub mod error;
pub mod graph;
pub mod parameters;
pub mod ranking;
pub mod weight_function;
pub mod weighted_sampler;

pub type Node = usize;
pub type Edge = (Node, Node);

pub mod prelude {
    use super::*;

    pub use super::{Edge, Node};
    pub use algorithm::{barabasi, skewed_graph, Algorithm};
    pub use edge_writer::EdgeWriter;
    pub use error::GraphError;
    pub use graph::Graph;
    pub use ranking::{rank_by_degree, DegreeRanking};
    pub use weight_function::WeightFunction;
}
