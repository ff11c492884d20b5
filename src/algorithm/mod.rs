//! Growth of a skewed preferential-attachment graph.
//!
//! The seed is a clique on the first `m` nodes. Every further node `n` picks `m`
//! distinct hosts among `0..n`, each draw proportional to `degree^exponent` over the
//! hosts not drawn yet, and is connected to all of them. Degrees seen by node `n + 1`
//! include every edge added by node `n`.

use super::prelude::*;
use crate::graph::GraphRecorder;
use crate::parameters::Parameters;
use crate::weight_function::WeightFunction;
use rand::Rng;

pub mod algo_fenwick;
pub mod algo_linear_scan;

pub trait Algorithm<R: Rng>: Sized {
    fn new(
        rng: R,
        num_nodes: Node,
        initial_degree: Node,
        weight_function: WeightFunction,
    ) -> Result<Self, GraphError>;

    /// Streams the edges of a fresh graph into `writer`: first the seed clique, then `initial_degree` edges per new node.
    fn run(&mut self, writer: &mut impl EdgeWriter) -> Result<(), GraphError>;

    /// Degrees after the last `run`.
    fn degrees(&self) -> &[Node];

    fn num_nodes(&self) -> Node;

    fn from_parameters(rng: R, opt: &Parameters) -> Result<Self, GraphError> {
        Self::new(
            rng,
            opt.nodes,
            opt.initial_degree,
            WeightFunction::new(opt.exponent),
        )
    }

    /// Runs the construction and collects the adjacency lists. On error no graph is returned.
    fn build(mut self) -> Result<Graph, GraphError> {
        let mut recorder = GraphRecorder::new(self.num_nodes());
        self.run(&mut recorder)?;
        Ok(recorder.into_graph())
    }
}

pub fn check_parameters(
    num_nodes: Node,
    initial_degree: Node,
    weight_function: &WeightFunction,
) -> Result<(), GraphError> {
    if num_nodes < 1 {
        return Err(GraphError::invalid_parameter(
            "nodes",
            "at least one node is required",
        ));
    }

    if initial_degree < 1 {
        return Err(GraphError::invalid_parameter(
            "initial_degree",
            "each new node has to add at least one edge",
        ));
    }

    if initial_degree > num_nodes {
        return Err(GraphError::invalid_parameter(
            "initial_degree",
            format!(
                "seed clique of {} nodes does not fit into {} nodes",
                initial_degree, num_nodes
            ),
        ));
    }

    if !weight_function.exponent().is_finite() {
        return Err(GraphError::invalid_parameter(
            "exponent",
            format!("{} is not finite", weight_function.exponent()),
        ));
    }

    Ok(())
}

/// Number of edges `run` produces: the seed clique plus `initial_degree` per grown node.
pub fn expected_number_of_edges(num_nodes: Node, initial_degree: Node) -> usize {
    let seed = initial_degree.min(num_nodes);
    seed * (seed - 1) / 2 + (num_nodes - seed) * initial_degree
}

/// Emits the clique on `0..seed_nodes` (row by row, smaller endpoint second) and
/// sets the seed degrees.
pub(crate) fn emit_seed_clique(
    seed_nodes: Node,
    degrees: &mut [Node],
    writer: &mut impl EdgeWriter,
) {
    for u in 1..seed_nodes {
        for v in 0..u {
            writer.add_edge(u, v);
        }
    }

    for degree in &mut degrees[..seed_nodes] {
        *degree = seed_nodes - 1;
    }
}

/// Builds a graph with `num_nodes` nodes, each new node attaching `initial_degree`
/// edges with probability proportional to `degree^exponent`.
///
/// # Example
/// ```
/// use pcg_rand::Pcg64;
/// use rand::SeedableRng;
/// use skew_graph::prelude::*;
///
/// let mut rng = Pcg64::seed_from_u64(7);
/// let graph = skewed_graph(&mut rng, 50, 2, 1.5).unwrap();
///
/// assert_eq!(graph.number_of_nodes(), 50);
/// assert_eq!(graph.number_of_edges(), 1 + 48 * 2);
/// ```
pub fn skewed_graph<R: Rng>(
    rng: R,
    num_nodes: Node,
    initial_degree: Node,
    exponent: f64,
) -> Result<Graph, GraphError> {
    algo_linear_scan::AlgoLinearScan::new(
        rng,
        num_nodes,
        initial_degree,
        WeightFunction::new(exponent),
    )?
    .build()
}

/// Barabási-Albert graph, i.e. [`skewed_graph`] with exponent 1.
pub fn barabasi<R: Rng>(rng: R, num_nodes: Node, initial_degree: Node) -> Result<Graph, GraphError> {
    skewed_graph(rng, num_nodes, initial_degree, 1.0)
}
