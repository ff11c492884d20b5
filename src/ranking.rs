//! Relabels nodes so that lower ids carry higher degrees.
//!
//! Nodes are ordered by a stable sort on descending degree, so nodes of equal
//! degree keep their relative order (ascending original id).

use super::prelude::*;
use itertools::Itertools;
use std::cmp::Reverse;
use tracing::debug;

/// Permutation `old id -> new id` induced by sorting on descending degree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DegreeRanking {
    new_index: Vec<Node>,
    old_index: Vec<Node>,
}

impl DegreeRanking {
    pub fn new(graph: &Graph) -> Self {
        let mut old_index: Vec<Node> = (0..graph.number_of_nodes()).collect();
        old_index.sort_by_key(|&u| Reverse(graph.degree(u)));

        let mut new_index = vec![0; old_index.len()];
        for (rank, &old) in old_index.iter().enumerate() {
            new_index[old] = rank;
        }

        Self {
            new_index,
            old_index,
        }
    }

    pub fn len(&self) -> usize {
        self.new_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.new_index.is_empty()
    }

    pub fn new_index(&self, old: Node) -> Node {
        self.new_index[old]
    }

    pub fn old_index(&self, new: Node) -> Node {
        self.old_index[new]
    }

    /// Rewrites `graph` under this ranking.
    ///
    /// Fails if the node count differs or if the relabeled degrees would not be
    /// non-increasing. Any graph whose degrees the ranking still sorts is accepted, so
    /// a different graph with a compatible degree sequence is relabeled as well.
    pub fn apply(&self, graph: &Graph) -> Result<Graph, GraphError> {
        if graph.number_of_nodes() != self.len() {
            return Err(GraphError::invalid_parameter(
                "graph",
                format!(
                    "ranking covers {} nodes but the graph has {}",
                    self.len(),
                    graph.number_of_nodes()
                ),
            ));
        }

        if let Some((new, _)) = self
            .old_index
            .iter()
            .map(|&old| graph.degree(old))
            .tuple_windows()
            .enumerate()
            .find(|(_, (a, b))| a < b)
        {
            return Err(GraphError::invalid_parameter(
                "graph",
                format!(
                    "ranking does not sort the degrees of this graph (positions {} and {})",
                    new,
                    new + 1
                ),
            ));
        }

        Ok(self.relabel(graph))
    }

    fn relabel(&self, graph: &Graph) -> Graph {
        let adjacency = self
            .old_index
            .iter()
            .map(|&old| {
                graph
                    .neighbors(old)
                    .iter()
                    .map(|&v| self.new_index[v])
                    .collect()
            })
            .collect();

        Graph::from_adjacency_unchecked(adjacency)
    }
}

/// Returns an isomorphic copy of `graph` whose degrees are non-increasing in the node id.
///
/// # Example
/// ```
/// use skew_graph::prelude::*;
///
/// let star = Graph::from_adjacency(vec![vec![3], vec![3], vec![3], vec![0, 1, 2]]).unwrap();
/// let ranked = rank_by_degree(&star);
///
/// assert_eq!(ranked.neighbors(0), &[1, 2, 3]);
/// assert_eq!(ranked.degrees(), vec![3, 1, 1, 1]);
/// ```
pub fn rank_by_degree(graph: &Graph) -> Graph {
    let ranking = DegreeRanking::new(graph);
    debug!(
        nodes = graph.number_of_nodes(),
        max_degree = graph.max_degree(),
        "relabeling by descending degree"
    );
    ranking.relabel(graph)
}

#[cfg(test)]
mod test {
    use super::*;

    fn example() -> Graph {
        Graph::from_adjacency(vec![
            vec![1, 2, 3],
            vec![0, 4],
            vec![0, 3],
            vec![0, 2, 4],
            vec![3, 1],
        ])
        .unwrap()
    }

    #[test]
    fn ties_keep_original_order() {
        let ranking = DegreeRanking::new(&example());

        // degrees 3, 2, 2, 3, 2
        assert_eq!((0..5).map(|u| ranking.new_index(u)).collect_vec(), vec![0, 2, 3, 1, 4]);
        assert_eq!((0..5).map(|u| ranking.old_index(u)).collect_vec(), vec![0, 3, 1, 2, 4]);
    }

    #[test]
    fn relabels_neighbor_lists() {
        let ranked = rank_by_degree(&example());

        assert_eq!(
            ranked.adjacency(),
            &[
                vec![2, 3, 1],
                vec![0, 3, 4],
                vec![0, 4],
                vec![0, 1],
                vec![1, 2],
            ]
        );
        assert!(ranked.check_invariants().is_ok());
    }

    #[test]
    fn preserves_structure() {
        let graph = example();
        let ranking = DegreeRanking::new(&graph);
        let ranked = ranking.apply(&graph).unwrap();

        assert_eq!(ranked.number_of_nodes(), graph.number_of_nodes());
        assert_eq!(ranked.number_of_edges(), graph.number_of_edges());
        assert!(ranked.degrees().windows(2).all(|w| w[0] >= w[1]));

        for (u, v) in graph.edges() {
            assert!(ranked.has_edge(ranking.new_index(u), ranking.new_index(v)));
        }
    }

    #[test]
    fn apply_rejects_other_graph() {
        let ranking = DegreeRanking::new(&example());
        let other = Graph::from_adjacency(vec![vec![1], vec![0]]).unwrap();
        assert!(matches!(
            ranking.apply(&other),
            Err(GraphError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn apply_rejects_unsorted_degrees() {
        // same size as the example, but node 4 is now the only hub
        let star = Graph::from_adjacency(vec![vec![4], vec![4], vec![4], vec![4], vec![0, 1, 2, 3]])
            .unwrap();
        let ranking = DegreeRanking::new(&example());

        assert!(matches!(
            ranking.apply(&star),
            Err(GraphError::InvalidParameter { name: "graph", .. })
        ));
        assert_eq!(ranking.apply(&example()).unwrap(), rank_by_degree(&example()));
    }

    #[test]
    fn empty_graph() {
        let ranked = rank_by_degree(&Graph::default());
        assert!(ranked.is_empty());
    }
}
