use super::prelude::*;
use itertools::Itertools;

/// Undirected simple graph stored as one neighbor list per node.
///
/// Node ids are the dense positions `0..number_of_nodes()`. A `Graph` is only
/// handed out in a valid state: every edge appears in both endpoint lists, there
/// are no self-loops and no list contains a neighbor twice.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<Vec<Node>>,
}

impl Graph {
    /// Takes ownership of caller-supplied neighbor lists after checking the invariants.
    ///
    /// # Example
    /// ```
    /// use skew_graph::graph::Graph;
    ///
    /// let graph = Graph::from_adjacency(vec![vec![1, 2], vec![0], vec![0]]).unwrap();
    /// assert_eq!(graph.number_of_edges(), 2);
    ///
    /// assert!(Graph::from_adjacency(vec![vec![1], vec![]]).is_err());
    /// ```
    pub fn from_adjacency(adjacency: Vec<Vec<Node>>) -> Result<Self, GraphError> {
        let graph = Self { adjacency };
        graph.check_invariants()?;
        Ok(graph)
    }

    pub(crate) fn from_adjacency_unchecked(adjacency: Vec<Vec<Node>>) -> Self {
        let graph = Self { adjacency };
        debug_assert!(graph.check_invariants().is_ok());
        graph
    }

    pub fn number_of_nodes(&self) -> Node {
        self.adjacency.len()
    }

    pub fn number_of_edges(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn neighbors(&self, node: Node) -> &[Node] {
        &self.adjacency[node]
    }

    pub fn degree(&self, node: Node) -> Node {
        self.adjacency[node].len()
    }

    pub fn degrees(&self) -> Vec<Node> {
        self.adjacency.iter().map(Vec::len).collect()
    }

    pub fn max_degree(&self) -> Node {
        self.adjacency.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn has_edge(&self, u: Node, v: Node) -> bool {
        self.adjacency
            .get(u)
            .map_or(false, |neighbors| neighbors.contains(&v))
    }

    pub fn adjacency(&self) -> &[Vec<Node>] {
        &self.adjacency
    }

    /// Each undirected edge exactly once, as `(u, v)` with `u < v`.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.adjacency.iter().enumerate().flat_map(|(u, neighbors)| {
            neighbors
                .iter()
                .copied()
                .filter(move |&v| u < v)
                .map(move |v| (u, v))
        })
    }

    pub fn check_invariants(&self) -> Result<(), GraphError> {
        let n = self.number_of_nodes();

        for (u, neighbors) in self.adjacency.iter().enumerate() {
            for &v in neighbors {
                if v >= n {
                    return Err(GraphError::malformed(
                        u,
                        format!("neighbor {} out of range for {} nodes", v, n),
                    ));
                }

                if v == u {
                    return Err(GraphError::malformed(u, "self-loop"));
                }

                if !self.adjacency[v].contains(&u) {
                    return Err(GraphError::malformed(
                        u,
                        format!("edge to {} is missing its reverse", v),
                    ));
                }
            }

            if let Some(duplicate) = neighbors.iter().sorted_unstable().tuple_windows().find_map(
                |(a, b)| if a == b { Some(*a) } else { None },
            ) {
                return Err(GraphError::malformed(
                    u,
                    format!("neighbor {} listed twice", duplicate),
                ));
            }
        }

        Ok(())
    }
}

/// Construction-time sink that materializes the streamed edges as neighbor lists.
///
/// For an edge `(u, v)` it appends `v` to the list of `u` and `u` to the list of `v`,
/// so a new node's list ends up holding its hosts in the order they were drawn.
#[derive(Clone, Debug)]
pub struct GraphRecorder {
    adjacency: Vec<Vec<Node>>,
}

impl GraphRecorder {
    pub fn new(number_of_nodes: Node) -> Self {
        Self {
            adjacency: vec![Vec::new(); number_of_nodes],
        }
    }

    pub fn into_graph(self) -> Graph {
        Graph::from_adjacency_unchecked(self.adjacency)
    }
}

impl EdgeWriter for GraphRecorder {
    fn add_edge(&mut self, u: Node, v: Node) {
        self.adjacency[u].push(v);
        self.adjacency[v].push(u);
    }
}
