use super::prelude::*;
use itertools::Itertools;
use std::io::Write;

pub trait EdgeWriter {
    fn add_edge(&mut self, u: Node, v: Node);
}

/// Forwards every edge to both writers.
impl<A: EdgeWriter, B: EdgeWriter> EdgeWriter for (A, B) {
    fn add_edge(&mut self, u: Node, v: Node) {
        self.0.add_edge(u, v);
        self.1.add_edge(u, v);
    }
}

#[derive(Default, Clone, Debug)]
pub struct EdgeCounter {
    number_of_edges: usize,
}

impl EdgeWriter for EdgeCounter {
    fn add_edge(&mut self, _u: Node, _v: Node) {
        self.number_of_edges += 1;
    }
}

impl EdgeCounter {
    pub fn number_of_edges(&self) -> usize {
        self.number_of_edges
    }
}

#[derive(Clone, Debug)]
pub struct DegreeCount {
    number_of_edges: usize,
    degrees: Vec<usize>,
}

impl DegreeCount {
    pub fn new(number_of_nodes: usize) -> Self {
        Self {
            number_of_edges: 0,
            degrees: vec![0; number_of_nodes],
        }
    }

    pub fn degrees(&self) -> &[usize] {
        &self.degrees
    }

    pub fn number_of_edges(&self) -> usize {
        self.number_of_edges
    }

    pub fn degree_distribution(&self) -> Vec<(usize, usize)> {
        degree_distribution(self.degrees.iter().copied())
    }

    pub fn report_distribution(&self, writer: &mut impl Write) -> std::io::Result<()> {
        let degree_distr = self.degree_distribution();
        report_distribution(&degree_distr, writer)
    }
}

impl EdgeWriter for DegreeCount {
    fn add_edge(&mut self, u: Node, v: Node) {
        self.number_of_edges += 1;
        self.degrees[u] += 1;
        self.degrees[v] += 1;
    }
}

/// Pairs `(degree, number of nodes with that degree)`, sorted by degree.
pub fn degree_distribution(degrees: impl Iterator<Item = Node>) -> Vec<(usize, usize)> {
    let mut counts = degrees.counts().into_iter().collect_vec();
    counts.sort_unstable();
    counts
}

pub fn report_distribution(
    degree_distr: &[(usize, usize)],
    writer: &mut impl Write,
) -> std::io::Result<()> {
    writer.write_all(
        degree_distr
            .iter()
            .map(|&(d, n)| format!("#DD {:>10}, {:>10}\n", d, n))
            .join("")
            .as_bytes(),
    )?;
    Ok(())
}

/// One line per node: `index [n1, n2, ...]`.
pub fn write_adjacency(graph: &Graph, writer: &mut impl Write) -> std::io::Result<()> {
    for (u, neighbors) in graph.adjacency().iter().enumerate() {
        writeln!(writer, "{} [{}]", u, neighbors.iter().join(", "))?;
    }
    Ok(())
}

/// One line per undirected edge: `u v` with `u < v`.
pub fn write_edge_list(graph: &Graph, writer: &mut impl Write) -> std::io::Result<()> {
    for (u, v) in graph.edges() {
        writeln!(writer, "{} {}", u, v)?;
    }
    Ok(())
}
