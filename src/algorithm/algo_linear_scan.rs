use super::*;
use crate::weighted_sampler::WeightedSampler;
use tracing::{debug, trace};

/// Reference construction: the weights of all existing nodes are recomputed
/// once per new node and handed to [`WeightedSampler`]. Costs `O(n)` per node.
pub struct AlgoLinearScan<R: Rng> {
    rng: R,
    num_nodes: Node,
    initial_degree: Node,
    weight_function: WeightFunction,

    degrees: Vec<Node>,
    weights: Vec<f64>,
    sampler: WeightedSampler,
}

impl<R: Rng> Algorithm<R> for AlgoLinearScan<R> {
    fn new(
        rng: R,
        num_nodes: Node,
        initial_degree: Node,
        weight_function: WeightFunction,
    ) -> Result<Self, GraphError> {
        check_parameters(num_nodes, initial_degree, &weight_function)?;

        Ok(Self {
            rng,
            num_nodes,
            initial_degree,
            weight_function,

            degrees: vec![0; num_nodes],
            weights: Vec::with_capacity(num_nodes),
            sampler: WeightedSampler::new(),
        })
    }

    fn run(&mut self, writer: &mut impl EdgeWriter) -> Result<(), GraphError> {
        debug!(
            nodes = self.num_nodes,
            initial_degree = self.initial_degree,
            exponent = self.weight_function.exponent(),
            regime = ?self.weight_function.regime(),
            "linear scan construction"
        );

        self.degrees.iter_mut().for_each(|d| *d = 0);
        emit_seed_clique(self.initial_degree, &mut self.degrees, writer);

        let mut hosts = Vec::with_capacity(self.initial_degree);

        for new_node in self.initial_degree..self.num_nodes {
            self.weights.clear();
            self.weights.extend(
                self.degrees[..new_node]
                    .iter()
                    .map(|&d| self.weight_function.get(d)),
            );

            self.sampler.select_distinct_into(
                &mut self.rng,
                &self.weights,
                self.initial_degree,
                &mut hosts,
            )?;

            // update neighbors
            for &h in &hosts {
                self.degrees[h] += 1;
                writer.add_edge(new_node, h);
            }

            self.degrees[new_node] = self.initial_degree;
            trace!(node = new_node, hosts = ?hosts, "attached");
        }

        debug!(
            max_degree = self.degrees.iter().copied().max().unwrap_or(0),
            "construction finished"
        );

        Ok(())
    }

    fn degrees(&self) -> &[Node] {
        &self.degrees
    }

    fn num_nodes(&self) -> Node {
        self.num_nodes
    }
}

#[cfg(test)]
mod test {
    use super::super::test_utils::assert_valid;
    use super::*;
    use crate::edge_writer::DegreeCount;
    use pcg_rand::Pcg64;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;

    #[test]
    fn always_first_candidate() {
        // every draw lands at the lower edge and takes the first remaining candidate
        let graph = AlgoLinearScan::new(StepRng::new(0, 0), 5, 2, WeightFunction::linear())
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(
            graph.adjacency(),
            &[
                vec![1, 2, 3, 4],
                vec![0, 2, 3, 4],
                vec![0, 1],
                vec![0, 1],
                vec![0, 1],
            ]
        );
        assert_valid(&graph, 5, 2);
    }

    #[test]
    fn degrees_match_writer() {
        let mut algo =
            AlgoLinearScan::new(Pcg64::seed_from_u64(11), 300, 3, WeightFunction::new(1.3))
                .unwrap();
        let mut writer = DegreeCount::new(300);
        algo.run(&mut writer).unwrap();

        assert_eq!(algo.degrees(), writer.degrees());
        assert_eq!(writer.number_of_edges(), expected_number_of_edges(300, 3));
    }

    #[test]
    fn valid_over_exponents() {
        let mut rng = Pcg64::seed_from_u64(12);
        for exponent in [-1.0, 0.0, 0.5, 1.0, 2.0, 3.0] {
            for (n, m) in [(1, 1), (2, 1), (2, 2), (10, 1), (50, 3), (120, 7)] {
                let graph = AlgoLinearScan::new(&mut rng, n, m, WeightFunction::new(exponent))
                    .unwrap()
                    .build()
                    .unwrap();
                assert_valid(&graph, n, m);
            }
        }
    }

    #[test]
    fn superlinear_concentrates() {
        let mut rng = Pcg64::seed_from_u64(13);
        let linear = skewed_graph(&mut rng, 2000, 1, 1.0).unwrap();
        let superlinear = skewed_graph(&mut rng, 2000, 1, 2.0).unwrap();

        // with exponent 2 a single hub collects almost every edge
        assert!(superlinear.max_degree() > linear.max_degree());
        assert!(superlinear.max_degree() > 1000);
    }

    #[test]
    fn overflowing_weights_fail() {
        let result = AlgoLinearScan::new(Pcg64::seed_from_u64(14), 50, 2, WeightFunction::new(1e6))
            .unwrap()
            .build();

        assert!(matches!(result, Err(GraphError::InvalidWeight { .. })));
    }
}
