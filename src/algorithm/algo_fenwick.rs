use super::*;
use tracing::{debug, trace};

/// Same process as [`super::algo_linear_scan::AlgoLinearScan`], but the node weights live
/// in a Fenwick tree so that a draw and a weight update both cost `O(log n)`.
///
/// Hosts are drawn without replacement by zeroing their weight until all `m` hosts
/// of the current node are fixed. The distribution of the produced graphs is the
/// same as for the linear scan, the consumed random stream is not.
pub struct AlgoFenwick<R: Rng> {
    rng: R,
    num_nodes: Node,
    initial_degree: Node,
    weight_function: WeightFunction,

    degrees: Vec<Node>,
    tree: FenwickTree,
}

impl<R: Rng> Algorithm<R> for AlgoFenwick<R> {
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
            tree: FenwickTree::new(num_nodes),
        })
    }

    fn run(&mut self, writer: &mut impl EdgeWriter) -> Result<(), GraphError> {
        debug!(
            nodes = self.num_nodes,
            initial_degree = self.initial_degree,
            exponent = self.weight_function.exponent(),
            regime = ?self.weight_function.regime(),
            "fenwick construction"
        );

        self.degrees.iter_mut().for_each(|d| *d = 0);
        self.tree = FenwickTree::new(self.num_nodes);
        emit_seed_clique(self.initial_degree, &mut self.degrees, writer);

        // Seed weights enter the tree only once the seed nodes become hosts of the
        // first grown node (which takes all of them), so a degree-0 seed node never
        // contributes a weight.
        let mut hosts = Vec::with_capacity(self.initial_degree);

        for new_node in self.initial_degree..self.num_nodes {
            hosts.clear();

            if new_node <= self.initial_degree {
                hosts.extend(0..new_node);
            } else {
                for _ in 0..self.initial_degree {
                    let host = self.tree.sample(&mut self.rng)?;
                    self.tree.set(host, 0.0)?;
                    hosts.push(host);
                }
            }

            // update neighbors; this also restores the weights zeroed above
            for &h in &hosts {
                self.increase_degree(h)?;
                writer.add_edge(new_node, h);
            }

            self.set_degree(new_node, self.initial_degree)?;
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

impl<R: Rng> AlgoFenwick<R> {
    fn set_degree(&mut self, node: Node, degree: Node) -> Result<(), GraphError> {
        self.degrees[node] = degree;
        self.tree.set(node, self.weight_function.get(degree))
    }

    fn increase_degree(&mut self, node: Node) -> Result<(), GraphError> {
        self.set_degree(node, self.degrees[node] + 1)
    }
}

/// Relative error of the partial sums (against the current total) above which the
/// tree is rebuilt from the exact weights before drawing.
const DRIFT_TOLERANCE: f64 = 1e-9;

/// Binary indexed tree over non-negative weights, 1-indexed internally.
///
/// The plain weights are kept alongside the tree; they are exact while the partial
/// sums in the tree accumulate rounding from repeated updates. `drift` is an upper
/// bound on that rounding since the last rebuild; once it is no longer negligible
/// against the total (e.g. after zeroing a hub that dwarfs all other weights), the
/// tree is rebuilt in `O(n)` from `values`.
#[derive(Clone, Debug)]
struct FenwickTree {
    tree: Vec<f64>,
    values: Vec<f64>,
    num_positive: usize,

    running_total: f64,
    magnitude: f64,
    drift: f64,
}

impl FenwickTree {
    fn new(len: usize) -> Self {
        Self {
            tree: vec![0.0; len + 1],
            values: vec![0.0; len],
            num_positive: 0,

            running_total: 0.0,
            magnitude: 0.0,
            drift: 0.0,
        }
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn levels(&self) -> f64 {
        (usize::BITS - self.len().leading_zeros()) as f64
    }

    fn set(&mut self, index: usize, weight: f64) -> Result<(), GraphError> {
        if !(weight.is_finite() && weight >= 0.0) {
            return Err(GraphError::InvalidWeight { index, weight });
        }

        let before = std::mem::replace(&mut self.values[index], weight);
        match (before > 0.0, weight > 0.0) {
            (false, true) => self.num_positive += 1,
            (true, false) => self.num_positive -= 1,
            _ => {}
        }

        let delta = weight - before;
        let n = self.len();
        let mut idx = index + 1;
        while idx <= n {
            self.tree[idx] += delta;
            idx += idx & idx.wrapping_neg();
        }

        // every touched cell is bounded by the largest total seen since the last rebuild
        self.running_total += delta;
        self.magnitude = self
            .magnitude
            .max(self.running_total)
            .max(before)
            .max(weight);
        self.drift += f64::EPSILON * self.levels() * self.magnitude;

        Ok(())
    }

    fn total(&self) -> f64 {
        let mut sum = 0.0;
        let mut idx = self.len();
        while idx > 0 {
            sum += self.tree[idx];
            idx -= idx & idx.wrapping_neg();
        }
        sum
    }

    /// Recomputes all partial sums from the exact weights.
    fn rebuild(&mut self) {
        let n = self.len();
        self.tree[0] = 0.0;
        self.tree[1..].copy_from_slice(&self.values);

        for i in 1..=n {
            let parent = i + (i & i.wrapping_neg());
            if parent <= n {
                let partial = self.tree[i];
                self.tree[parent] += partial;
            }
        }

        self.running_total = self.total();
        self.magnitude = self.running_total;
        self.drift = 0.0;
    }

    /// Smallest index whose inclusive prefix sum exceeds `r`; zero weights are skipped.
    ///
    /// The linear scan in `weighted_sampler` instead returns the first index with
    /// `r <= prefix`. The two rules only disagree when `r` hits a prefix sum exactly,
    /// which has probability zero for a continuous draw.
    fn find(&self, mut r: f64) -> usize {
        let n = self.len();
        let mut pos = 0;
        let mut step = if n == 0 { 0 } else { 1 << n.ilog2() };

        while step > 0 {
            let next = pos + step;
            if next <= n && self.tree[next] <= r {
                pos = next;
                r -= self.tree[next];
            }
            step >>= 1;
        }

        pos
    }

    fn sample(&mut self, rng: &mut impl Rng) -> Result<usize, GraphError> {
        let mut total = self.total();

        if self.num_positive > 0 && !(total > 0.0 && self.drift <= total * DRIFT_TOLERANCE) {
            self.rebuild();
            total = self.total();
        }

        if self.num_positive == 0 || !(total.is_finite() && total > 0.0) {
            return Err(GraphError::DegenerateWeights {
                candidates: self.num_positive,
                total,
            });
        }

        let r = rng.gen::<f64>() * total;
        let pos = self.find(r);

        if pos < self.len() && self.values[pos] > 0.0 {
            return Ok(pos);
        }

        // partial sums pointed at a zero weight; fall back to the exact values
        Ok(self.scan(r))
    }

    fn scan(&self, r: f64) -> usize {
        let mut cumulative = 0.0;
        let mut last_positive = 0;

        for (index, &weight) in self.values.iter().enumerate() {
            if weight > 0.0 {
                cumulative += weight;
                last_positive = index;
                if r < cumulative {
                    break;
                }
            }
        }

        last_positive
    }
}

#[cfg(test)]
mod test {
    use super::super::test_utils::assert_valid;
    use super::*;
    use crate::edge_writer::DegreeCount;
    use itertools::Itertools;
    use pcg_rand::Pcg64;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;

    #[test]
    fn tree_prefix_search() {
        let mut tree = FenwickTree::new(6);
        for (i, w) in [0.0, 2.0, 0.0, 3.0, 1.0, 0.0].into_iter().enumerate() {
            tree.set(i, w).unwrap();
        }

        assert_eq!(tree.total(), 6.0);
        assert_eq!(tree.num_positive, 3);
        assert_eq!(tree.find(0.0), 1);
        assert_eq!(tree.find(1.9), 1);
        assert_eq!(tree.find(2.5), 3);
        assert_eq!(tree.find(5.5), 4);

        tree.set(3, 0.0).unwrap();
        assert_eq!(tree.total(), 3.0);
        assert_eq!(tree.num_positive, 2);
        assert_eq!(tree.find(2.5), 4);
    }

    #[test]
    fn tree_recovers_after_zeroing_hub() {
        let mut tree = FenwickTree::new(4);
        for d in 1..20_000u32 {
            tree.set(0, (d as f64).powi(5)).unwrap();
        }
        for i in 1..4 {
            tree.set(i, 1.0).unwrap();
        }
        tree.set(0, 0.0).unwrap();

        let mut rng = Pcg64::seed_from_u64(9);
        for _ in 0..1000 {
            let index = tree.sample(&mut rng).unwrap();
            assert!((1..4).contains(&index), "sampled {}", index);
        }
        assert!((tree.total() - 3.0).abs() < 1e-12, "total: {}", tree.total());
    }

    #[test]
    fn tree_rebuild_matches_incremental() {
        let weights = [0.5, 0.0, 4.0, 1.25, 3.0, 0.0, 2.0];
        let mut tree = FenwickTree::new(weights.len());
        for (i, &w) in weights.iter().enumerate() {
            tree.set(i, w).unwrap();
        }

        let incremental = tree.tree.clone();
        tree.rebuild();
        assert_eq!(tree.tree, incremental);
        assert_eq!(tree.drift, 0.0);
        assert_eq!(tree.total(), 10.75);
    }

    #[test]
    fn tree_rejects_invalid_weight() {
        let mut tree = FenwickTree::new(2);
        assert!(matches!(
            tree.set(1, f64::INFINITY),
            Err(GraphError::InvalidWeight { index: 1, .. })
        ));
        assert!(tree.set(0, -0.5).is_err());
    }

    #[test]
    fn tree_degenerate() {
        let mut tree = FenwickTree::new(3);
        let mut rng = Pcg64::seed_from_u64(1);
        assert!(matches!(
            tree.sample(&mut rng),
            Err(GraphError::DegenerateWeights { .. })
        ));

        tree.set(2, 1.0).unwrap();
        assert_eq!(tree.sample(&mut rng).unwrap(), 2);
        assert_eq!(tree.sample(&mut StepRng::new(0, 0)).unwrap(), 2);
    }

    #[test]
    fn tree_frequencies() {
        const SAMPLES: usize = 100_000;
        let mut tree = FenwickTree::new(5);
        for (i, w) in [1.0, 0.0, 2.0, 7.0, 0.0].into_iter().enumerate() {
            tree.set(i, w).unwrap();
        }

        let mut rng = Pcg64::seed_from_u64(2);
        let counts = (0..SAMPLES)
            .map(|_| tree.sample(&mut rng).unwrap())
            .counts();

        assert_eq!(counts.len(), 3);
        for (index, expected) in [(0, 0.1), (2, 0.2), (3, 0.7)] {
            let freq = counts[&index] as f64 / SAMPLES as f64;
            assert!((freq - expected).abs() < 0.01, "index: {} freq: {}", index, freq);
        }
    }

    #[test]
    fn always_first_candidate() {
        let graph = AlgoFenwick::new(StepRng::new(0, 0), 5, 2, WeightFunction::linear())
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
    }

    #[test]
    fn valid_over_exponents() {
        let mut rng = Pcg64::seed_from_u64(3);
        for exponent in [-1.0, 0.0, 0.5, 1.0, 2.0] {
            for (n, m) in [(1, 1), (2, 1), (3, 3), (10, 1), (60, 3), (150, 6)] {
                let graph = AlgoFenwick::new(&mut rng, n, m, WeightFunction::new(exponent))
                    .unwrap()
                    .build()
                    .unwrap();
                assert_valid(&graph, n, m);
            }
        }
    }

    #[test]
    fn degrees_match_writer() {
        let mut algo =
            AlgoFenwick::new(Pcg64::seed_from_u64(4), 1000, 4, WeightFunction::new(0.8)).unwrap();
        let mut writer = DegreeCount::new(1000);
        algo.run(&mut writer).unwrap();

        assert_eq!(algo.degrees(), writer.degrees());
        assert_eq!(writer.number_of_edges(), expected_number_of_edges(1000, 4));
    }

    #[test]
    fn equal_degrees_give_uniform_pairs() {
        // before node 3 arrives, nodes 0, 1 and 2 all have degree 2, so each pair of hosts is equally likely
        const RUNS: usize = 30_000;
        let mut rng = Pcg64::seed_from_u64(5);

        let counts = (0..RUNS)
            .map(|_| {
                let graph = AlgoFenwick::new(&mut rng, 4, 2, WeightFunction::linear())
                    .unwrap()
                    .build()
                    .unwrap();
                graph.neighbors(3).iter().copied().sorted().collect_vec()
            })
            .counts();

        assert_eq!(counts.len(), 3);
        for count in counts.values() {
            let freq = *count as f64 / RUNS as f64;
            assert!((freq - 1.0 / 3.0).abs() < 0.02, "{:?}", counts);
        }
    }
}
