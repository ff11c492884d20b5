//! Roulette-wheel selection over a slice of non-negative weights.
//!
//! [`select`] draws a single index with probability `weights[i] / sum(weights)`.
//! [`select_distinct`] draws several distinct indices, removing each drawn candidate
//! before the next draw. Candidates are kept as `(original_index, weight)` pairs, so
//! the returned indices always refer to the slice as it was passed in.

use super::Node;
use crate::error::GraphError;
use rand::Rng;

/// Draws one index of `weights` with probability proportional to its weight.
///
/// Zero weights are never returned. Fails with [`GraphError::DegenerateWeights`] if
/// `weights` is empty or sums to zero, and with [`GraphError::InvalidWeight`] if any
/// weight is negative or not finite.
pub fn select(rng: &mut impl Rng, weights: &[f64]) -> Result<Node, GraphError> {
    draw_position(rng, weights.iter().copied().enumerate())
}

/// Draws `m` distinct indices of `weights`; see [`WeightedSampler::select_distinct_into`].
pub fn select_distinct(
    rng: &mut impl Rng,
    weights: &[f64],
    m: usize,
) -> Result<Vec<Node>, GraphError> {
    let mut selected = Vec::with_capacity(m.min(weights.len()));
    WeightedSampler::default().select_distinct_into(rng, weights, m, &mut selected)?;
    Ok(selected)
}

/// Sampling without replacement. Keeps its candidate buffer between calls so that
/// repeated selections (one per new node) do not reallocate.
#[derive(Clone, Debug, Default)]
pub struct WeightedSampler {
    pool: Vec<(Node, f64)>,
}

impl WeightedSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `m` distinct indices of `weights` into `selected`, in the order they were drawn.
    ///
    /// If `m >= weights.len()` every index is returned in ascending order and no
    /// randomness is consumed. Otherwise each draw is taken over the candidates that
    /// have not been drawn yet.
    pub fn select_distinct_into(
        &mut self,
        rng: &mut impl Rng,
        weights: &[f64],
        m: usize,
        selected: &mut Vec<Node>,
    ) -> Result<(), GraphError> {
        selected.clear();

        if m >= weights.len() {
            selected.extend(0..weights.len());
            return Ok(());
        }

        self.pool.clear();
        self.pool.extend(weights.iter().copied().enumerate());

        for _ in 0..m {
            let position = draw_position(rng, self.pool.iter().copied())?;
            // order-preserving removal keeps the scan in original index order
            let (index, _) = self.pool.remove(position);
            selected.push(index);
        }

        Ok(())
    }
}

/// Returns the position (within `candidates`) of the drawn candidate.
fn draw_position<I>(rng: &mut impl Rng, candidates: I) -> Result<usize, GraphError>
where
    I: Iterator<Item = (Node, f64)> + Clone,
{
    let mut total = 0.0;
    let mut num_candidates = 0;

    for (index, weight) in candidates.clone() {
        if !(weight.is_finite() && weight >= 0.0) {
            return Err(GraphError::InvalidWeight { index, weight });
        }
        total += weight;
        num_candidates += 1;
    }

    let degenerate = GraphError::DegenerateWeights {
        candidates: num_candidates,
        total,
    };

    if !(total.is_finite() && total > 0.0) {
        return Err(degenerate);
    }

    let r = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last_positive = None;

    for (position, (_, weight)) in candidates.enumerate() {
        if weight == 0.0 {
            continue;
        }

        cumulative += weight;
        if r <= cumulative {
            return Ok(position);
        }
        last_positive = Some(position);
    }

    // only reachable if rounding pushed `r` past the final partial sum
    last_positive.ok_or(degenerate)
}
