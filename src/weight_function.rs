use super::Node;
use std::cmp::Ordering;

const NUM_PRECOMPUTED: usize = 100;

#[derive(Clone, Debug)]
pub struct WeightFunction {
    exponent: f64,
    precomputed: [f64; NUM_PRECOMPUTED],
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Regime {
    Sublinear,
    Linear,
    Superlinear,
}

/// Implements the attachment weight `f(d) = d**exponent` with pre-computation of the first few values.
///
/// # Example
/// ```
/// use skew_graph::weight_function::WeightFunction;
/// let wf = WeightFunction::new(2.0);
///
/// let computed = wf.get(3);
/// let expected = 3.0 * 3.0;
///
/// assert!( (computed - expected).abs() < 1e-6 );
/// ```
impl WeightFunction {
    pub fn new(exponent: f64) -> Self {
        let mut precomputed = [0.0; NUM_PRECOMPUTED];

        for (degree, weight) in precomputed.iter_mut().enumerate() {
            *weight = Self::compute(exponent, degree);
        }

        Self {
            exponent,
            precomputed,
        }
    }

    /// Plain preferential attachment (`exponent == 1`).
    pub fn linear() -> Self {
        Self::new(1.0)
    }

    pub fn get(&self, degree: Node) -> f64 {
        match self.precomputed.get(degree) {
            Some(&weight) => weight,
            None => Self::compute(self.exponent, degree),
        }
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    pub fn regime(&self) -> Regime {
        match self.exponent.partial_cmp(&1.0) {
            Some(Ordering::Less) => Regime::Sublinear,
            Some(Ordering::Equal) => Regime::Linear,
            _ => Regime::Superlinear,
        }
    }

    #[inline]
    fn compute(exponent: f64, degree: Node) -> f64 {
        (degree as f64).powf(exponent)
    }
}
