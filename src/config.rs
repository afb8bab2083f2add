//! Size cutoffs that choose between quadratic and transform-based algorithms.
//!
//! The defaults were tuned for 998244353 on x86-64; other moduli or targets
//! may prefer different values. None of them affect results, only speed.

use crate::error::ConfigError;

/// Algorithm-selection cutoffs for a [`PolyEngine`](crate::PolyEngine).
///
/// # Example
///
/// ```
/// use polyntt::{PolyEngine, Thresholds};
///
/// let thresholds = Thresholds::default().with_inverse_seed(32);
/// let engine = PolyEngine::<998244353>::with_thresholds(thresholds).unwrap();
/// assert_eq!(engine.thresholds().inverse_seed, 32);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Thresholds {
    /// Schoolbook multiply when the shorter operand has at most this many
    /// coefficients.
    pub mul_min_cut: usize,
    /// Schoolbook multiply when both operands have at most this many
    /// coefficients.
    pub mul_max_cut: usize,
    /// Long division when the normalized dividend has at most this many
    /// coefficients.
    pub div_dividend_cut: usize,
    /// Long division when the normalized divisor has at most this many
    /// coefficients.
    pub div_divisor_cut: usize,
    /// Number of series-inverse terms built coefficient by coefficient
    /// before switching to Newton iteration.
    pub inverse_seed: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            mul_min_cut: 20,
            mul_max_cut: 64,
            div_dividend_cut: 128,
            div_divisor_cut: 64,
            inverse_seed: 128,
        }
    }
}

impl Thresholds {
    /// Cutoffs that force every operation onto the transform path whenever
    /// the transform applies. Mostly useful in tests.
    pub const fn always_fast() -> Self {
        Self {
            mul_min_cut: 0,
            mul_max_cut: 0,
            div_dividend_cut: 0,
            div_divisor_cut: 0,
            inverse_seed: 1,
        }
    }

    /// Cutoffs that keep every operation on the quadratic path.
    pub const fn always_naive() -> Self {
        Self {
            mul_min_cut: usize::MAX,
            mul_max_cut: usize::MAX,
            div_dividend_cut: usize::MAX,
            div_divisor_cut: usize::MAX,
            inverse_seed: usize::MAX,
        }
    }

    pub fn with_mul_cuts(mut self, min_cut: usize, max_cut: usize) -> Self {
        self.mul_min_cut = min_cut;
        self.mul_max_cut = max_cut;
        self
    }

    pub fn with_div_cuts(mut self, dividend_cut: usize, divisor_cut: usize) -> Self {
        self.div_dividend_cut = dividend_cut;
        self.div_divisor_cut = divisor_cut;
        self
    }

    pub fn with_inverse_seed(mut self, seed: usize) -> Self {
        self.inverse_seed = seed;
        self
    }

    /// Check the cutoffs for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroInverseSeed`] if `inverse_seed == 0` and
    /// [`ConfigError::MulCutsOutOfOrder`] if `mul_min_cut > mul_max_cut`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inverse_seed == 0 {
            return Err(ConfigError::ZeroInverseSeed);
        }
        if self.mul_min_cut > self.mul_max_cut {
            return Err(ConfigError::MulCutsOutOfOrder {
                min_cut: self.mul_min_cut,
                max_cut: self.mul_max_cut,
            });
        }
        Ok(())
    }

    /// Whether a product of operands with these lengths uses the schoolbook loop.
    pub(crate) fn naive_mul(&self, len_a: usize, len_b: usize) -> bool {
        len_a.min(len_b) <= self.mul_min_cut || len_a.max(len_b) <= self.mul_max_cut
    }

    /// Whether a division with these normalized lengths uses long division.
    pub(crate) fn naive_div(&self, dividend_len: usize, divisor_len: usize) -> bool {
        dividend_len <= self.div_dividend_cut || divisor_len <= self.div_divisor_cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let t = Thresholds::default();
        assert_eq!(t.mul_min_cut, 20);
        assert_eq!(t.mul_max_cut, 64);
        assert_eq!(t.div_dividend_cut, 128);
        assert_eq!(t.div_divisor_cut, 64);
        assert_eq!(t.inverse_seed, 128);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn presets_validate() {
        assert!(Thresholds::always_fast().validate().is_ok());
        assert!(Thresholds::always_naive().validate().is_ok());
    }

    #[test]
    fn zero_seed_rejected() {
        let t = Thresholds::default().with_inverse_seed(0);
        assert_eq!(t.validate(), Err(ConfigError::ZeroInverseSeed));
    }

    #[test]
    fn mul_cuts_out_of_order_rejected() {
        let t = Thresholds::default().with_mul_cuts(100, 10);
        assert_eq!(
            t.validate(),
            Err(ConfigError::MulCutsOutOfOrder {
                min_cut: 100,
                max_cut: 10
            })
        );
    }

    #[test]
    fn mul_selection() {
        let t = Thresholds::default();
        // shorter operand at the min cut
        assert!(t.naive_mul(20, 10_000));
        assert!(!t.naive_mul(21, 10_000));
        // both operands at the max cut
        assert!(t.naive_mul(64, 64));
        assert!(!t.naive_mul(64, 65));
    }

    #[test]
    fn div_selection() {
        let t = Thresholds::default();
        assert!(t.naive_div(128, 100));
        assert!(t.naive_div(1000, 64));
        assert!(!t.naive_div(129, 65));
    }
}
