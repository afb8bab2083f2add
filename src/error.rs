//! Error types for the checked polynomial API.
//!
//! The operator traits and the plain engine methods treat these conditions
//! as caller bugs and panic with the same message; the `checked_*` methods
//! hand them back instead.

use thiserror::Error;

/// A mathematically undefined request on a polynomial or transform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolyError {
    /// The divisor normalizes to the zero polynomial.
    #[error("division by the zero polynomial")]
    DivisionByZero,

    /// Series inverse of a polynomial whose constant term is zero.
    #[error("power series is not invertible: constant term is zero")]
    NotInvertible,

    /// Logarithm of a series whose constant term is not one.
    #[error("log is not defined: constant term is {constant}, expected 1")]
    LogUndefined { constant: u64 },

    /// Exponential of a series whose constant term is not zero.
    #[error("exp is not defined: constant term is {constant}, expected 0")]
    ExpUndefined { constant: u64 },

    /// Transform buffer length is not a power of two.
    #[error("transform length {len} is not a power of two")]
    TransformLength { len: usize },

    /// Transform buffer longer than the field's largest power-of-two root of unity allows.
    #[error("transform length {len} exceeds the maximum {max} for modulus {modulus}")]
    TransformTooLarge { len: usize, max: usize, modulus: u64 },
}

/// Invalid [`Thresholds`](crate::config::Thresholds).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The brute-force inverse seed must produce at least one term,
    /// otherwise Newton doubling never advances.
    #[error("inverse seed length must be at least 1")]
    ZeroInverseSeed,

    /// `mul_min_cut` applies to the shorter operand and must not exceed
    /// `mul_max_cut`, which bounds both.
    #[error("mul_min_cut ({min_cut}) exceeds mul_max_cut ({max_cut})")]
    MulCutsOutOfOrder { min_cut: usize, max_cut: usize },
}
