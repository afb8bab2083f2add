//! Dense polynomial and truncated power-series arithmetic over prime fields
//! with a power-of-two root of unity.
//!
//! Multiplication switches to a number-theoretic transform for large
//! operands; division, series inverse, logarithm and exponential are built
//! on Newton iteration over that product.
//!
//! ```
//! use polyntt::{Poly, PolyEngine};
//!
//! const P: u64 = 998244353;
//!
//! let p = Poly::<P>::from_values(&[1, 1]);
//! assert_eq!(p.clone() * p, Poly::from_values(&[1, 2, 1]));
//!
//! // One engine keeps its transform tables between calls.
//! let mut engine = PolyEngine::<P>::new();
//! let series = Poly::<P>::from_values(&[1, 3, 5, 7]);
//! let inv = engine.inv(&series, 8);
//! let mut check = engine.mul(&series, &inv);
//! check.resize(8);
//! assert_eq!(check, Poly::from_values(&[1, 0, 0, 0, 0, 0, 0, 0]));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod algebra;
pub mod config;
pub mod error;
pub mod structures;
pub mod utils;

pub use algebra::field::Field;
pub use algebra::ring::Ring;

pub use config::Thresholds;
pub use error::{ConfigError, PolyError};
pub use structures::engine::PolyEngine;
pub use structures::fp::Fp;
pub use structures::ntt;
pub use structures::ntt::NttCache;
pub use structures::poly::Poly;
pub use utils::is_prime;
