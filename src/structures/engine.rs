//! Stateful front end for the polynomial algorithms.
//!
//! A [`PolyEngine`] owns an [`NttCache`] and a set of [`Thresholds`]. The
//! arithmetic lives in sibling modules as further `impl` blocks on the same
//! type: products and division next to each other, series inverse, log and
//! exp in their own file.

use crate::config::Thresholds;
use crate::error::ConfigError;
use crate::structures::ntt::NttCache;

/// Polynomial multiplier, divider and series solver over `Fp<P>`.
///
/// Every call takes `&mut self`, because any product may refill the
/// transform tables. Use one engine per thread; the tables are only reused
/// when consecutive transforms share a length.
///
/// ```
/// use polyntt::{Poly, PolyEngine};
///
/// let mut engine = PolyEngine::<998244353>::new();
/// let a = Poly::from_values(&[1, 0, 1]);
/// let b = Poly::from_values(&[1, 1]);
/// let (q, r) = engine.div_rem(&a, &b);
/// assert_eq!(q, Poly::from_values(&[-1, 1]));
/// assert_eq!(r, Poly::from_values(&[2]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolyEngine<const P: u64> {
    pub(crate) cache: NttCache<P>,
    pub(crate) thresholds: Thresholds,
}

impl<const P: u64> PolyEngine<P> {
    /// Engine with the default cutoffs and an empty cache.
    ///
    /// Building one is cheap: no tables or roots are computed until the
    /// first transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with custom cutoffs.
    ///
    /// # Errors
    ///
    /// Whatever [`Thresholds::validate`] rejects.
    pub fn with_thresholds(thresholds: Thresholds) -> Result<Self, ConfigError> {
        thresholds.validate()?;
        Ok(Self {
            cache: NttCache::new(),
            thresholds,
        })
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// The transform tables, e.g. to run raw transforms alongside
    /// polynomial calls without building a second cache.
    pub fn cache_mut(&mut self) -> &mut NttCache<P> {
        &mut self.cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structures::fp::Fp;
    use crate::structures::poly::Poly;

    const MOD: u64 = 998244353;

    #[test]
    fn new_is_lazy() {
        let mut engine = PolyEngine::<MOD>::new();
        assert_eq!(engine.cache_mut().cached_len(), 0);
        assert_eq!(engine.thresholds(), &Thresholds::default());
    }

    #[test]
    fn with_thresholds_validates() {
        assert!(PolyEngine::<MOD>::with_thresholds(Thresholds::always_fast()).is_ok());
        assert_eq!(
            PolyEngine::<MOD>::with_thresholds(Thresholds::default().with_inverse_seed(0))
                .unwrap_err(),
            ConfigError::ZeroInverseSeed
        );
    }

    #[test]
    fn naive_products_leave_cache_empty() {
        let mut engine = PolyEngine::<MOD>::new();
        let a = Poly::from_values(&[1, 2, 3]);
        let _ = engine.mul(&a, &a);
        assert_eq!(engine.cache_mut().cached_len(), 0);
    }

    #[test]
    fn transform_products_fill_cache() {
        let mut engine = PolyEngine::<MOD>::with_thresholds(Thresholds::always_fast()).unwrap();
        let a: Poly<MOD> = (1..=5).map(Fp::new).collect();
        let _ = engine.mul(&a, &a);
        // 5 + 5 - 1 = 9 → 16
        assert_eq!(engine.cache_mut().cached_len(), 16);
    }
}
