//! Truncated power series: inverse, logarithm and exponential.
//!
//! All three take a target length `d` and return exactly `d` coefficients,
//! i.e. the answer modulo `x^d`. Each doubles its precision per Newton
//! round until it reaches `d`:
//!
//! - inverse: `q ← q · (2 − p·q)`, seeded with a direct solve of the first
//!   `inverse_seed` terms;
//! - logarithm: `∫ p′ · p⁻¹`, no iteration of its own;
//! - exponential: `e ← e · (1 − log e + p)`, starting from `e = 1`.

use alloc::vec;

use tracing::trace;

use crate::algebra::ring::Ring;
use crate::error::PolyError;
use crate::structures::engine::PolyEngine;
use crate::structures::fp::Fp;
use crate::structures::poly::Poly;

impl<const P: u64> PolyEngine<P> {
    /// `q` with `p · q ≡ 1 (mod x^d)`, exactly `d` coefficients.
    ///
    /// Only the first `d` terms of `p` matter.
    ///
    /// # Panics
    ///
    /// Panics if `p` is empty or `p[0]` is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use polyntt::{Poly, PolyEngine};
    ///
    /// // 1 / (1 - x) = 1 + x + x^2 + ...
    /// let mut engine = PolyEngine::<998244353>::new();
    /// let q = engine.inv(&Poly::from_values(&[1, -1]), 4);
    /// assert_eq!(q, Poly::from_values(&[1, 1, 1, 1]));
    /// ```
    pub fn inv(&mut self, p: &Poly<P>, d: usize) -> Poly<P> {
        match self.checked_inv(p, d) {
            Ok(q) => q,
            Err(err) => panic!("{err}"),
        }
    }

    /// [`inv`](Self::inv) returning [`PolyError::NotInvertible`] instead of panicking.
    pub fn checked_inv(&mut self, p: &Poly<P>, d: usize) -> Result<Poly<P>, PolyError> {
        if p.coeff(0).is_zero() {
            return Err(PolyError::NotInvertible);
        }
        Ok(self.series_inverse(p, d))
    }

    /// `log p mod x^d`, exactly `d` coefficients, constant term zero.
    ///
    /// # Panics
    ///
    /// Panics unless `p[0] == 1`.
    ///
    /// # Example
    ///
    /// ```
    /// use polyntt::{Fp, Poly, PolyEngine};
    ///
    /// type F = Fp<998244353>;
    ///
    /// // log(1 + x) = x - x^2/2 + x^3/3 - ...
    /// let mut engine = PolyEngine::<998244353>::new();
    /// let l = engine.log(&Poly::from_values(&[1, 1]), 4);
    /// assert_eq!(l[1], F::new(1));
    /// assert_eq!(l[2], -F::new(1) / F::new(2));
    /// assert_eq!(l[3], F::new(1) / F::new(3));
    /// ```
    pub fn log(&mut self, p: &Poly<P>, d: usize) -> Poly<P> {
        match self.checked_log(p, d) {
            Ok(l) => l,
            Err(err) => panic!("{err}"),
        }
    }

    /// [`log`](Self::log) returning [`PolyError::LogUndefined`] instead of panicking.
    pub fn checked_log(&mut self, p: &Poly<P>, d: usize) -> Result<Poly<P>, PolyError> {
        let constant = p.coeff(0);
        if !constant.is_one() {
            return Err(PolyError::LogUndefined {
                constant: constant.value(),
            });
        }
        Ok(self.series_log(p, d))
    }

    /// `exp p mod x^d`, exactly `d` coefficients, constant term one
    /// (when `d > 0`).
    ///
    /// The empty polynomial counts as zero, so its exponential is `1`.
    ///
    /// # Panics
    ///
    /// Panics unless `p[0] == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use polyntt::{Fp, Poly, PolyEngine};
    ///
    /// type F = Fp<998244353>;
    ///
    /// // exp(x) = 1 + x + x^2/2 + x^3/6 + ...
    /// let mut engine = PolyEngine::<998244353>::new();
    /// let e = engine.exp(&Poly::from_values(&[0, 1]), 4);
    /// let expected = Poly::new(vec![
    ///     F::new(1),
    ///     F::new(1),
    ///     F::new(1) / F::new(2),
    ///     F::new(1) / F::new(6),
    /// ]);
    /// assert_eq!(e, expected);
    /// ```
    pub fn exp(&mut self, p: &Poly<P>, d: usize) -> Poly<P> {
        match self.checked_exp(p, d) {
            Ok(e) => e,
            Err(err) => panic!("{err}"),
        }
    }

    /// [`exp`](Self::exp) returning [`PolyError::ExpUndefined`] instead of panicking.
    pub fn checked_exp(&mut self, p: &Poly<P>, d: usize) -> Result<Poly<P>, PolyError> {
        let constant = p.coeff(0);
        if !constant.is_zero() {
            return Err(PolyError::ExpUndefined {
                constant: constant.value(),
            });
        }
        Ok(self.series_exp(p, d))
    }

    /// Requires `p[0] != 0`.
    pub(super) fn series_inverse(&mut self, p: &Poly<P>, d: usize) -> Poly<P> {
        let seed_len = d.min(self.thresholds.inverse_seed);
        let mut q = Self::inverse_seed(p, seed_len);

        let two = Poly::constant(Fp::new(2));
        let mut precision = seed_len;
        while precision < d {
            let next = precision << 1;
            trace!(precision = next, target = d, "series inverse round");

            let mut pq = self.mul(&p.truncated(next), &q);
            pq.resize(next);
            q = self.mul(&q, &(&two - &pq));
            q.resize(d.min(next));

            precision = next;
        }

        q.resize(d);
        q
    }

    /// First `len` terms of `p⁻¹`, solved term by term.
    ///
    /// `have` tracks the first `len` coefficients of `p · q` for the terms
    /// of `q` fixed so far.
    fn inverse_seed(p: &Poly<P>, len: usize) -> Poly<P> {
        let p0_inv = Fp::ONE / p[0];
        let mut q = Poly::with_len(len);
        let mut have = vec![Fp::<P>::ZERO; len];

        for i in 0..len {
            let target = if i == 0 { Fp::ONE } else { Fp::ZERO };
            let qi = (target - have[i]) * p0_inv;
            q[i] = qi;
            for (slot, &pj) in have[i..].iter_mut().zip(p.coefficients()) {
                *slot += qi * pj;
            }
        }

        q
    }

    /// Requires `p[0] == 1`.
    fn series_log(&mut self, p: &Poly<P>, d: usize) -> Poly<P> {
        let mut dp = p.derivative();
        dp.resize(d);
        let p_inv = self.series_inverse(p, d);

        let mut quotient = self.mul(&dp, &p_inv);
        quotient.resize(d);

        let mut out = quotient.integral(Fp::ZERO);
        out.resize(d);
        out
    }

    /// Requires `p` empty or `p[0] == 0`.
    fn series_exp(&mut self, p: &Poly<P>, d: usize) -> Poly<P> {
        let mut e = Poly::constant(Fp::ONE);
        let mut precision = 1;
        while precision < d {
            let next = precision << 1;
            trace!(precision = next, target = d, "series exp round");

            // e[0] stays 1, so log(e) is defined every round
            let mut factor = Poly::constant(Fp::ONE);
            factor -= &self.series_log(&e, next);
            factor += &p.truncated(next);
            e = self.mul(&e, &factor);
            e.resize(d.min(next));

            precision = next;
        }

        e.resize(d);
        e
    }
}
