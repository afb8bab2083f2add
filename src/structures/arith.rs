//! Products, quotients and remainders.

use tracing::debug;

use crate::algebra::ring::Ring;
use crate::error::PolyError;
use crate::structures::engine::PolyEngine;
use crate::structures::fp::Fp;
use crate::structures::poly::Poly;

impl<const P: u64> PolyEngine<P> {
    /// Product of `a` and `b`, `a.len() + b.len() - 1` coefficients long.
    ///
    /// Short operands use the schoolbook loop, longer ones a transform
    /// convolution; [`Thresholds`](crate::Thresholds) decides which. Either
    /// operand empty gives the empty polynomial. Trailing zeros in the
    /// inputs show up as trailing zeros in the product.
    ///
    /// # Panics
    ///
    /// Panics if the transform path is taken and the padded length exceeds
    /// [`max_transform_len`](crate::ntt::max_transform_len).
    pub fn mul(&mut self, a: &Poly<P>, b: &Poly<P>) -> Poly<P> {
        if a.is_empty() || b.is_empty() {
            return Poly::zero();
        }
        if self.thresholds.naive_mul(a.len(), b.len()) {
            return Self::mul_naive(a, b);
        }
        debug!(lhs = a.len(), rhs = b.len(), "transform multiply");
        self.mul_ntt(a, b)
    }

    /// Schoolbook product, `O(len_a · len_b)`.
    pub fn mul_naive(a: &Poly<P>, b: &Poly<P>) -> Poly<P> {
        if a.is_empty() || b.is_empty() {
            return Poly::zero();
        }
        let mut out = Poly::with_len(a.len() + b.len() - 1);
        for (i, &x) in a.coefficients().iter().enumerate() {
            if x.is_zero() {
                continue;
            }
            for (j, &y) in b.coefficients().iter().enumerate() {
                out[i + j] += x * y;
            }
        }
        out
    }

    /// Product through a cyclic convolution of the next power of two that
    /// holds the full result.
    ///
    /// # Panics
    ///
    /// Panics if that length exceeds [`max_transform_len`](crate::ntt::max_transform_len).
    pub fn mul_ntt(&mut self, a: &Poly<P>, b: &Poly<P>) -> Poly<P> {
        Poly::new(self.cache.convolve(a.coefficients(), b.coefficients()))
    }

    /// Quotient of `a` by `b`, normalized.
    ///
    /// Both operands are normalized first. A dividend shorter than the
    /// divisor gives the empty quotient.
    ///
    /// # Panics
    ///
    /// Panics if `b` is the zero polynomial.
    pub fn div(&mut self, a: &Poly<P>, b: &Poly<P>) -> Poly<P> {
        match self.checked_div(a, b) {
            Ok(q) => q,
            Err(err) => panic!("{err}"),
        }
    }

    /// [`div`](Self::div) that reports a zero divisor instead of panicking.
    pub fn checked_div(&mut self, a: &Poly<P>, b: &Poly<P>) -> Result<Poly<P>, PolyError> {
        let Some((a, b)) = Self::division_operands(a, b)? else {
            return Ok(Poly::zero());
        };
        if self.thresholds.naive_div(a.len(), b.len()) {
            Ok(Self::long_division(a, &b))
        } else {
            debug!(dividend = a.len(), divisor = b.len(), "newton division");
            Ok(self.newton_division(&a, &b))
        }
    }

    /// Long division regardless of size.
    ///
    /// # Panics
    ///
    /// Panics if `b` is the zero polynomial.
    pub fn div_naive(a: &Poly<P>, b: &Poly<P>) -> Poly<P> {
        match Self::division_operands(a, b) {
            Ok(Some((a, b))) => Self::long_division(a, &b),
            Ok(None) => Poly::zero(),
            Err(err) => panic!("{err}"),
        }
    }

    /// Division through the reversed series inverse of the divisor, for any
    /// size.
    ///
    /// # Panics
    ///
    /// Panics if `b` is the zero polynomial.
    pub fn div_newton(&mut self, a: &Poly<P>, b: &Poly<P>) -> Poly<P> {
        match Self::division_operands(a, b) {
            Ok(Some((a, b))) => self.newton_division(&a, &b),
            Ok(None) => Poly::zero(),
            Err(err) => panic!("{err}"),
        }
    }

    /// `a - (a / b) · b`, normalized. Its degree is below that of `b`.
    ///
    /// # Panics
    ///
    /// Panics if `b` is the zero polynomial.
    pub fn rem(&mut self, a: &Poly<P>, b: &Poly<P>) -> Poly<P> {
        self.div_rem(a, b).1
    }

    pub fn checked_rem(&mut self, a: &Poly<P>, b: &Poly<P>) -> Result<Poly<P>, PolyError> {
        self.checked_div_rem(a, b).map(|(_, r)| r)
    }

    /// Quotient and remainder from a single division.
    ///
    /// # Panics
    ///
    /// Panics if `b` is the zero polynomial.
    pub fn div_rem(&mut self, a: &Poly<P>, b: &Poly<P>) -> (Poly<P>, Poly<P>) {
        match self.checked_div_rem(a, b) {
            Ok(qr) => qr,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn checked_div_rem(
        &mut self,
        a: &Poly<P>,
        b: &Poly<P>,
    ) -> Result<(Poly<P>, Poly<P>), PolyError> {
        let q = self.checked_div(a, b)?;
        let mut r = a - &self.mul(&q, b);
        r.normalize();
        Ok((q, r))
    }

    /// Normalized copies of the operands, `None` when the quotient is
    /// trivially empty.
    fn division_operands(
        a: &Poly<P>,
        b: &Poly<P>,
    ) -> Result<Option<(Poly<P>, Poly<P>)>, PolyError> {
        let b = b.clone().normalized();
        if b.is_empty() {
            return Err(PolyError::DivisionByZero);
        }
        let a = a.clone().normalized();
        if a.len() < b.len() {
            return Ok(None);
        }
        Ok(Some((a, b)))
    }

    /// Both operands normalized, `a.len() >= b.len() >= 1`.
    fn long_division(mut rem: Poly<P>, b: &Poly<P>) -> Poly<P> {
        let (n, m) = (rem.len(), b.len());
        let lead_inv = Fp::ONE / b[m - 1];
        let mut q = Poly::with_len(n - m + 1);

        for top in (m - 1..n).rev() {
            let shift = top + 1 - m;
            let c = rem[top] * lead_inv;
            q[shift] = c;
            if c.is_zero() {
                continue;
            }
            for (j, &bj) in b.coefficients().iter().enumerate() {
                rem[shift + j] -= c * bj;
            }
        }

        q.normalized()
    }

    /// Both operands normalized, `a.len() >= b.len() >= 1`.
    ///
    /// The reversed quotient is the first `n - m + 1` terms of
    /// `rev(a) · rev(b)⁻¹`; only that many terms of `rev(a)` take part.
    fn newton_division(&mut self, a: &Poly<P>, b: &Poly<P>) -> Poly<P> {
        let k = a.len() - b.len() + 1;
        let rb_inv = self.series_inverse(&b.reversed(), k);
        let mut q = self.mul(&a.reversed().truncated(k), &rb_inv);
        q.resize(k);
        q.reversed().normalized()
    }
}
