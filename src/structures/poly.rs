use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use core::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Rem, RemAssign, Sub,
    SubAssign,
};

use crate::algebra::ring::Ring;
use crate::error::PolyError;
use crate::structures::engine::PolyEngine;
use crate::structures::fp::Fp;

/// Dense polynomial over `Fp<P>`.
///
/// Coefficients are stored in ascending order of degree:
/// `coeffs[i]` is the coefficient of `x^i`.
///
/// Trailing zero coefficients are allowed and kept: the stored length and
/// the degree are separate notions, and only [`normalize`](Self::normalize)
/// strips them. Equality compares the stored coefficients, so `[1, 0]` and
/// `[1]` are different values.
///
/// The operator traits (`*`, `/`, `%` between polynomials) run on a
/// throwaway [`PolyEngine`]; keep an engine around to reuse its transform
/// tables across many products.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Poly<const P: u64> {
    coeffs: Vec<Fp<P>>,
}

impl<const P: u64> Poly<P> {
    /// Create a polynomial from coefficients in ascending order.
    ///
    /// Trailing zeros are kept as given.
    ///
    /// # Example
    ///
    /// ```
    /// use polyntt::{Fp, Poly};
    ///
    /// type F = Fp<998244353>;
    ///
    /// let p = Poly::new(vec![F::new(3), F::new(2), F::new(0)]);
    /// assert_eq!(p.len(), 3);
    /// assert_eq!(p.degree(), Some(1));
    /// ```
    pub fn new(coeffs: Vec<Fp<P>>) -> Self {
        Self { coeffs }
    }

    /// The empty polynomial, which is the zero polynomial.
    pub fn zero() -> Self {
        Self { coeffs: Vec::new() }
    }

    /// `n` zero coefficients.
    pub fn with_len(n: usize) -> Self {
        Self {
            coeffs: vec![Fp::ZERO; n],
        }
    }

    /// Build from integer literals; negative values wrap modulo `P`.
    ///
    /// ```
    /// use polyntt::Poly;
    ///
    /// let p = Poly::<17>::from_values(&[1, -1]);
    /// assert_eq!(p.to_string(), "1 16");
    /// ```
    pub fn from_values(values: &[i64]) -> Self {
        values.iter().map(|&v| Fp::from(v)).collect()
    }

    /// The single-coefficient polynomial `c`.
    pub fn constant(c: Fp<P>) -> Self {
        Self { coeffs: vec![c] }
    }

    /// The polynomial `x`.
    pub fn x() -> Self {
        Self {
            coeffs: vec![Fp::ZERO, Fp::ONE],
        }
    }

    /// `c * x^n`, stored with `n + 1` coefficients.
    pub fn monomial(c: Fp<P>, n: usize) -> Self {
        let mut coeffs = vec![Fp::ZERO; n + 1];
        coeffs[n] = c;
        Self { coeffs }
    }

    /// Random coefficients, `len` of them.
    #[cfg(feature = "rand")]
    pub fn random<R: rand::Rng + ?Sized>(rng: &mut R, len: usize) -> Self {
        (0..len).map(|_| rng.gen::<Fp<P>>()).collect()
    }

    /// Number of stored coefficients, trailing zeros included.
    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    /// No stored coefficients.
    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Every stored coefficient is zero (or there are none).
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(Ring::is_zero)
    }

    /// Index of the highest non-zero coefficient.
    ///
    /// `None` stands for degree −1: the polynomial is empty or all zeros.
    /// Does not touch the stored coefficients.
    ///
    /// ```
    /// use polyntt::Poly;
    ///
    /// assert_eq!(Poly::<17>::from_values(&[1, 2, 0, 0]).degree(), Some(1));
    /// assert_eq!(Poly::<17>::from_values(&[0, 0]).degree(), None);
    /// assert_eq!(Poly::<17>::zero().degree(), None);
    /// ```
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.iter().rposition(|c| !c.is_zero())
    }

    /// Coefficient at [`degree`](Self::degree).
    pub fn leading_coeff(&self) -> Option<Fp<P>> {
        self.degree().map(|d| self.coeffs[d])
    }

    /// Coefficient of `x^i`; zero past the stored length.
    pub fn coeff(&self, i: usize) -> Fp<P> {
        self.coeffs.get(i).copied().unwrap_or(Fp::ZERO)
    }

    pub fn coefficients(&self) -> &[Fp<P>] {
        &self.coeffs
    }

    pub fn coefficients_mut(&mut self) -> &mut [Fp<P>] {
        &mut self.coeffs
    }

    pub fn into_coefficients(self) -> Vec<Fp<P>> {
        self.coeffs
    }

    /// Pad with zeros or truncate to exactly `n` coefficients.
    ///
    /// Truncation drops high-degree terms without checking them.
    pub fn resize(&mut self, n: usize) -> &mut Self {
        self.coeffs.resize(n, Fp::ZERO);
        self
    }

    /// The first `min(n, len)` coefficients, i.e. `self mod x^n` without padding.
    pub fn truncated(&self, n: usize) -> Self {
        Self {
            coeffs: self.coeffs[..n.min(self.coeffs.len())].to_vec(),
        }
    }

    /// Remove trailing zero coefficients.
    pub fn normalize(&mut self) {
        while self.coeffs.last().is_some_and(Ring::is_zero) {
            self.coeffs.pop();
        }
    }

    /// By-value [`normalize`](Self::normalize).
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Coefficients in reverse order: `x^(len-1) · p(1/x)`.
    pub fn reversed(&self) -> Self {
        Self {
            coeffs: self.coeffs.iter().rev().copied().collect(),
        }
    }

    /// Evaluate at `x`, accumulating a running power of `x`.
    ///
    /// # Example
    ///
    /// ```
    /// use polyntt::{Fp, Poly};
    ///
    /// type F17 = Fp<17>;
    ///
    /// // p(x) = 1 + 2x + 3x^2, p(2) = 17 ≡ 0
    /// let p = Poly::<17>::from_values(&[1, 2, 3]);
    /// assert_eq!(p.eval(F17::new(2)), F17::new(0));
    /// assert_eq!(p.eval(F17::new(1)), F17::new(6));
    /// ```
    pub fn eval(&self, x: Fp<P>) -> Fp<P> {
        let mut power = Fp::ONE;
        let mut value = Fp::ZERO;
        for &c in &self.coeffs {
            value += c * power;
            power *= x;
        }
        value
    }

    /// Formal derivative: coefficient `i` is `(i + 1) · p[i + 1]`.
    ///
    /// The result has `max(0, len - 1)` coefficients.
    ///
    /// ```
    /// use polyntt::Poly;
    ///
    /// // (4 + 3x + 2x^2 + x^3)' = 3 + 4x + 3x^2
    /// let f = Poly::<17>::from_values(&[4, 3, 2, 1]);
    /// assert_eq!(f.derivative(), Poly::from_values(&[3, 4, 3]));
    /// ```
    pub fn derivative(&self) -> Self {
        self.coeffs
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| Fp::new(i as u64) * c)
            .collect()
    }

    /// Formal antiderivative with constant term `constant`:
    /// coefficient `i ≥ 1` is `p[i - 1] / i`.
    ///
    /// The result has `len + 1` coefficients.
    ///
    /// # Panics
    ///
    /// Panics if some `i ≤ len` is a multiple of `P` (the field cannot
    /// divide by it).
    pub fn integral(&self, constant: Fp<P>) -> Self {
        let mut coeffs = Vec::with_capacity(self.coeffs.len() + 1);
        coeffs.push(constant);
        for (i, &c) in self.coeffs.iter().enumerate() {
            coeffs.push(c / Fp::new(i as u64 + 1));
        }
        Self { coeffs }
    }

    /// Quotient and remainder at once; see [`PolyEngine::div_rem`].
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is the zero polynomial.
    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        PolyEngine::new().div_rem(self, divisor)
    }

    /// `self⁻¹ mod x^degree`; see [`PolyEngine::inv`].
    ///
    /// # Panics
    ///
    /// Panics if the constant term is zero.
    pub fn inv(&self, degree: usize) -> Self {
        PolyEngine::new().inv(self, degree)
    }

    /// `log(self) mod x^degree`; see [`PolyEngine::log`].
    ///
    /// # Panics
    ///
    /// Panics unless the constant term is one.
    pub fn log(&self, degree: usize) -> Self {
        PolyEngine::new().log(self, degree)
    }

    /// `exp(self) mod x^degree`; see [`PolyEngine::exp`].
    ///
    /// # Panics
    ///
    /// Panics unless the constant term is zero.
    pub fn exp(&self, degree: usize) -> Self {
        PolyEngine::new().exp(self, degree)
    }

    pub fn checked_inv(&self, degree: usize) -> Result<Self, PolyError> {
        PolyEngine::new().checked_inv(self, degree)
    }

    pub fn checked_log(&self, degree: usize) -> Result<Self, PolyError> {
        PolyEngine::new().checked_log(self, degree)
    }

    pub fn checked_exp(&self, degree: usize) -> Result<Self, PolyError> {
        PolyEngine::new().checked_exp(self, degree)
    }
}

impl<const P: u64> From<Vec<Fp<P>>> for Poly<P> {
    fn from(coeffs: Vec<Fp<P>>) -> Self {
        Self::new(coeffs)
    }
}

impl<const P: u64> FromIterator<Fp<P>> for Poly<P> {
    fn from_iter<I: IntoIterator<Item = Fp<P>>>(iter: I) -> Self {
        Self {
            coeffs: iter.into_iter().collect(),
        }
    }
}

impl<const P: u64> Index<usize> for Poly<P> {
    type Output = Fp<P>;

    fn index(&self, i: usize) -> &Fp<P> {
        &self.coeffs[i]
    }
}

impl<const P: u64> IndexMut<usize> for Poly<P> {
    fn index_mut(&mut self, i: usize) -> &mut Fp<P> {
        &mut self.coeffs[i]
    }
}

/* ---- in-place arithmetic ---- */

/// Pads to the longer length; never truncates or normalizes.
impl<const P: u64> AddAssign<&Poly<P>> for Poly<P> {
    fn add_assign(&mut self, rhs: &Poly<P>) {
        if self.coeffs.len() < rhs.coeffs.len() {
            self.coeffs.resize(rhs.coeffs.len(), Fp::ZERO);
        }
        for (a, &b) in self.coeffs.iter_mut().zip(&rhs.coeffs) {
            *a += b;
        }
    }
}

/// Pads to the longer length; never truncates or normalizes.
impl<const P: u64> SubAssign<&Poly<P>> for Poly<P> {
    fn sub_assign(&mut self, rhs: &Poly<P>) {
        if self.coeffs.len() < rhs.coeffs.len() {
            self.coeffs.resize(rhs.coeffs.len(), Fp::ZERO);
        }
        for (a, &b) in self.coeffs.iter_mut().zip(&rhs.coeffs) {
            *a -= b;
        }
    }
}

impl<const P: u64> MulAssign<&Poly<P>> for Poly<P> {
    fn mul_assign(&mut self, rhs: &Poly<P>) {
        *self = PolyEngine::new().mul(self, rhs);
    }
}

/// Polynomial quotient; the remainder is discarded.
impl<const P: u64> DivAssign<&Poly<P>> for Poly<P> {
    fn div_assign(&mut self, rhs: &Poly<P>) {
        *self = PolyEngine::new().div(self, rhs);
    }
}

impl<const P: u64> RemAssign<&Poly<P>> for Poly<P> {
    fn rem_assign(&mut self, rhs: &Poly<P>) {
        *self = PolyEngine::new().rem(self, rhs);
    }
}

/// Owned and borrowed forms of each binary operator, all routed through
/// the `&Poly` compound assignment above.
macro_rules! forward_binop {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident) => {
        impl<const P: u64> $OpAssign for Poly<P> {
            fn $op_assign(&mut self, rhs: Poly<P>) {
                $OpAssign::$op_assign(self, &rhs);
            }
        }

        impl<const P: u64> $Op for Poly<P> {
            type Output = Poly<P>;

            fn $op(mut self, rhs: Poly<P>) -> Poly<P> {
                $OpAssign::$op_assign(&mut self, &rhs);
                self
            }
        }

        impl<const P: u64> $Op<&Poly<P>> for Poly<P> {
            type Output = Poly<P>;

            fn $op(mut self, rhs: &Poly<P>) -> Poly<P> {
                $OpAssign::$op_assign(&mut self, rhs);
                self
            }
        }

        impl<const P: u64> $Op<&Poly<P>> for &Poly<P> {
            type Output = Poly<P>;

            fn $op(self, rhs: &Poly<P>) -> Poly<P> {
                let mut out = self.clone();
                $OpAssign::$op_assign(&mut out, rhs);
                out
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);
forward_binop!(Mul, mul, MulAssign, mul_assign);
forward_binop!(Div, div, DivAssign, div_assign);
forward_binop!(Rem, rem, RemAssign, rem_assign);

impl<const P: u64> Neg for Poly<P> {
    type Output = Self;

    fn neg(mut self) -> Self::Output {
        for c in self.coeffs.iter_mut() {
            *c = -*c;
        }
        self
    }
}

impl<const P: u64> Neg for &Poly<P> {
    type Output = Poly<P>;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

/* ---- scalar arithmetic ---- */

impl<const P: u64> MulAssign<Fp<P>> for Poly<P> {
    fn mul_assign(&mut self, rhs: Fp<P>) {
        for c in self.coeffs.iter_mut() {
            *c *= rhs;
        }
    }
}

/// Panics if `rhs` is zero, even for an empty polynomial.
impl<const P: u64> DivAssign<Fp<P>> for Poly<P> {
    fn div_assign(&mut self, rhs: Fp<P>) {
        *self *= Fp::ONE / rhs;
    }
}

impl<const P: u64> Mul<Fp<P>> for Poly<P> {
    type Output = Self;

    fn mul(mut self, rhs: Fp<P>) -> Self::Output {
        self *= rhs;
        self
    }
}

impl<const P: u64> Mul<Fp<P>> for &Poly<P> {
    type Output = Poly<P>;

    fn mul(self, rhs: Fp<P>) -> Self::Output {
        self.clone() * rhs
    }
}

impl<const P: u64> Mul<Poly<P>> for Fp<P> {
    type Output = Poly<P>;

    fn mul(self, rhs: Poly<P>) -> Self::Output {
        rhs * self
    }
}

impl<const P: u64> Div<Fp<P>> for Poly<P> {
    type Output = Self;

    fn div(mut self, rhs: Fp<P>) -> Self::Output {
        self /= rhs;
        self
    }
}

impl<const P: u64> Div<Fp<P>> for &Poly<P> {
    type Output = Poly<P>;

    fn div(self, rhs: Fp<P>) -> Self::Output {
        self.clone() / rhs
    }
}

/* ---- formatting ---- */

/// Coefficient values in index order, separated by single spaces.
///
/// Meant for debugging output, not as an interchange format.
impl<const P: u64> fmt::Display for Poly<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.coeffs.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", c.value())?;
        }
        Ok(())
    }
}

impl<const P: u64> fmt::Debug for Poly<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (i, &coeff) in self.coeffs.iter().enumerate() {
            if coeff.is_zero() {
                continue;
            }

            if !first {
                write!(f, " + ")?;
            }
            first = false;

            match i {
                0 => write!(f, "{}", coeff.value())?,
                1 if coeff.is_one() => write!(f, "x")?,
                1 => write!(f, "{}*x", coeff.value())?,
                _ if coeff.is_one() => write!(f, "x^{}", i)?,
                _ => write!(f, "{}*x^{}", coeff.value(), i)?,
            }
        }

        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl<const P: u64> serde::Serialize for Poly<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;

        let mut seq = serializer.serialize_seq(Some(self.coeffs.len()))?;
        for c in &self.coeffs {
            seq.serialize_element(&c.value())?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, const P: u64> serde::Deserialize<'de> for Poly<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let values = <Vec<u64> as serde::Deserialize>::deserialize(deserializer)?;
        Ok(values.into_iter().map(Fp::new).collect())
    }
}
