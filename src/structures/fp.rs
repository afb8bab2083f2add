use core::fmt;
use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::algebra::field::Field;
use crate::algebra::ring::Ring;
use crate::utils::{is_prime, prime_factors, two_adicity};

/// -P^(-1) mod 2^64, by Newton iteration on the 2-adic inverse.
const fn compute_p_inv(p: u64) -> u64 {
    // x <- x * (2 - p * x) doubles the number of correct low bits.
    let mut x: u64 = 1;
    let mut i = 0;
    while i < 6 {
        x = x.wrapping_mul(2u64.wrapping_sub(p.wrapping_mul(x)));
        i += 1;
    }
    x.wrapping_neg()
}

/// R mod P where R = 2^64.
const fn compute_r_mod_p(p: u64) -> u64 {
    ((1u128 << 64) % (p as u128)) as u64
}

/// R^2 mod P.
const fn compute_r2_mod_p(p: u64) -> u64 {
    let r = (1u128 << 64) % (p as u128);
    ((r * r) % (p as u128)) as u64
}

struct MontgomeryParams<const P: u64>;

impl<const P: u64> MontgomeryParams<P> {
    const P_INV: u64 = compute_p_inv(P);
    const R: u64 = compute_r_mod_p(P);
    const R2: u64 = compute_r2_mod_p(P);
}

/// Given `t < P * 2^64`, returns `t * 2^-64 mod P`.
#[inline]
const fn montgomery_reduce<const P: u64>(t: u128) -> u64 {
    let m = (t as u64).wrapping_mul(MontgomeryParams::<P>::P_INV);
    let t = ((t + (m as u128) * (P as u128)) >> 64) as u64;
    if t >= P {
        t - P
    } else {
        t
    }
}

#[inline]
const fn to_montgomery<const P: u64>(a: u64) -> u64 {
    montgomery_reduce::<P>((a as u128) * (MontgomeryParams::<P>::R2 as u128))
}

#[inline]
const fn from_montgomery<const P: u64>(a_mont: u64) -> u64 {
    montgomery_reduce::<P>(a_mont as u128)
}

/// Element of the prime field GF(P).
///
/// The modulus is a const generic so each prime gets its own type and no
/// arithmetic branches on it at runtime. `P` must be an odd prime below
/// `2^63` (so two reduced values can be added in a `u64`). Values are kept
/// in Montgomery form; [`Fp::value`] returns the representative in `[0, P)`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Fp<const P: u64> {
    mont: u64,
}

#[cfg(feature = "rand")]
impl<const P: u64> rand::distributions::Distribution<Fp<P>> for rand::distributions::Standard {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Fp<P> {
        Fp::new(rng.gen_range(0..P))
    }
}

#[cfg(feature = "serde")]
impl<const P: u64> serde::Serialize for Fp<P> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde::Serialize::serialize(&self.value(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, const P: u64> serde::Deserialize<'de> for Fp<P> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = <u64 as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self::new(value))
    }
}

impl<const P: u64> Fp<P> {
    // Evaluated once per modulus at compile time.
    const MODULUS_OK: bool = Self::validate_prime().is_ok();

    /// Create a field element, reducing `value` modulo `P`.
    ///
    /// In debug builds, this asserts that `P` is a supported modulus.
    pub fn new(value: u64) -> Self {
        debug_assert!(Self::MODULUS_OK, "unsupported modulus P={}", P);
        Self {
            mont: to_montgomery::<P>(value % P),
        }
    }

    #[inline]
    const fn from_mont(mont: u64) -> Self {
        Self { mont }
    }

    /// Representative in `[0, P)`.
    pub const fn value(self) -> u64 {
        from_montgomery::<P>(self.mont)
    }

    /// The modulus `P`.
    pub const fn modulus() -> u64 {
        P
    }

    /// Check that `P` is an odd prime below `2^63`.
    ///
    /// # Example
    ///
    /// ```
    /// use polyntt::Fp;
    ///
    /// assert!(Fp::<998244353>::validate_prime().is_ok());
    /// assert!(Fp::<15>::validate_prime().is_err());
    /// ```
    pub const fn validate_prime() -> Result<(), &'static str> {
        if P == 2 {
            return Err("modulus P=2 is not supported (must be odd for Montgomery)");
        }
        if P >= 1 << 63 {
            return Err("modulus P must be below 2^63");
        }
        if !is_prime(P) {
            return Err("modulus P is not prime");
        }
        Ok(())
    }

    /// Largest `k` such that `2^k` divides `P - 1`.
    ///
    /// Transforms over this field are limited to length `2^k`.
    pub const fn two_adicity() -> u32 {
        two_adicity(P - 1)
    }

    /// `self^exp` by square-and-multiply.
    ///
    /// ```
    /// use polyntt::{Fp, Ring};
    ///
    /// type F17 = Fp<17>;
    ///
    /// let a = F17::new(3);
    /// assert_eq!(a.pow(0), F17::ONE);
    /// assert_eq!(a.pow(2), a * a);
    /// assert_eq!(a.pow(16), F17::ONE);
    /// ```
    #[inline]
    pub fn pow(self, exp: u64) -> Self {
        let mut base = self;
        let mut result = Self::ONE;
        let mut e = exp;

        while e > 0 {
            if e & 1 == 1 {
                result *= base;
            }
            base *= base;
            e >>= 1;
        }
        result
    }

    /// Whether `self` generates the multiplicative group GF(P)^*.
    pub fn is_primitive_root(self) -> bool {
        if self.mont == 0 {
            return false;
        }

        let group_order = P - 1;
        prime_factors(group_order)
            .into_iter()
            .all(|q| self.pow(group_order / q) != Self::ONE)
    }

    /// Smallest generator of GF(P)^*.
    ///
    /// The transform derives every root of unity from this element.
    ///
    /// ```
    /// use polyntt::Fp;
    ///
    /// assert_eq!(Fp::<998244353>::primitive_root().unwrap().value(), 3);
    /// assert_eq!(Fp::<17>::primitive_root().unwrap().value(), 3);
    /// ```
    pub fn primitive_root() -> Option<Self> {
        (2..P).map(Self::new).find(|g| g.is_primitive_root())
    }
}

impl<const P: u64> fmt::Debug for Fp<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fp<{}>({})", P, self.value())
    }
}

impl<const P: u64> fmt::Display for Fp<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl<const P: u64> Default for Fp<P> {
    fn default() -> Self {
        Self::ZERO
    }
}

/* ---- conversions ---- */

impl<const P: u64> From<u64> for Fp<P> {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl<const P: u64> From<u32> for Fp<P> {
    fn from(value: u32) -> Self {
        Self::new(value as u64)
    }
}

impl<const P: u64> From<u16> for Fp<P> {
    fn from(value: u16) -> Self {
        Self::new(value as u64)
    }
}

impl<const P: u64> From<u8> for Fp<P> {
    fn from(value: u8) -> Self {
        Self::new(value as u64)
    }
}

/// Negative values map to their additive inverse: `-1` becomes `P - 1`.
impl<const P: u64> From<i64> for Fp<P> {
    fn from(value: i64) -> Self {
        Self::new(value.rem_euclid(P as i64) as u64)
    }
}

impl<const P: u64> From<Fp<P>> for u64 {
    fn from(fp: Fp<P>) -> Self {
        fp.value()
    }
}

/* ---- arithmetic operators ---- */

impl<const P: u64> Add for Fp<P> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        let mut sum = self.mont + rhs.mont;
        if sum >= P {
            sum -= P;
        }
        Self::from_mont(sum)
    }
}

impl<const P: u64> Sub for Fp<P> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        if self.mont >= rhs.mont {
            Self::from_mont(self.mont - rhs.mont)
        } else {
            Self::from_mont(self.mont + P - rhs.mont)
        }
    }
}

impl<const P: u64> Mul for Fp<P> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        let prod = (self.mont as u128) * (rhs.mont as u128);
        Self::from_mont(montgomery_reduce::<P>(prod))
    }
}

impl<const P: u64> Neg for Fp<P> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        if self.mont == 0 {
            self
        } else {
            Self::from_mont(P - self.mont)
        }
    }
}

/// Division by zero panics; use [`Field::try_div`] to check instead.
impl<const P: u64> Div for Fp<P> {
    type Output = Self;

    #[inline]
    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.inverse().expect("division by zero in Fp")
    }
}

impl<const P: u64> AddAssign for Fp<P> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const P: u64> SubAssign for Fp<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<const P: u64> MulAssign for Fp<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<const P: u64> DivAssign for Fp<P> {
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<const P: u64> Sum for Fp<P> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl<const P: u64> Product for Fp<P> {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

impl<const P: u64> Ring for Fp<P> {
    // Zero is zero in Montgomery form too.
    const ZERO: Self = Self { mont: 0 };
    const ONE: Self = Self {
        mont: MontgomeryParams::<P>::R,
    };
}

impl<const P: u64> Field for Fp<P> {
    fn inverse(self) -> Option<Self> {
        if self.mont == 0 {
            return None;
        }

        let (g, x) = egcd(self.value() as i128, P as i128);
        if g != 1 {
            return None;
        }
        Some(Self::from_mont(to_montgomery::<P>(x.rem_euclid(P as i128) as u64)))
    }
}

/// Returns `(g, x)` with `g = gcd(a, b)` and `a*x ≡ g (mod b)`.
fn egcd(a: i128, b: i128) -> (i128, i128) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_s, mut s) = (1i128, 0i128);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }
    (old_r, old_s)
}
