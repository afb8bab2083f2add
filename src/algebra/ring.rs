use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// A commutative ring with identity, written with the usual operators.
///
/// Polynomial coefficients are accumulated in place, so the compound
/// assignment operators are part of the contract.
pub trait Ring:
    Sized
    + Copy
    + Eq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    const ZERO: Self;
    const ONE: Self;

    #[inline]
    fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    #[inline]
    fn is_one(&self) -> bool {
        *self == Self::ONE
    }
}
