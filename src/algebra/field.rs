use super::ring::Ring;

/// A field: a [`Ring`] where every non-zero element is invertible.
pub trait Field: Ring {
    /// Multiplicative inverse, `None` for zero.
    fn inverse(self) -> Option<Self>;

    /// Division that reports a zero divisor instead of panicking.
    #[inline]
    fn try_div(self, rhs: Self) -> Option<Self> {
        rhs.inverse().map(|inv| self * inv)
    }
}
