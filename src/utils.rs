use alloc::vec::Vec;

/// Check if `n` is a prime number.
///
/// Uses trial division up to sqrt(n). Suitable for validating
/// moduli at startup, not for high-performance primality testing.
pub const fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut i = 3;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Exponent of the largest power of two dividing `n`.
///
/// For a prime modulus `p`, `two_adicity(p - 1)` bounds the longest
/// transform the field supports: `2^two_adicity(p - 1)`.
pub const fn two_adicity(n: u64) -> u32 {
    if n == 0 {
        return 0;
    }
    n.trailing_zeros()
}

/// Distinct prime factors of `n` in increasing order.
pub fn prime_factors(mut n: u64) -> Vec<u64> {
    let mut factors = Vec::new();

    let mut d = 2;
    while d <= n / d {
        if n % d == 0 {
            factors.push(d);
            while n % d == 0 {
                n /= d;
            }
        }
        d += 1;
    }
    if n > 1 {
        factors.push(n);
    }

    factors
}
