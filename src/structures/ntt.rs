//! Number Theoretic Transform (NTT) over `Fp<P>`.
//!
//! NTT is the finite field analog of FFT: a length-`n` transform needs a
//! primitive `n`-th root of unity, so `n` must be a power of two dividing
//! `P - 1`.
//!
//! # Common NTT-friendly primes
//!
//! - 998244353 = 119 · 2²³ + 1 (max NTT size: 2²³)
//! - 469762049 = 7 · 2²⁶ + 1 (max NTT size: 2²⁶)
//! - 167772161 = 5 · 2²⁵ + 1 (max NTT size: 2²⁵)
//!
//! # Caching
//!
//! [`NttCache`] keeps the bit-reversal permutation and the per-stage roots
//! for the last transform length it was asked for. A request for any other
//! length rebuilds both tables from scratch; only exact-length hits reuse
//! them. The cache is an ordinary value: every transform takes `&mut self`,
//! so sharing one cache between threads needs an outer lock.

use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::algebra::field::Field;
use crate::algebra::ring::Ring;
use crate::error::PolyError;
use crate::structures::fp::Fp;

/// Information about NTT support for a prime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NttInfo {
    /// The largest power of 2 that divides p-1.
    /// This is the maximum NTT size supported.
    pub max_log2: u32,
    /// A primitive root of unity of order 2^max_log2.
    pub primitive_root: u64,
}

/// Check if a prime p supports NTT and return relevant information.
///
/// Returns `None` if p-1 is odd or no generator of GF(p)^* exists.
///
/// # Example
///
/// ```
/// use polyntt::ntt::ntt_info;
///
/// let info = ntt_info::<998244353>().unwrap();
/// assert_eq!(info.max_log2, 23);
/// ```
pub fn ntt_info<const P: u64>() -> Option<NttInfo> {
    let max_log2 = Fp::<P>::two_adicity();
    if max_log2 == 0 {
        return None;
    }

    let g = Fp::<P>::primitive_root()?;
    let omega = g.pow((P - 1) >> max_log2);

    Some(NttInfo {
        max_log2,
        primitive_root: omega.value(),
    })
}

/// Longest transform the field supports, `2^two_adicity(P - 1)`.
pub fn max_transform_len<const P: u64>() -> usize {
    1usize
        .checked_shl(Fp::<P>::two_adicity())
        .unwrap_or(usize::MAX)
}

/// Primitive `n`-th root of unity, or `None` if `n` is not a supported
/// power of two.
///
/// This is the root the forward transform evaluates at: after
/// [`NttCache::transform`], element `k` holds `Σ a[j]·ω^(jk)`.
pub fn root_of_unity<const P: u64>(n: usize) -> Option<Fp<P>> {
    if n == 0 || !n.is_power_of_two() || n > max_transform_len::<P>() {
        return None;
    }
    let g = Fp::<P>::primitive_root()?;
    Some(g.pow((P - 1) / n as u64))
}

/// Reusable transform tables for one length at a time.
///
/// # Example
///
/// ```
/// use polyntt::{Fp, NttCache};
///
/// type F = Fp<998244353>;
///
/// let mut cache = NttCache::<998244353>::new();
/// let original: Vec<F> = (1..=8).map(F::new).collect();
///
/// let mut buf = original.clone();
/// cache.transform(&mut buf);
/// cache.inverse_transform(&mut buf);
/// assert_eq!(buf, original);
/// assert_eq!(cache.cached_len(), 8);
/// ```
#[derive(Clone, Debug)]
pub struct NttCache<const P: u64> {
    /// Generator of GF(P)^*, found on the first table build.
    generator: Option<Fp<P>>,
    /// Length the tables below were built for; 0 when empty.
    len: usize,
    /// `rev[i]` is `i` with its low `log2(len)` bits reversed.
    rev: Vec<usize>,
    /// `roots[k]` is a primitive `2^(k+1)`-th root of unity.
    roots: Vec<Fp<P>>,
}

impl<const P: u64> Default for NttCache<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const P: u64> NttCache<P> {
    /// An empty cache. Tables are built on the first transform.
    pub const fn new() -> Self {
        Self {
            generator: None,
            len: 0,
            rev: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// Transform length the tables currently describe (0 if none).
    pub fn cached_len(&self) -> usize {
        self.len
    }

    /// Drop the cached tables.
    pub fn clear(&mut self) {
        self.len = 0;
        self.rev.clear();
        self.roots.clear();
    }

    fn check_len(len: usize) -> Result<(), PolyError> {
        if len == 0 {
            return Ok(());
        }
        if !len.is_power_of_two() {
            return Err(PolyError::TransformLength { len });
        }
        let max = max_transform_len::<P>();
        if len > max {
            return Err(PolyError::TransformTooLarge {
                len,
                max,
                modulus: P,
            });
        }
        Ok(())
    }

    /// Build the tables for length `n` unless they are already cached.
    fn prepare(&mut self, n: usize) {
        if self.len == n {
            trace!(len = n, "transform tables reused");
            return;
        }
        debug!(len = n, cached = self.len, "rebuilding transform tables");

        let generator = *self.generator.get_or_insert_with(|| {
            Fp::<P>::primitive_root().expect("prime modulus has a primitive root")
        });
        let lg = n.trailing_zeros();

        self.rev.clear();
        self.rev.resize(n, 0);
        for mask in 1..n {
            self.rev[mask] = (self.rev[mask >> 1] >> 1) | ((mask & 1) << (lg - 1));
        }

        self.roots = (0..lg)
            .map(|k| generator.pow((P - 1) / (2u64 << k)))
            .collect();
        self.len = n;
    }

    fn forward(&mut self, a: &mut [Fp<P>]) {
        let n = a.len();
        if n <= 1 {
            return;
        }
        self.prepare(n);

        for i in 0..n {
            let j = self.rev[i];
            if j < i {
                a.swap(i, j);
            }
        }

        let mut len = 1;
        while len < n {
            let root = self.roots[len.trailing_zeros() as usize];
            for start in (0..n).step_by(len << 1) {
                let mut w = Fp::ONE;
                for j in start..start + len {
                    let v = a[j + len] * w;
                    a[j + len] = a[j] - v;
                    a[j] += v;
                    w *= root;
                }
            }
            len <<= 1;
        }
    }

    /// Forward transform in place: `a[k] ← Σ a[j]·ω^(jk)` with `ω` the
    /// primitive `a.len()`-th root of unity.
    ///
    /// # Panics
    ///
    /// Panics if `a.len()` is not a power of two (an empty slice is fine) or
    /// exceeds [`max_transform_len`].
    pub fn transform(&mut self, a: &mut [Fp<P>]) {
        if let Err(err) = Self::check_len(a.len()) {
            panic!("{err}");
        }
        self.forward(a);
    }

    /// Inverse of [`transform`](Self::transform).
    ///
    /// Runs the forward transform, reverses elements `1..n` (which turns
    /// `ω` into `ω⁻¹`) and scales by `1/n`, so no second root table is kept.
    ///
    /// # Panics
    ///
    /// Same conditions as [`transform`](Self::transform).
    pub fn inverse_transform(&mut self, a: &mut [Fp<P>]) {
        if let Err(err) = Self::check_len(a.len()) {
            panic!("{err}");
        }
        self.backward(a);
    }

    fn backward(&mut self, a: &mut [Fp<P>]) {
        let n = a.len();
        if n == 0 {
            return;
        }
        self.forward(a);
        a[1..].reverse();

        let n_inv = Fp::<P>::new(n as u64)
            .inverse()
            .expect("n must be invertible mod p");
        for x in a.iter_mut() {
            *x *= n_inv;
        }
    }

    /// [`transform`](Self::transform) that reports a bad length instead of panicking.
    pub fn checked_transform(&mut self, a: &mut [Fp<P>]) -> Result<(), PolyError> {
        Self::check_len(a.len())?;
        self.forward(a);
        Ok(())
    }

    /// [`inverse_transform`](Self::inverse_transform) that reports a bad length
    /// instead of panicking.
    pub fn checked_inverse_transform(&mut self, a: &mut [Fp<P>]) -> Result<(), PolyError> {
        Self::check_len(a.len())?;
        self.backward(a);
        Ok(())
    }

    /// Exact linear convolution of `a` and `b` through the transform.
    ///
    /// The result has `a.len() + b.len() - 1` entries, or none if either
    /// input is empty.
    ///
    /// # Panics
    ///
    /// Panics if the padded length exceeds [`max_transform_len`].
    pub fn convolve(&mut self, a: &[Fp<P>], b: &[Fp<P>]) -> Vec<Fp<P>> {
        if a.is_empty() || b.is_empty() {
            return Vec::new();
        }

        let result_len = a.len() + b.len() - 1;
        let n = result_len.next_power_of_two();

        let mut fa = Vec::with_capacity(n);
        fa.extend_from_slice(a);
        fa.resize(n, Fp::ZERO);
        let mut fb = Vec::with_capacity(n);
        fb.extend_from_slice(b);
        fb.resize(n, Fp::ZERO);

        self.transform(&mut fa);
        self.transform(&mut fb);
        for (x, &y) in fa.iter_mut().zip(fb.iter()) {
            *x *= y;
        }
        self.inverse_transform(&mut fa);

        fa.truncate(result_len);
        fa
    }
}
