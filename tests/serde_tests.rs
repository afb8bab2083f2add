//! Serde serialization/deserialization tests
//!
//! Run with: cargo test --features serde --test serde_tests

#![cfg(feature = "serde")]

use polyntt::{Fp, Poly, Thresholds};

type F = Fp<998244353>;

#[test]
fn fp_roundtrip() {
    let a = F::new(123456789);
    let json = serde_json::to_string(&a).unwrap();
    assert_eq!(json, "123456789");
    let b: F = serde_json::from_str(&json).unwrap();
    assert_eq!(a, b);
}

#[test]
fn fp_reduces_on_read() {
    let a: F = serde_json::from_str("998244354").unwrap();
    assert_eq!(a, F::new(1));
}

#[test]
fn poly_roundtrip() {
    // 3 + 2x + x^2
    let p = Poly::new(vec![F::new(3), F::new(2), F::new(1)]);
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, "[3,2,1]");
    let q: Poly<998244353> = serde_json::from_str(&json).unwrap();
    assert_eq!(p, q);
}

#[test]
fn poly_keeps_trailing_zeros() {
    let p = Poly::<998244353>::from_values(&[1, 0, 0]);
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, "[1,0,0]");
    let q: Poly<998244353> = serde_json::from_str(&json).unwrap();
    assert_eq!(q.len(), 3);
    assert_eq!(p, q);
}

#[test]
fn poly_zero_roundtrip() {
    let p = Poly::<998244353>::zero();
    let json = serde_json::to_string(&p).unwrap();
    assert_eq!(json, "[]");
    let q: Poly<998244353> = serde_json::from_str(&json).unwrap();
    assert_eq!(p, q);
}

#[test]
fn thresholds_roundtrip() {
    let t = Thresholds::default().with_mul_cuts(8, 32);
    let json = serde_json::to_string(&t).unwrap();
    let back: Thresholds = serde_json::from_str(&json).unwrap();
    assert_eq!(t, back);
}

#[test]
fn thresholds_missing_fields_use_defaults() {
    let t: Thresholds = serde_json::from_str(r#"{"inverse_seed": 16}"#).unwrap();
    assert_eq!(t, Thresholds::default().with_inverse_seed(16));
}
