use proptest::prelude::*;

use polyntt::{Fp, Poly, PolyEngine, Ring, Thresholds};

const MOD: u64 = 998244353;
type F = Fp<MOD>;
type Pm = Poly<MOD>;
type F17 = Fp<17>;

fn arb_f() -> impl Strategy<Value = F> {
    (0u64..MOD).prop_map(F::new)
}

fn arb_poly(max_len: usize) -> impl Strategy<Value = Pm> {
    prop::collection::vec(arb_f(), 0..=max_len).prop_map(Poly::new)
}

/// Non-empty, constant term fixed to `c`.
fn arb_series(max_len: usize, c: u64) -> impl Strategy<Value = Pm> {
    prop::collection::vec(arb_f(), 1..=max_len).prop_map(move |mut v| {
        v[0] = F::new(c);
        Poly::new(v)
    })
}

/// A divisor that does not normalize to zero.
fn arb_divisor(max_len: usize) -> impl Strategy<Value = Pm> {
    prop::collection::vec(arb_f(), 1..=max_len).prop_map(|mut v| {
        let last = v.len() - 1;
        if v[last].is_zero() {
            v[last] = F::ONE;
        }
        Poly::new(v)
    })
}

fn f17_poly(max_len: usize) -> impl Strategy<Value = Poly<17>> {
    prop::collection::vec((0u64..17).prop_map(F17::new), 0..=max_len).prop_map(Poly::new)
}

fn one_mod_x(d: usize) -> Pm {
    let mut one = Pm::with_len(d);
    if d > 0 {
        one[0] = F::ONE;
    }
    one
}

// ===== Addition and subtraction =====

proptest! {
    #[test]
    fn addition_commutative(a in arb_poly(40), b in arb_poly(40)) {
        prop_assert_eq!(&a + &b, &b + &a);
    }
}

proptest! {
    #[test]
    fn addition_associative(a in arb_poly(40), b in arb_poly(40), c in arb_poly(40)) {
        prop_assert_eq!(&(&a + &b) + &c, &a + &(&b + &c));
    }
}

proptest! {
    #[test]
    fn addition_length_is_max(a in arb_poly(40), b in arb_poly(40)) {
        prop_assert_eq!((&a + &b).len(), a.len().max(b.len()));
        prop_assert_eq!((&a - &b).len(), a.len().max(b.len()));
    }
}

proptest! {
    #[test]
    fn subtraction_undoes_addition(a in arb_poly(40), b in arb_poly(40)) {
        let mut back = &(&a + &b) - &b;
        back.normalize();
        prop_assert_eq!(back, a.normalized());
    }
}

proptest! {
    #[test]
    fn negation_is_subtraction_from_zero(a in arb_poly(40)) {
        prop_assert_eq!(-&a, &Pm::zero() - &a);
    }
}

// ===== Multiplication =====

proptest! {
    #[test]
    fn multiplication_commutative(a in arb_poly(80), b in arb_poly(80)) {
        prop_assert_eq!(&a * &b, &b * &a);
    }
}

proptest! {
    #[test]
    fn multiplication_associative(a in arb_poly(30), b in arb_poly(30), c in arb_poly(30)) {
        prop_assert_eq!(&(&a * &b) * &c, &a * &(&b * &c));
    }
}

proptest! {
    #[test]
    fn distributive_after_normalization(a in arb_poly(50), b in arb_poly(50), c in arb_poly(50)) {
        let lhs = (&a * &(&b + &c)).normalized();
        let rhs = (&(&a * &b) + &(&a * &c)).normalized();
        prop_assert_eq!(lhs, rhs);
    }
}

proptest! {
    #[test]
    fn product_length(a in arb_poly(60), b in arb_poly(60)) {
        let expected = if a.is_empty() || b.is_empty() { 0 } else { a.len() + b.len() - 1 };
        prop_assert_eq!((&a * &b).len(), expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn transform_and_schoolbook_agree(
        n in 1usize..150,
        m in 1usize..150,
        seed in any::<u64>(),
    ) {
        let a: Pm = (0..n as u64).map(|i| F::new(seed.wrapping_mul(i + 1) % MOD)).collect();
        let b: Pm = (0..m as u64).map(|i| F::new(seed.rotate_left(17).wrapping_add(i * i) % MOD)).collect();
        let mut engine = PolyEngine::new();
        prop_assert_eq!(engine.mul_ntt(&a, &b), PolyEngine::mul_naive(&a, &b));
    }
}

proptest! {
    #[test]
    fn product_evaluates_pointwise(a in arb_poly(70), b in arb_poly(70), x in arb_f()) {
        prop_assert_eq!((&a * &b).eval(x), a.eval(x) * b.eval(x));
    }
}

// ===== Division =====

proptest! {
    #[test]
    fn division_identity(a in arb_poly(120), b in arb_divisor(60)) {
        let mut engine = PolyEngine::new();
        let (q, r) = engine.div_rem(&a, &b);
        prop_assert!(r.degree() < b.degree() || r.is_empty());
        let back = (&engine.mul(&q, &b) + &r).normalized();
        prop_assert_eq!(back, a.normalized());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn long_and_newton_division_agree(a in arb_poly(260), b in arb_divisor(130)) {
        let mut engine = PolyEngine::new();
        prop_assert_eq!(engine.div_newton(&a, &b), PolyEngine::div_naive(&a, &b));
    }
}

proptest! {
    #[test]
    fn division_outcome_independent_of_thresholds(a in arb_poly(100), b in arb_divisor(50)) {
        let mut fast = PolyEngine::with_thresholds(Thresholds::always_fast()).unwrap();
        let mut naive = PolyEngine::with_thresholds(Thresholds::always_naive()).unwrap();
        prop_assert_eq!(fast.div_rem(&a, &b), naive.div_rem(&a, &b));
    }
}

proptest! {
    #[test]
    fn small_field_division_identity(a in f17_poly(20), b in f17_poly(8)) {
        prop_assume!(!b.is_zero());
        let (q, r) = a.div_rem(&b);
        prop_assert_eq!((&(&q * &b) + &r).normalized(), a.normalized());
    }
}

// ===== Power series =====

proptest! {
    #[test]
    fn inverse_round_trip(p in arb_series(80, 7), d in 0usize..300) {
        let mut engine = PolyEngine::new();
        let q = engine.inv(&p, d);
        prop_assert_eq!(q.len(), d);
        let mut check = engine.mul(&p, &q);
        check.resize(d);
        prop_assert_eq!(check, one_mod_x(d));
    }
}

proptest! {
    #[test]
    fn inverse_of_nonzero_constant_exists(c in 1u64..MOD, tail in arb_poly(20)) {
        let mut p = Pm::from_values(&[c as i64]);
        p += &(&tail * &Pm::x());
        prop_assert!(p.checked_inv(16).is_ok());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn exp_inverts_log(p in arb_series(60, 1), d in 1usize..160) {
        let mut engine = PolyEngine::new();
        let l = engine.log(&p, d);
        prop_assert!(l[0].is_zero());
        let mut expected = p.truncated(d);
        expected.resize(d);
        prop_assert_eq!(engine.exp(&l, d), expected);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn log_inverts_exp(p in arb_series(60, 0), d in 1usize..160) {
        let mut engine = PolyEngine::new();
        let e = engine.exp(&p, d);
        prop_assert_eq!(e[0], F::ONE);
        let mut expected = p.truncated(d);
        expected.resize(d);
        prop_assert_eq!(engine.log(&e, d), expected);
    }
}

// ===== Calculus =====

proptest! {
    #[test]
    fn derivative_of_integral(p in arb_poly(60), c in arb_f()) {
        prop_assert_eq!(p.integral(c).derivative(), p);
    }
}

proptest! {
    #[test]
    fn integral_of_derivative(p in arb_poly(60)) {
        let mut back = p.derivative().integral(p.coeff(0));
        back.resize(p.len());
        prop_assert_eq!(back, p);
    }
}

proptest! {
    #[test]
    fn derivative_is_linear(a in arb_poly(40), b in arb_poly(40), k in arb_f()) {
        let lhs = (&a * k + b.clone()).derivative();
        let rhs = &(a.derivative() * k) + &b.derivative();
        prop_assert_eq!(lhs, rhs);
    }
}

proptest! {
    #[test]
    fn product_rule(a in arb_poly(30), b in arb_poly(30)) {
        prop_assume!(!a.is_empty() && !b.is_empty());
        let lhs = (&a * &b).derivative().normalized();
        let rhs = (&(&a.derivative() * &b) + &(&a * &b.derivative())).normalized();
        prop_assert_eq!(lhs, rhs);
    }
}

#[test]
fn exp_of_zero_is_one() {
    let mut engine = PolyEngine::<MOD>::new();
    assert_eq!(engine.exp(&Pm::zero(), 7), one_mod_x(7));
}

#[test]
fn eval_is_consistent_with_division_by_linear_factor() {
    // p(a) is the remainder of p / (x - a)
    let p = Pm::from_values(&[5, -3, 0, 2, 11]);
    let a = F::new(12345);
    let divisor = Pm::new(vec![-a, F::ONE]);
    let r = &p % &divisor;
    assert_eq!(r.coeff(0), p.eval(a));
}
