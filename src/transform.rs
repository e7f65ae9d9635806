use crate::error::RootError;
use crate::poly::Polynomial;
use crate::scalar::Scalar;
use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static BINOMIAL_CACHE: RefCell<HashMap<(usize, usize), f64>> = RefCell::new(HashMap::new());
}

/// `C(n, k)`, memoized via `C(n,k) = C(n-1,k-1) + C(n-1,k)`. The cache is
/// write-once per key and safe to recompute from scratch per call site; it
/// exists purely for locality, not correctness.
pub fn binomial(n: usize, k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    if k == 0 || k == n {
        return 1.0;
    }
    if let Some(v) = BINOMIAL_CACHE.with(|c| c.borrow().get(&(n, k)).copied()) {
        return v;
    }
    let v = binomial(n - 1, k - 1) + binomial(n - 1, k);
    BINOMIAL_CACHE.with(|c| c.borrow_mut().insert((n, k), v));
    v
}

/// `P(x) <- P(x + s)`, via the binomial identity
/// `c'_k = sum_{i>=k} c_i * C(i,k) * s^(i-k)`.
pub fn shift<T: Scalar>(p: &Polynomial<T>, s: T) -> Polynomial<T> {
    let d = p.degree();
    let coeffs = p.coeffs()[..=d].to_vec();
    let mut out = vec![T::zero(); d + 1];
    for (k, slot) in out.iter_mut().enumerate() {
        let mut acc = T::zero();
        for (i, &ci) in coeffs.iter().enumerate().skip(k) {
            let bin = T::from_f64(binomial(i, k)).expect("binomial fits in f64");
            acc += ci * bin * s.powi((i - k) as i32);
        }
        *slot = acc;
    }
    Polynomial::new(out).expect("shift of a finite polynomial is finite")
}

/// `P(x) <- P(s * x)`: `c'_i = s^i * c_i`.
pub fn scale<T: Scalar>(p: &Polynomial<T>, s: T) -> Polynomial<T> {
    let coeffs = p
        .coeffs()
        .iter()
        .enumerate()
        .map(|(i, &c)| c * s.powi(i as i32))
        .collect();
    Polynomial::new(coeffs).expect("scale of a finite polynomial is finite")
}

/// `P(x) <- x^d * P(1/x)`: reverses the coefficient order about the current
/// degree `d`, dropping any trailing-zero tail beyond `d` first.
pub fn reverse<T: Scalar>(p: &Polynomial<T>) -> Polynomial<T> {
    let d = p.degree();
    let mut coeffs: Vec<T> = p.coeffs()[..=d].to_vec();
    coeffs.reverse();
    Polynomial::new(coeffs).expect("reverse of a finite polynomial is finite")
}

/// Composite map `x <- s / (x + 1)`, returning `(x+1)^d * P(s / (x+1))`.
/// Implemented as Scale-by-`s`, then Reverse, then Shift-by-1 — one of two
/// algebraically equivalent realizations named in the design notes (the
/// other being Shift-by-1 then Reverse with no scale); see the
/// constant-term tests below for the zero and nonzero branches this
/// realization produces.
pub fn lower_interval_map<T: Scalar>(p: &Polynomial<T>, s: T) -> Polynomial<T> {
    let scaled = scale(p, s);
    let reversed = reverse(&scaled);
    shift(&reversed, T::one())
}

/// If `c_0 == 0`, divide by `x` (the explicit root at 0 has already been
/// reported by the caller). Leaves `p` untouched otherwise.
pub fn strip_leading_zero_root<T: Scalar>(p: &Polynomial<T>) -> Result<Polynomial<T>, RootError> {
    if !p.constant_term().is_zero() {
        return Ok(p.clone());
    }
    let d = p.degree();
    if d == 0 {
        return Ok(Polynomial::zero());
    }
    Polynomial::new(p.coeffs()[1..=d].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(c: &[f64]) -> Polynomial<f64> {
        Polynomial::new(c.to_vec()).unwrap()
    }

    #[test]
    fn binomial_matches_pascals_triangle() {
        assert_eq!(binomial(5, 0), 1.0);
        assert_eq!(binomial(5, 2), 10.0);
        assert_eq!(binomial(5, 5), 1.0);
    }

    #[test]
    fn shift_identity_at_zero() {
        let q = p(&[3.0, -4.0, 1.0]);
        assert_eq!(shift(&q, 0.0).coeffs(), q.coeffs());
    }

    #[test]
    fn shift_composition_law() {
        let q = p(&[3.0, -4.0, 1.0]);
        let direct = shift(&q, 7.0);
        let stepwise = shift(&shift(&q, 2.0), 5.0);
        for (a, b) in direct.coeffs().iter().zip(stepwise.coeffs()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn shift_moves_roots() {
        // x^2 - 4x + 3 has roots 1, 3; shifting by -1 gives roots 2, 4
        let q = p(&[3.0, -4.0, 1.0]);
        let s = shift(&q, -1.0);
        assert!(s.horner(2.0).abs() < 1e-9);
        assert!(s.horner(4.0).abs() < 1e-9);
    }

    #[test]
    fn scale_identity_at_one() {
        let q = p(&[3.0, -4.0, 1.0]);
        assert_eq!(scale(&q, 1.0).coeffs(), q.coeffs());
    }

    #[test]
    fn scale_composition_law() {
        let q = p(&[3.0, -4.0, 1.0]);
        let direct = scale(&q, 6.0);
        let stepwise = scale(&scale(&q, 2.0), 3.0);
        for (a, b) in direct.coeffs().iter().zip(stepwise.coeffs()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn reverse_is_involutive_up_to_trimming() {
        let q = p(&[3.0, -4.0, 1.0]);
        let rr = reverse(&reverse(&q));
        assert_eq!(rr.coeffs(), q.coeffs());
    }

    #[test]
    fn strip_leading_zero_root_divides_by_x() {
        // x^3 - x = x(x-1)(x+1)
        let q = p(&[0.0, -1.0, 0.0, 1.0]);
        let stripped = strip_leading_zero_root(&q).unwrap();
        assert_eq!(stripped.coeffs(), &[-1.0, 0.0, 1.0]);
    }

    #[test]
    fn strip_leading_zero_root_noop_when_nonzero_constant() {
        let q = p(&[3.0, -4.0, 1.0]);
        assert_eq!(strip_leading_zero_root(&q).unwrap().coeffs(), q.coeffs());
    }

    #[test]
    fn lower_interval_map_constant_term_equals_p_at_s() {
        // The mapped polynomial evaluated at x=0 is (0+1)^d P(s/1) = P(s),
        // so its constant term tracks whether s itself is a root of P.
        let q = p(&[3.0, -4.0, 1.0]); // roots at 1 and 3
        for &s in &[0.5, 1.0, 2.0, 3.0, 5.0] {
            let mapped = lower_interval_map(&q, s);
            assert!((mapped.constant_term() - q.horner(s)).abs() < 1e-9);
        }
    }

    #[test]
    fn lower_interval_map_constant_term_vanishes_when_s_is_a_root() {
        // P = x - 1 has a root at s = 1, so the mapped constant term is 0.
        let root_at_one = p(&[-1.0, 1.0]);
        let mapped = lower_interval_map(&root_at_one, 1.0);
        assert!(mapped.constant_term().abs() < 1e-12);
    }

    #[test]
    fn lower_interval_map_constant_term_nonzero_when_s_is_not_a_root() {
        let q = p(&[0.0, 1.0]); // P = x, root only at 0
        let mapped = lower_interval_map(&q, 1.0);
        assert!(mapped.constant_term().abs() > 1e-12);
    }
}
