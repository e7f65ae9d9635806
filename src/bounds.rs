use crate::poly::Polynomial;
use crate::scalar::Scalar;
use crate::transform::reverse;

/// Local-Max-Quadratic positive upper bound on the roots of `p`. Strictly
/// `>=` every positive real root. `O(d^2)`.
///
/// For each negative coefficient `c_i`, walks `j` from `d` down to `i+1`;
/// for every positive `c_j` encountered computes
/// `r = (2^t |c_i| / c_j)^(1/(j-i))` with `t` a per-`i` counter starting at
/// 1 and incrementing each time a positive `c_j` is used, and keeps the
/// minimum `r` seen. The bound is the max of these per-`i` minimums over
/// zero if there is no negative coefficient (no positive roots by
/// Descartes).
pub fn lmq_upper_bound<T: Scalar>(p: &Polynomial<T>) -> T {
    let d = p.degree();
    let raw = &p.coeffs()[..=d];
    let lc = raw[d];

    let coeffs: Vec<T> = if lc < T::zero() {
        raw.iter().map(|&c| -c).collect()
    } else {
        raw.to_vec()
    };

    let mut bound = T::zero();
    for i in 0..d {
        if coeffs[i] >= T::zero() {
            continue;
        }
        let mut t: i32 = 1;
        let mut m = T::infinity();
        for j in (i + 1..=d).rev() {
            if coeffs[j] > T::zero() {
                let exponent = T::one() / T::from_usize(j - i);
                let two_t = T::from_f64(2f64.powi(t)).expect("2^t fits f64");
                let r = (two_t * coeffs[i].abs() / coeffs[j]).powf(exponent);
                if r < m {
                    m = r;
                }
                t += 1;
            }
        }
        if m > bound {
            bound = m;
        }
    }
    bound
}

/// Local-Max-Quadratic positive lower bound: reverses the coefficients
/// (whose roots are the reciprocals `1/r_k`), runs the upper-bound
/// algorithm, and returns the result.
pub fn lmq_lower_bound<T: Scalar>(p: &Polynomial<T>) -> T {
    let reversed = reverse(p);
    let upper_of_reversed = lmq_upper_bound(&reversed);
    if upper_of_reversed.is_zero() {
        return T::zero();
    }
    T::one() / upper_of_reversed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(c: &[f64]) -> Polynomial<f64> {
        Polynomial::new(c.to_vec()).unwrap()
    }

    #[test]
    fn lmq_upper_bound_matches_literal_scenario() {
        let q = p(&[1.0, -2.0, -1.0, 2.0, 3.0]);
        let bound = lmq_upper_bound(&q);
        assert!((bound - (4.0_f64 / 3.0).cbrt()).abs() < 1e-6);
    }

    #[test]
    fn lmq_upper_bound_is_zero_with_no_negative_coefficient() {
        let q = p(&[1.0, 2.0, 3.0]);
        assert_eq!(lmq_upper_bound(&q), 0.0);
    }

    #[test]
    fn bounds_contain_every_positive_root() {
        // x^2 - 4x + 3, roots at 1 and 3
        let q = p(&[3.0, -4.0, 1.0]);
        let lower = lmq_lower_bound(&q);
        let upper = lmq_upper_bound(&q);
        assert!(lower <= 1.0 + 1e-9);
        assert!(upper >= 3.0 - 1e-9);
    }

    #[test]
    fn bounds_contain_root_of_sqrt_two_quadratic() {
        let q = p(&[-2.0, 0.0, 1.0]);
        let lower = lmq_lower_bound(&q);
        let upper = lmq_upper_bound(&q);
        let root = 2f64.sqrt();
        assert!(lower <= root + 1e-9);
        assert!(upper >= root - 1e-9);
    }
}
