use crate::error::RootError;
use crate::poly::Polynomial;
use crate::scalar::Scalar;

/// Number of sign changes between consecutive nonzero coefficients, walking
/// ascending-degree order. Upper-bounds (and matches the parity of) the
/// number of positive real roots, per Descartes' rule.
pub fn sign_variation_count<T: Scalar>(p: &Polynomial<T>) -> Result<usize, RootError> {
    let d = p.degree();
    let mut last_sign: Option<bool> = None;
    let mut variations = 0usize;
    for &c in &p.coeffs()[..=d] {
        if c.is_nan() {
            return Err(RootError::NonFiniteCoefficient { index: 0 });
        }
        if c.is_zero() {
            continue;
        }
        let sign = c > T::zero();
        if let Some(prev) = last_sign {
            if prev != sign {
                variations += 1;
            }
        }
        last_sign = Some(sign);
    }
    Ok(variations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(c: &[f64]) -> Polynomial<f64> {
        Polynomial::new(c.to_vec()).unwrap()
    }

    #[test]
    fn no_variation_for_all_positive() {
        assert_eq!(sign_variation_count(&p(&[1.0, 1.0, 1.0])).unwrap(), 0);
    }

    #[test]
    fn single_variation_for_one_sign_change() {
        // x - 1 has exactly one positive root
        assert_eq!(sign_variation_count(&p(&[-1.0, 1.0])).unwrap(), 1);
    }

    #[test]
    fn two_variations_for_alternating_signs() {
        // x^2 - 4x + 3
        assert_eq!(sign_variation_count(&p(&[3.0, -4.0, 1.0])).unwrap(), 2);
    }

    #[test]
    fn zeros_are_skipped() {
        assert_eq!(sign_variation_count(&p(&[1.0, 0.0, -1.0, 0.0, 1.0])).unwrap(), 2);
    }

    #[test]
    fn no_positive_roots_for_x_cubed_plus_x_plus_one() {
        assert_eq!(sign_variation_count(&p(&[1.0, 1.0, 0.0, 1.0])).unwrap(), 0);
    }
}
