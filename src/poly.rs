use crate::error::RootError;
use crate::scalar::Scalar;

/// An immutable coefficient vector in ascending-degree order: `coeffs[i]` is
/// the coefficient of `x^i`. The zero polynomial is represented as `[0]`.
///
/// Trailing zeros may be present; `degree()` always reports the index of the
/// highest nonzero coefficient, never `coeffs.len() - 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial<T: Scalar> {
    coeffs: Vec<T>,
}

impl<T: Scalar> Polynomial<T> {
    pub fn new(coeffs: Vec<T>) -> Result<Self, RootError> {
        if coeffs.is_empty() {
            return Err(RootError::EmptyCoefficients);
        }
        for (index, c) in coeffs.iter().enumerate() {
            if c.is_nan() {
                return Err(RootError::NonFiniteCoefficient { index });
            }
        }
        Ok(Self { coeffs })
    }

    pub fn zero() -> Self {
        Self {
            coeffs: vec![T::zero()],
        }
    }

    pub fn coeffs(&self) -> &[T] {
        &self.coeffs
    }

    pub fn len(&self) -> usize {
        self.coeffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// Index of the highest nonzero coefficient. `0` for the zero polynomial.
    pub fn degree(&self) -> usize {
        self.coeffs
            .iter()
            .rposition(|c| !c.is_zero())
            .unwrap_or(0)
    }

    pub fn is_zero_poly(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_zero())
    }

    pub fn leading_coeff(&self) -> T {
        self.coeffs[self.degree()]
    }

    pub fn constant_term(&self) -> T {
        self.coeffs[0]
    }

    /// Coefficients normalized so the leading coefficient is 1. Used by
    /// `gcd` and comparisons, per the data model's normalization invariant.
    pub fn normalize_monic(&self) -> Self {
        let lc = self.leading_coeff();
        if lc.is_one() {
            return self.clone();
        }
        Self {
            coeffs: self.coeffs.iter().map(|&c| c / lc).collect(),
        }
    }

    /// Drop trailing zero coefficients beyond the degree, keeping at least
    /// one coefficient.
    pub fn trimmed(&self) -> Self {
        let d = self.degree();
        Self {
            coeffs: self.coeffs[..=d].to_vec(),
        }
    }

    /// Horner's method: `d` fused multiply-adds, no error compensation.
    pub fn horner(&self, x: T) -> T {
        let mut iter = self.coeffs.iter().rev();
        let mut y = *iter.next().expect("non-empty by construction");
        for &c in iter {
            y = y * x + c;
        }
        y
    }

    /// Compensated Horner scheme (Graillat/Langlois/Louvet): evaluates via
    /// error-free transformations so the result carries roughly twice the
    /// working precision of `horner`. Used near roots to avoid false sign
    /// flips from catastrophic cancellation.
    pub fn compensated_horner(&self, x: T) -> T {
        let d = self.coeffs.len() - 1;
        let mut s = self.coeffs[d];
        let mut e = T::zero();
        for i in (0..d).rev() {
            let (p, pi) = two_product(s, x);
            let (new_s, sigma) = two_sum(p, self.coeffs[i]);
            e = e * x + (pi + sigma);
            s = new_s;
        }
        s + e
    }
}

/// Error-free transformation of `a + b` into `(sum, error)` with
/// `a + b == sum + error` exactly (Knuth's TwoSum).
fn two_sum<T: Scalar>(a: T, b: T) -> (T, T) {
    let s = a + b;
    let b_virtual = s - a;
    let a_virtual = s - b_virtual;
    let b_round = b - b_virtual;
    let a_round = a - a_virtual;
    (s, a_round + b_round)
}

/// Error-free transformation of `a * b` into `(product, error)` via an FMA,
/// following Dekker/Ogita's TwoProduct.
fn two_product<T: Scalar>(a: T, b: T) -> (T, T) {
    let p = a * b;
    let e = a.mul_add(b, -p);
    (p, e)
}
