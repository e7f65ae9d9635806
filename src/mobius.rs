use crate::interval::Interval;
use crate::scalar::Scalar;

/// A rational linear map `M(x) = (ax+b)/(cx+d)` with `ad != bc`. Pure value
/// type; composition always returns a fresh `Mobius`, matching the
/// "arithmetic-style composition, not a class with identity" design note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mobius<T: Scalar> {
    pub a: T,
    pub b: T,
    pub c: T,
    pub d: T,
}

impl<T: Scalar> Mobius<T> {
    pub fn identity() -> Self {
        Self {
            a: T::one(),
            b: T::zero(),
            c: T::zero(),
            d: T::one(),
        }
    }

    /// `x <- x + s`.
    pub fn shift(&self, s: T) -> Self {
        Self {
            a: self.a,
            b: self.b + s * self.a,
            c: self.c,
            d: self.d + s * self.c,
        }
    }

    /// `x <- s * x`.
    pub fn scale_input(&self, s: T) -> Self {
        Self {
            a: s * self.a,
            b: self.b,
            c: s * self.c,
            d: self.d,
        }
    }

    /// `x <- s / (x + 1)`.
    pub fn lower_interval(&self, s: T) -> Self {
        Self {
            a: self.b,
            b: s * self.a + self.b,
            c: self.d,
            d: s * self.c + self.d,
        }
    }

    /// `x <- 1 / x`.
    pub fn invert(&self) -> Self {
        Self {
            a: self.b,
            b: self.a,
            c: self.d,
            d: self.c,
        }
    }

    /// `(ax+b)/(cx+d)`, with explicit +/-infinity handling when the
    /// denominator vanishes.
    pub fn evaluate(&self, x: T) -> T {
        let den = self.c * x + self.d;
        if den.is_zero() {
            let num = self.a * x + self.b;
            return if num > T::zero() {
                T::infinity()
            } else if num < T::zero() {
                T::neg_infinity()
            } else {
                T::nan()
            };
        }
        (self.a * x + self.b) / den
    }

    /// Image of `(0, +infinity)` under this map: the open interval with
    /// endpoints `a/c` and `b/d`, sorted; if `c == 0` the upper endpoint is
    /// `+infinity`.
    pub fn positive_domain_image(&self) -> Interval<T> {
        if self.c.is_zero() {
            let at_zero = self.b / self.d;
            return Interval::new(at_zero, T::infinity());
        }
        let at_infinity = self.a / self.c;
        let at_zero = self.b / self.d;
        if at_zero <= at_infinity {
            Interval::new(at_zero, at_infinity)
        } else {
            Interval::new(at_infinity, at_zero)
        }
    }
}
