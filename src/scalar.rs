use num_traits::{Float, FromPrimitive, NumAssignOps};
use std::fmt::{Debug, Display};

/// The arithmetic field the root engine is generic over.
///
/// Single generic parameterization over a field with sign, absolute value,
/// square root, power, and NaN detection, rather than separate f32/f64
/// code paths.
pub trait Scalar:
    Float + FromPrimitive + NumAssignOps + Debug + Display + Copy + Default + 'static
{
    fn from_usize(n: usize) -> Self;
}

impl Scalar for f64 {
    fn from_usize(n: usize) -> Self {
        n as f64
    }
}

impl Scalar for f32 {
    fn from_usize(n: usize) -> Self {
        n as f32
    }
}
