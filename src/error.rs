use thiserror::Error;

/// Fatal failures of the root engine. Convergence failure and "no solution"
/// are not modeled here: those are explicit non-error outcomes (see
/// [`crate::refine::RefineOutcome`] and the empty-`Vec` return of the
/// isolator).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RootError {
    #[error("polynomial coefficient list is empty")]
    EmptyCoefficients,
    #[error("coefficient at index {} is NaN", index)]
    NonFiniteCoefficient { index: usize },
    #[error("division by the zero polynomial")]
    DivisionByZeroPolynomial,
    #[error("refiner bracket [{}, {}] does not change sign", left, right)]
    DegenerateBracket { left: f64, right: f64 },
    #[error("derivative-vector list is empty")]
    EmptyDerivativeList,
    #[error("expected {} spatial components, found {}", expected, found)]
    DimensionMismatch { expected: usize, found: usize },
}
