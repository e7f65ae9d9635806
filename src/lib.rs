//! A Vincent's-theorem-based real root isolator for univariate polynomials,
//! built to feed a frictionless-intercept firing solution: given Taylor
//! derivative data for a target and a shooter, find the positive time `T`
//! that minimizes the added launch velocity needed to meet it.
//!
//! The isolator ([`isolator::isolate_positive_roots`]) walks a continued-
//! fraction recursion over Möbius-transformed copies of the input, using
//! Descartes' rule of signs to bound how many positive roots a subtree can
//! contain and the Local-Max-Quadratic bound ([`bounds`]) to fast-forward
//! past empty regions of the half-line. Isolated brackets are narrowed by
//! [`refine::bisection`] or the superlinear [`refine::itp`] method.

pub mod algebra;
pub mod bounds;
pub mod config;
pub mod descartes;
pub mod error;
pub mod interval;
pub mod isolator;
pub mod mobius;
pub mod physics;
pub mod poly;
pub mod refine;
pub mod scalar;
pub mod transform;

pub use config::{EvaluatorKind, SolverConfig};
pub use error::RootError;
pub use interval::Interval;
pub use isolator::isolate_positive_roots;
pub use physics::{solve_intercept, InterceptSolution};
pub use poly::Polynomial;
pub use refine::RefineOutcome;
pub use scalar::Scalar;
