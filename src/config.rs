use crate::scalar::Scalar;

/// Which evaluator the refiners and isolator sign checks use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluatorKind {
    Naive,
    Compensated,
}

impl Default for EvaluatorKind {
    fn default() -> Self {
        EvaluatorKind::Compensated
    }
}

/// Tuning knobs for the root engine, built with `with_*` methods rather than
/// public mutable fields.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig<T: Scalar> {
    tolerance: T,
    itp_max_iter: usize,
    bisection_max_iter: usize,
    itp_k1_numerator: T,
    itp_k2: T,
    itp_n0: u32,
    evaluator: EvaluatorKind,
    isolator_depth_cap: Option<usize>,
}

impl<T: Scalar> Default for SolverConfig<T> {
    fn default() -> Self {
        Self {
            tolerance: T::from_f64(1e-5).unwrap(),
            itp_max_iter: 50,
            bisection_max_iter: 100,
            itp_k1_numerator: T::from_f64(0.2).unwrap(),
            itp_k2: T::from_f64(2.0).unwrap(),
            itp_n0: 1,
            evaluator: EvaluatorKind::Compensated,
            isolator_depth_cap: None,
        }
    }
}

impl<T: Scalar> SolverConfig<T> {
    pub fn with_tolerance(mut self, tau: T) -> Self {
        self.tolerance = tau;
        self
    }

    pub fn with_itp_max_iter(mut self, n: usize) -> Self {
        self.itp_max_iter = n;
        self
    }

    pub fn with_bisection_max_iter(mut self, n: usize) -> Self {
        self.bisection_max_iter = n;
        self
    }

    /// `k1_numerator` is the bracket-independent numerator of the ITP
    /// truncation coefficient; `itp()` divides it by the initial bracket
    /// width to get the actual `k1` used per the formula.
    pub fn with_itp_tuning(mut self, k1_numerator: T, k2: T, n0: u32) -> Self {
        self.itp_k1_numerator = k1_numerator;
        self.itp_k2 = k2;
        self.itp_n0 = n0;
        self
    }

    pub fn with_evaluator(mut self, kind: EvaluatorKind) -> Self {
        self.evaluator = kind;
        self
    }

    pub fn with_isolator_depth_cap(mut self, cap: usize) -> Self {
        self.isolator_depth_cap = Some(cap);
        self
    }

    pub fn tolerance(&self) -> T {
        self.tolerance
    }

    pub fn itp_max_iter(&self) -> usize {
        self.itp_max_iter
    }

    pub fn bisection_max_iter(&self) -> usize {
        self.bisection_max_iter
    }

    /// Numerator of the ITP truncation coefficient `k1 = k1_numerator /
    /// initial_bracket_width`; see [`crate::refine::itp`].
    pub fn itp_k1_numerator(&self) -> T {
        self.itp_k1_numerator
    }

    pub fn itp_k2(&self) -> T {
        self.itp_k2
    }

    pub fn itp_n0(&self) -> u32 {
        self.itp_n0
    }

    pub fn evaluator(&self) -> EvaluatorKind {
        self.evaluator
    }

    pub fn isolator_depth_cap(&self) -> Option<usize> {
        self.isolator_depth_cap
    }
}
