use crate::config::{EvaluatorKind, SolverConfig};
use crate::error::RootError;
use crate::poly::Polynomial;
use crate::scalar::Scalar;
use tracing::trace;

/// Outcome of a bracket refinement. Convergence failure is not an error: it
/// is reported as `MaxIterExceeded` so the caller may retry with a looser
/// tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefineOutcome<T: Scalar> {
    Converged(T),
    MaxIterExceeded,
}

fn eval<T: Scalar>(p: &Polynomial<T>, x: T, kind: EvaluatorKind) -> T {
    match kind {
        EvaluatorKind::Naive => p.horner(x),
        EvaluatorKind::Compensated => p.compensated_horner(x),
    }
}

/// Checks the bracket has opposite-sign endpoints (or an exact zero at an
/// endpoint), per the "degenerate bracket" error in the error taxonomy.
fn check_bracket<T: Scalar>(left: T, right: T, fl: T, fr: T) -> Result<(), RootError> {
    if fl.is_zero() || fr.is_zero() {
        return Ok(());
    }
    if (fl > T::zero()) == (fr > T::zero()) {
        return Err(RootError::DegenerateBracket {
            left: left.to_f64().unwrap_or(f64::NAN),
            right: right.to_f64().unwrap_or(f64::NAN),
        });
    }
    Ok(())
}

/// Classical bisection. `max_iter` is an explicit cap; returns the midpoint
/// on convergence width `<= 2*tau`, `MaxIterExceeded` on exhaustion.
pub fn bisection<T: Scalar>(
    p: &Polynomial<T>,
    mut left: T,
    mut right: T,
    tau: T,
    max_iter: usize,
    evaluator: EvaluatorKind,
) -> Result<RefineOutcome<T>, RootError> {
    let mut fl = eval(p, left, evaluator);
    let mut fr = eval(p, right, evaluator);
    check_bracket(left, right, fl, fr)?;

    if fl.is_zero() {
        return Ok(RefineOutcome::Converged(left));
    }
    if fr.is_zero() {
        return Ok(RefineOutcome::Converged(right));
    }

    let two = T::from_f64(2.0).unwrap();
    for _ in 0..max_iter {
        if (right - left) <= tau * two {
            return Ok(RefineOutcome::Converged((left + right) / two));
        }
        let mid = (left + right) / two;
        let fm = eval(p, mid, evaluator);
        trace!(?mid, bracket_width = ?(right - left), "bisection iteration");
        if fm.is_zero() {
            return Ok(RefineOutcome::Converged(mid));
        }
        if (fm > T::zero()) == (fl > T::zero()) {
            left = mid;
            fl = fm;
        } else {
            right = mid;
            fr = fm;
        }
    }
    let _ = fr;
    Ok(RefineOutcome::MaxIterExceeded)
}

/// Interpolate-Truncate-Project refinement. Superlinear on average, never
/// worse than bisection per-step.
pub fn itp<T: Scalar>(
    p: &Polynomial<T>,
    mut left: T,
    mut right: T,
    tau: T,
    config: &SolverConfig<T>,
) -> Result<RefineOutcome<T>, RootError> {
    let evaluator = config.evaluator();
    let mut fl = eval(p, left, evaluator);
    let mut fr = eval(p, right, evaluator);
    check_bracket(left, right, fl, fr)?;

    if fl.is_zero() {
        return Ok(RefineOutcome::Converged(left));
    }
    if fr.is_zero() {
        return Ok(RefineOutcome::Converged(right));
    }

    let two = T::from_f64(2.0).unwrap();
    let initial_width = right - left;
    if initial_width <= tau * two {
        return Ok(RefineOutcome::Converged((left + right) / two));
    }

    // k1 = k1_numerator / initial_bracket_width, per the ITP tuning formula.
    let k1 = config.itp_k1_numerator() / initial_width;
    let k2 = config.itp_k2();
    let n0 = config.itp_n0();

    let n_half = ((initial_width / (tau * two)).log2()).ceil();
    let n_max = n_half + T::from_usize(n0 as usize);

    for k in 0..config.itp_max_iter() {
        let width = right - left;
        if width <= tau * two {
            return Ok(RefineOutcome::Converged((left + right) / two));
        }

        let x_half = (left + right) / two;
        let projection_radius =
            tau * two.powf(n_max - T::from_usize(k)) - width / two;
        let delta = k1 * width.powf(k2);

        let x_f = (right * fl - left * fr) / (fl - fr);
        let diff = x_half - x_f;
        let sigma = if diff > T::zero() {
            T::one()
        } else if diff < T::zero() {
            -T::one()
        } else {
            T::zero()
        };

        let x_t = if diff.abs() >= delta {
            x_f + sigma * delta
        } else {
            x_half
        };

        let x_itp = if (x_t - x_half).abs() <= projection_radius {
            x_t
        } else {
            x_half - sigma * projection_radius
        };

        let f_itp = eval(p, x_itp, evaluator);
        trace!(?x_itp, bracket_width = ?width, "itp iteration");
        if f_itp.is_zero() {
            return Ok(RefineOutcome::Converged(x_itp));
        }
        if (f_itp > T::zero()) == (fl > T::zero()) {
            left = x_itp;
            fl = f_itp;
        } else {
            right = x_itp;
            fr = f_itp;
        }
    }
    Ok(RefineOutcome::MaxIterExceeded)
}
