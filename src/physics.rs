use crate::config::SolverConfig;
use crate::error::RootError;
use crate::interval::Interval;
use crate::isolator::isolate_positive_roots;
use crate::poly::Polynomial;
use crate::refine::{itp, RefineOutcome};
use crate::scalar::Scalar;
use tracing::debug;

/// The external-collaborator interface: reduces a frictionless intercept
/// problem to the scalar root-finding core. Given ordered Taylor derivative
/// vectors for target and shooter (index 0 = position), returns the
/// argmin-T intercept solution, or `None` if no positive-T intercept
/// exists.
#[derive(Debug, Clone, PartialEq)]
pub struct InterceptSolution<T: Scalar> {
    pub time: T,
    pub speed_squared: T,
    pub velocity: Vec<T>,
}

/// `Delta[k] = target[k] - shooter[k]`, with missing entries on either side
/// treated as zero. All present vectors must share one spatial dimension.
pub fn relative_taylor_coefficients<T: Scalar>(
    target: &[Vec<T>],
    shooter: &[Vec<T>],
) -> Result<Vec<Vec<T>>, RootError> {
    if target.is_empty() && shooter.is_empty() {
        return Err(RootError::EmptyDerivativeList);
    }
    let dim = target
        .iter()
        .chain(shooter.iter())
        .map(|v| v.len())
        .next()
        .ok_or(RootError::EmptyDerivativeList)?;

    for v in target.iter().chain(shooter.iter()) {
        if v.len() != dim {
            return Err(RootError::DimensionMismatch {
                expected: dim,
                found: v.len(),
            });
        }
    }

    let n = target.len().max(shooter.len());
    let mut delta = Vec::with_capacity(n);
    for k in 0..n {
        let mut d = vec![T::zero(); dim];
        for i in 0..dim {
            let tval = target.get(k).map(|v| v[i]).unwrap_or_else(T::zero);
            let sval = shooter.get(k).map(|v| v[i]).unwrap_or_else(T::zero);
            d[i] = tval - sval;
        }
        delta.push(d);
    }
    Ok(delta)
}

fn factorial<T: Scalar>(n: usize) -> T {
    let mut acc = T::one();
    for i in 1..=n {
        acc *= T::from_usize(i);
    }
    acc
}

pub fn dot_product<T: Scalar>(a: &[T], b: &[T]) -> T {
    a.iter().zip(b.iter()).fold(T::zero(), |acc, (&x, &y)| acc + x * y)
}

/// `x(t) = sum_k (t^k / k!) Delta[k]`, evaluated component-wise via a
/// vector-coefficient Horner scheme on `b_k = Delta[k]/k!`.
pub fn evaluate_position<T: Scalar>(delta: &[Vec<T>], t: T) -> Vec<T> {
    let dim = delta[0].len();
    let n = delta.len() - 1;
    let mut result = vec![T::zero(); dim];
    for k in (0..=n).rev() {
        let fact = factorial::<T>(k);
        for i in 0..dim {
            result[i] = result[i] * t + delta[k][i] / fact;
        }
    }
    result
}

/// The scalar critical polynomial whose positive roots are candidate
/// intercept times: coefficient at `T^k` is
/// `sum_{j=0..k} (Delta[j] . Delta[k-j]) * (1 - k + j) / (j! (k-j)!)`,
/// with out-of-range indices treated as a zero vector contribution.
pub fn critical_polynomial<T: Scalar>(delta: &[Vec<T>]) -> Result<Polynomial<T>, RootError> {
    let n = delta.len().saturating_sub(1);
    let degree = 2 * n;
    let mut coeffs = vec![T::zero(); degree + 1];
    for (k, slot) in coeffs.iter_mut().enumerate() {
        let mut acc = T::zero();
        for j in 0..=k {
            let kj = k - j;
            if j > n || kj > n {
                continue;
            }
            let dot = dot_product(&delta[j], &delta[kj]);
            if dot.is_zero() {
                continue;
            }
            let sign_factor = T::from_f64((1i64 - k as i64 + j as i64) as f64)
                .expect("small integer fits f64");
            if sign_factor.is_zero() {
                continue;
            }
            let denom = factorial::<T>(j) * factorial::<T>(kj);
            acc += dot * sign_factor / denom;
        }
        *slot = acc;
    }
    Polynomial::new(coeffs)
}

/// `f(T) = ||x(T)||^2 / T^2`, the squared magnitude of the added velocity
/// an intercept at time `T` would require.
pub fn objective<T: Scalar>(delta: &[Vec<T>], t: T) -> T {
    let x_t = evaluate_position(delta, t);
    dot_product(&x_t, &x_t) / (t * t)
}

fn refine_bracket<T: Scalar>(
    poly: &Polynomial<T>,
    interval: Interval<T>,
    config: &SolverConfig<T>,
) -> Result<RefineOutcome<T>, RootError> {
    if interval.is_point() {
        return Ok(RefineOutcome::Converged(interval.left));
    }
    itp(poly, interval.left, interval.right, config.tolerance(), config)
}

/// Builds the critical polynomial, isolates its positive roots, refines
/// each bracket, and returns the argmin by direct objective comparison.
/// `None` means no positive-T intercept exists.
pub fn solve_intercept<T: Scalar>(
    target: &[Vec<T>],
    shooter: &[Vec<T>],
    config: &SolverConfig<T>,
) -> Result<Option<InterceptSolution<T>>, RootError> {
    let delta = relative_taylor_coefficients(target, shooter)?;
    let poly = critical_polynomial(&delta)?;
    let intervals = isolate_positive_roots(&poly, config.isolator_depth_cap())?;

    let mut best: Option<InterceptSolution<T>> = None;
    for interval in intervals {
        let outcome = refine_bracket(&poly, interval, config)?;
        let RefineOutcome::Converged(t) = outcome else {
            continue;
        };
        if t <= T::zero() {
            continue;
        }
        let x_t = evaluate_position(&delta, t);
        let speed_squared = dot_product(&x_t, &x_t) / (t * t);
        let velocity: Vec<T> = x_t.iter().map(|&c| c / t).collect();
        debug!(?t, ?speed_squared, "evaluated intercept candidate");

        let candidate = InterceptSolution {
            time: t,
            speed_squared,
            velocity,
        };
        best = match best {
            None => Some(candidate),
            Some(current) if candidate.speed_squared < current.speed_squared => Some(candidate),
            Some(current) => Some(current),
        };
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_coefficients_pad_missing_entries_with_zero() {
        let target = vec![vec![0.0, 0.0, 0.0], vec![10.0, 0.0, 0.0]];
        let shooter = vec![vec![100.0, 0.0, 0.0]];
        let delta = relative_taylor_coefficients(&target, &shooter).unwrap();
        assert_eq!(delta.len(), 2);
        assert_eq!(delta[0], vec![-100.0, 0.0, 0.0]);
        assert_eq!(delta[1], vec![10.0, 0.0, 0.0]);
    }

    #[test]
    fn relative_coefficients_rejects_dimension_mismatch() {
        let target = vec![vec![0.0, 0.0]];
        let shooter = vec![vec![0.0, 0.0, 0.0]];
        assert!(relative_taylor_coefficients(&target, &shooter).is_err());
    }

    #[test]
    fn evaluate_position_matches_direct_taylor_sum() {
        let delta = vec![vec![1.0, 2.0], vec![3.0, 4.0], vec![6.0, 0.0]];
        // x(t) = delta0 + t*delta1 + (t^2/2)*delta2
        let t = 2.0;
        let expected = vec![
            1.0 + 2.0 * 3.0 + (4.0 / 2.0) * 6.0,
            2.0 + 2.0 * 4.0 + (4.0 / 2.0) * 0.0,
        ];
        let got = evaluate_position(&delta, t);
        for (a, b) in got.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn critical_polynomial_constant_term_is_squared_initial_offset() {
        let delta = vec![vec![-100.0, 0.0, 0.0], vec![10.0, 0.0, 0.0]];
        let poly = critical_polynomial(&delta).unwrap();
        assert!((poly.coeffs()[0] - 10000.0).abs() < 1e-6);
    }

    #[test]
    fn solve_intercept_direct_closing_case() {
        // Target starts at the origin moving at +10 along x; shooter sits
        // stationary 100 units ahead along the same axis, so the target
        // runs directly onto the shooter's position at T=10 needing zero
        // added velocity.
        let target = vec![vec![0.0, 0.0, 0.0], vec![10.0, 0.0, 0.0]];
        let shooter = vec![vec![100.0, 0.0, 0.0]];
        let config = SolverConfig::<f64>::default();
        let solution = solve_intercept(&target, &shooter, &config)
            .unwrap()
            .expect("an intercept solution should exist");
        assert!((solution.time - 10.0).abs() < 1e-3);
        assert!(solution.speed_squared < 1e-3);
    }

    #[test]
    fn solve_intercept_reports_no_solution_when_objective_is_monotonic() {
        // Relative offset and velocity are orthogonal: the squared-speed
        // objective is strictly monotonic in T with no interior stationary
        // point, so there is no finite-T minimizer.
        let target = vec![vec![0.0, 0.0, 0.0], vec![10.0, 0.0, 0.0]];
        let shooter = vec![vec![0.0, 100.0, 0.0]];
        let config = SolverConfig::<f64>::default();
        let solution = solve_intercept(&target, &shooter, &config).unwrap();
        assert!(solution.is_none());
    }
}
