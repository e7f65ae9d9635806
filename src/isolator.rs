use crate::algebra::squarefree;
use crate::bounds::{lmq_lower_bound, lmq_upper_bound};
use crate::descartes::sign_variation_count;
use crate::error::RootError;
use crate::interval::Interval;
use crate::mobius::Mobius;
use crate::poly::Polynomial;
use crate::scalar::Scalar;
use crate::transform::{lower_interval_map, scale, shift, strip_leading_zero_root};
use std::collections::VecDeque;
use tracing::{debug, debug_span};

/// A unit of isolator work: the transformed polynomial under the current
/// Möbius map, and the map itself. `P_current(x) = (cx+d)^n P_input(M(x))`
/// is the loop invariant maintained across every transformation applied
/// here in lockstep to both fields.
struct Task<T: Scalar> {
    poly: Polynomial<T>,
    mobius: Mobius<T>,
}

/// Isolates every positive real root of a squarefree-reduced `input` into a
/// disjoint open interval. Output is a superset cover: combined with
/// explicit point-root reports it is the complete positive-root set.
///
/// `depth_cap`, if set, bounds the number of work-queue tasks processed, as
/// a defense against numerically-induced non-termination (e.g. near-
/// duplicate roots surviving an unstable float squarefree reduction).
pub fn isolate_positive_roots<T: Scalar>(
    input: &Polynomial<T>,
    depth_cap: Option<usize>,
) -> Result<Vec<Interval<T>>, RootError> {
    let d = input.degree();
    if input.coeffs()[..=d].iter().all(|&c| c > T::zero()) {
        return Ok(Vec::new());
    }

    let input_upper_bound = lmq_upper_bound(input);
    let seed = squarefree(input)?;

    let mut queue: VecDeque<Task<T>> = VecDeque::new();
    queue.push_back(Task {
        poly: seed,
        mobius: Mobius::identity(),
    });

    let mut results: Vec<Interval<T>> = Vec::new();
    let mut tasks_processed = 0usize;

    while let Some(task) = queue.pop_front() {
        tasks_processed += 1;
        if let Some(cap) = depth_cap {
            if tasks_processed > cap {
                debug!(cap, "isolator safety cap reached, discarding remaining tasks");
                break;
            }
        }
        let span = debug_span!("isolator_task", task = tasks_processed);
        let _enter = span.enter();
        process_task(task, &mut queue, &mut results, input_upper_bound)?;
    }

    Ok(results)
}

fn process_task<T: Scalar>(
    task: Task<T>,
    queue: &mut VecDeque<Task<T>>,
    results: &mut Vec<Interval<T>>,
    input_upper_bound: T,
) -> Result<(), RootError> {
    let mut poly = task.poly;
    let mut mobius = task.mobius;

    // Step 1: degenerate zero polynomial reports the whole current image as
    // roots.
    if poly.is_zero_poly() {
        emit(results, mobius.positive_domain_image(), input_upper_bound);
        return Ok(());
    }

    // Steps 2/3, iterated until neither applies: strip an explicit root at
    // the current origin, then fast-forward past an empty prefix of the
    // half-line via the LMQ lower bound.
    loop {
        if poly.constant_term().is_zero() {
            emit(results, Interval::point(mobius.evaluate(T::zero())), input_upper_bound);
            poly = strip_leading_zero_root(&poly)?;
            if poly.is_zero_poly() {
                return Ok(());
            }
            continue;
        }

        let b = lmq_lower_bound(&poly);
        if b >= T::one() {
            poly = shift(&scale(&poly, b), T::one());
            mobius = mobius.scale_input(b).shift(T::one());
            continue;
        }
        break;
    }

    // Step 4: Descartes count drives the branch.
    let v = sign_variation_count(&poly)?;
    match v {
        0 => Ok(()),
        1 => {
            emit(results, mobius.positive_domain_image(), input_upper_bound);
            Ok(())
        }
        _ => split_at_one(poly, mobius, v, queue, results, input_upper_bound),
    }
}

/// Splits the current task at `x = 1` into a right half (`x > 1`) and a left
/// half (`0 < x < 1`). The left half's variation count is derived as
/// `v - v_right - (1 if a root at x=1 was emitted)` rather than recomputed
/// via a fresh sign-variation pass; this is only used to choose
/// prune/inline-emit/enqueue for the freshly split polynomial, not threaded
/// through the queue as persistent cached state.
fn split_at_one<T: Scalar>(
    poly: Polynomial<T>,
    mobius: Mobius<T>,
    v: usize,
    queue: &mut VecDeque<Task<T>>,
    results: &mut Vec<Interval<T>>,
    input_upper_bound: T,
) -> Result<(), RootError> {
    let p_r = shift(&poly, T::one());
    let m_r = mobius.shift(T::one());

    let root_at_one = p_r.constant_term().is_zero();
    let mut v_r = 0usize;
    if root_at_one {
        emit(results, Interval::point(m_r.evaluate(T::zero())), input_upper_bound);
        let stripped = strip_leading_zero_root(&p_r)?;
        if !stripped.is_zero_poly() {
            v_r = sign_variation_count(&stripped)?;
            enqueue_by_variation(stripped, m_r, v_r, queue, results, input_upper_bound)?;
        }
    } else {
        v_r = sign_variation_count(&p_r)?;
        enqueue_by_variation(p_r, m_r, v_r, queue, results, input_upper_bound)?;
    }

    let root_adjustment = if root_at_one { 1 } else { 0 };
    let v_l = v.saturating_sub(v_r + root_adjustment);

    let mut p_l = lower_interval_map(&poly, T::one());
    let m_l = mobius.lower_interval(T::one());

    if p_l.constant_term().is_zero() {
        emit(results, Interval::point(m_l.evaluate(T::zero())), input_upper_bound);
        p_l = strip_leading_zero_root(&p_l)?;
    }

    if !p_l.is_zero_poly() {
        enqueue_by_variation(p_l, m_l, v_l, queue, results, input_upper_bound)?;
    }

    Ok(())
}

/// Routes a freshly produced (poly, mobius) pair given an already-known (or
/// cheaply derived) variation count: discard if 0, emit inline if 1,
/// otherwise enqueue for full step1-4 processing when dequeued.
fn enqueue_by_variation<T: Scalar>(
    poly: Polynomial<T>,
    mobius: Mobius<T>,
    variation: usize,
    queue: &mut VecDeque<Task<T>>,
    results: &mut Vec<Interval<T>>,
    input_upper_bound: T,
) -> Result<(), RootError> {
    match variation {
        0 => Ok(()),
        1 => {
            emit(results, mobius.positive_domain_image(), input_upper_bound);
            Ok(())
        }
        _ => {
            queue.push_back(Task { poly, mobius });
            Ok(())
        }
    }
}

/// Output hygiene: tighten an unbounded-right image using the input's LMQ
/// upper bound, then reject exact duplicates and strict sub/super ranges of
/// an already-emitted interval, keeping the tighter one.
fn emit<T: Scalar>(results: &mut Vec<Interval<T>>, candidate: Interval<T>, input_upper_bound: T) {
    let candidate = if candidate.is_unbounded_right() {
        Interval::new(candidate.left, input_upper_bound.max(candidate.left))
    } else {
        candidate
    };

    if results.iter().any(|r| *r == candidate) {
        return;
    }
    if results.iter().any(|r| r.is_strict_subrange_of(&candidate)) {
        return;
    }
    if let Some(idx) = results.iter().position(|r| candidate.is_strict_subrange_of(r)) {
        results[idx] = candidate;
        return;
    }
    results.push(candidate);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(c: &[f64]) -> Polynomial<f64> {
        Polynomial::new(c.to_vec()).unwrap()
    }

    fn contains(intervals: &[Interval<f64>], root: f64) -> bool {
        intervals.iter().any(|i| {
            if i.is_point() {
                (i.left - root).abs() < 1e-9
            } else {
                i.left < root && root < i.right
            }
        })
    }

    #[test]
    fn quadratic_with_two_positive_roots() {
        // x^2 - 4x + 3, roots at 1 and 3
        let intervals = isolate_positive_roots(&p(&[3.0, -4.0, 1.0]), None).unwrap();
        assert_eq!(intervals.len(), 2);
        assert!(contains(&intervals, 1.0));
        assert!(contains(&intervals, 3.0));
    }

    #[test]
    fn intervals_are_pairwise_disjoint() {
        let intervals = isolate_positive_roots(&p(&[3.0, -4.0, 1.0]), None).unwrap();
        for i in 0..intervals.len() {
            for j in 0..intervals.len() {
                if i == j {
                    continue;
                }
                let a = intervals[i];
                let b = intervals[j];
                let overlap = a.left.max(b.left) < a.right.min(b.right);
                assert!(!overlap, "intervals overlap: {:?} {:?}", a, b);
            }
        }
    }

    #[test]
    fn cubic_with_roots_at_zero_minus_one_and_one() {
        // x^3 - x = x(x-1)(x+1); only the roots at 0 and 1 are visible here
        let intervals = isolate_positive_roots(&p(&[0.0, -1.0, 0.0, 1.0]), None).unwrap();
        assert!(intervals.iter().any(|i| i.is_point() && i.left.abs() < 1e-12));
        assert!(contains(&intervals, 1.0));
    }

    #[test]
    fn no_positive_roots_for_x_cubed_plus_x_plus_one() {
        let intervals = isolate_positive_roots(&p(&[1.0, 1.0, 0.0, 1.0]), None).unwrap();
        assert!(intervals.is_empty());
    }

    #[test]
    fn all_positive_coefficients_short_circuits_to_empty() {
        let intervals = isolate_positive_roots(&p(&[1.0, 2.0, 3.0]), None).unwrap();
        assert!(intervals.is_empty());
    }

    #[test]
    fn squarefree_reduced_quartic_isolates_single_root() {
        // (x^2 - 2)^2, squarefree reduces to x^2 - 2 with root sqrt(2)
        let intervals = isolate_positive_roots(&p(&[4.0, 0.0, -4.0, 0.0, 1.0]), None).unwrap();
        assert_eq!(intervals.len(), 1);
        assert!(contains(&intervals, 2f64.sqrt()));
    }

    #[test]
    fn depth_cap_limits_work_without_erroring() {
        let intervals = isolate_positive_roots(&p(&[3.0, -4.0, 1.0]), Some(1)).unwrap();
        assert!(intervals.len() <= 2);
    }
}
