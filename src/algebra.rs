use crate::error::RootError;
use crate::poly::Polynomial;
use crate::scalar::Scalar;

/// `(P')_i = (i+1) * c_{i+1}`. A degree-zero (constant) input maps to `[0]`.
pub fn derivative<T: Scalar>(p: &Polynomial<T>) -> Polynomial<T> {
    let d = p.degree();
    if d == 0 {
        return Polynomial::zero();
    }
    let coeffs = p.coeffs()[1..=d]
        .iter()
        .enumerate()
        .map(|(i, &c)| T::from_usize(i + 1) * c)
        .collect();
    Polynomial::new(coeffs).expect("derivative of a finite polynomial is finite")
}

/// Classical long division in ascending-order coefficient buffers, performed
/// in double precision via `T` and cast back. Returns `(quotient,
/// remainder)` with `deg(remainder) < deg(den)`. Trailing zeros of the
/// remainder are trimmed.
pub fn divide<T: Scalar>(
    num: &Polynomial<T>,
    den: &Polynomial<T>,
) -> Result<(Polynomial<T>, Polynomial<T>), RootError> {
    if den.is_zero_poly() {
        return Err(RootError::DivisionByZeroPolynomial);
    }

    let den_deg = den.degree();
    let mut rem: Vec<T> = num.coeffs()[..=num.degree()].to_vec();

    if rem.len().saturating_sub(1) < den_deg {
        let remainder = Polynomial::new(rem)?.trimmed();
        return Ok((Polynomial::zero(), remainder));
    }

    let quot_deg = rem.len() - 1 - den_deg;
    let mut quotient = vec![T::zero(); quot_deg + 1];
    let den_coeffs = den.coeffs();
    let den_lc = den_coeffs[den_deg];

    for shift in (0..=quot_deg).rev() {
        let lead_index = shift + den_deg;
        if lead_index >= rem.len() {
            continue;
        }
        let coeff = rem[lead_index] / den_lc;
        quotient[shift] = coeff;
        for (k, &dc) in den_coeffs[..=den_deg].iter().enumerate() {
            rem[shift + k] -= coeff * dc;
        }
    }

    while rem.len() > 1 && rem.last().map(|c| c.is_zero()).unwrap_or(false) {
        rem.pop();
    }

    Ok((
        Polynomial::new(quotient)?.trimmed(),
        Polynomial::new(rem)?,
    ))
}

/// Euclidean loop on polynomial division; terminates when the remainder is
/// the zero polynomial. Normalized to leading coefficient 1. Either argument
/// zero returns the other (normalized).
pub fn gcd<T: Scalar>(p: &Polynomial<T>, q: &Polynomial<T>) -> Result<Polynomial<T>, RootError> {
    if p.is_zero_poly() {
        return Ok(q.normalize_monic());
    }
    if q.is_zero_poly() {
        return Ok(p.normalize_monic());
    }

    let (mut a, mut b) = if p.degree() >= q.degree() {
        (p.clone(), q.clone())
    } else {
        (q.clone(), p.clone())
    };

    loop {
        if b.is_zero_poly() {
            return Ok(a.normalize_monic());
        }
        let (_, r) = divide(&a, &b)?;
        a = b;
        b = r;
    }
}

/// `Squarefree(P) = Q` where `(Q, _) = Divide(P, Gcd(P, P'))`. If the GCD is
/// a nonzero constant, `P` is already squarefree and is returned unchanged.
///
/// Float GCD is not numerically stable near repeated roots; callers should
/// prefer passing inputs already known to be squarefree where possible.
pub fn squarefree<T: Scalar>(p: &Polynomial<T>) -> Result<Polynomial<T>, RootError> {
    let dp = derivative(p);
    if dp.is_zero_poly() {
        return Ok(p.clone());
    }
    let g = gcd(p, &dp)?;
    if g.degree() == 0 {
        return Ok(p.clone());
    }
    let (q, _) = divide(p, &g)?;
    Ok(q)
}

/// Yun's squarefree factorization. Mathematically it computes the same
/// radical as [`squarefree`] (`p` divided by `gcd(p, p')`), but by peeling
/// off one multiplicity class at a time via GCDs of strictly decreasing
/// degree, rather than one GCD over the full-degree pair — offered as an
/// alternate, separately-tested reduction path per the open question on
/// float-GCD instability near nearly-repeated roots.
pub fn yun_squarefree<T: Scalar>(p: &Polynomial<T>) -> Result<Polynomial<T>, RootError> {
    let dp = derivative(p);
    if dp.is_zero_poly() {
        return Ok(p.clone());
    }
    let a0 = gcd(p, &dp)?;
    let (mut b, _) = divide(p, &a0)?;
    let (mut c, _) = divide(&dp, &a0)?;

    let mut radical = Polynomial::new(vec![T::one()])?;
    while b.degree() > 0 {
        let d = sub(&c, &derivative(&b));
        let a = gcd(&b, &d)?;
        radical = multiply(&radical, &a);
        if a.degree() == 0 {
            break;
        }
        let (next_b, _) = divide(&b, &a)?;
        let (next_c, _) = divide(&d, &a)?;
        b = next_b;
        c = next_c;
    }
    Ok(radical)
}

fn sub<T: Scalar>(a: &Polynomial<T>, b: &Polynomial<T>) -> Polynomial<T> {
    let n = a.len().max(b.len());
    let mut out = vec![T::zero(); n];
    for (i, slot) in out.iter_mut().enumerate() {
        let av = a.coeffs().get(i).copied().unwrap_or_else(T::zero);
        let bv = b.coeffs().get(i).copied().unwrap_or_else(T::zero);
        *slot = av - bv;
    }
    Polynomial::new(out).expect("finite inputs yield finite output").trimmed()
}

fn multiply<T: Scalar>(a: &Polynomial<T>, b: &Polynomial<T>) -> Polynomial<T> {
    let mut out = vec![T::zero(); a.len() + b.len() - 1];
    for (i, &ac) in a.coeffs().iter().enumerate() {
        for (j, &bc) in b.coeffs().iter().enumerate() {
            out[i + j] += ac * bc;
        }
    }
    Polynomial::new(out).expect("finite inputs yield finite output").trimmed()
}
