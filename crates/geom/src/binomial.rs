//! Rows of Pascal's triangle.
//!
//! The n-th row holds the binomial coefficients `C(n, i)` for `i ∈ [0..n]`, which are the
//! weights of the Bernstein basis of degree n.

use crate::scalar::{cast, Scalar};
use crate::GeomError;

use alloc::vec::Vec;
use core::convert::TryFrom;

/// Returns the n-th row of Pascal's triangle (`n + 1` coefficients).
///
/// The coefficients are computed with the multiplicative recurrence
/// `c[i] = c[i - 1] * (n - i + 1) / i`, which never evaluates a factorial and so stays
/// representable for as long as the coefficients themselves are.
///
/// Fails with `InvalidArgument` if `n` is negative or if the row does not fit in memory.
pub fn row<S: Scalar>(n: i64) -> Result<Vec<S>, GeomError> {
    if n < 0 {
        return Err(GeomError::InvalidArgument("negative Pascal triangle row"));
    }

    let too_large = GeomError::InvalidArgument("Pascal triangle row too large");
    let n = match usize::try_from(n) {
        Ok(n) if n < usize::MAX => n,
        _ => {
            return Err(too_large);
        }
    };

    let mut coefficients = Vec::new();
    coefficients
        .try_reserve_exact(n + 1)
        .map_err(|_| too_large)?;
    fill_row(n, &mut coefficients);

    Ok(coefficients)
}

pub(crate) fn row_unchecked<S: Scalar>(n: usize) -> Vec<S> {
    let mut coefficients = Vec::with_capacity(n + 1);
    fill_row(n, &mut coefficients);

    coefficients
}

fn fill_row<S: Scalar>(n: usize, coefficients: &mut Vec<S>) {
    coefficients.push(S::ONE);

    let degree: S = cast(n).unwrap_or(S::MAX);
    let mut c = S::ONE;
    for i in 1..=n {
        let i: S = cast(i).unwrap_or(S::MAX);
        c = c * (degree - i + S::ONE) / i;
        coefficients.push(c);
    }
}

#[test]
fn first_rows() {
    assert_eq!(row::<f64>(0).unwrap(), [1.0]);
    assert_eq!(row::<f64>(1).unwrap(), [1.0, 1.0]);
    assert_eq!(row::<f64>(3).unwrap(), [1.0, 3.0, 3.0, 1.0]);
    assert_eq!(row::<f64>(4).unwrap(), [1.0, 4.0, 6.0, 4.0, 1.0]);
    assert_eq!(row::<f32>(4).unwrap(), [1.0, 4.0, 6.0, 4.0, 1.0]);
}

#[test]
fn negative_row() {
    assert_eq!(
        row::<f64>(-1),
        Err(GeomError::InvalidArgument("negative Pascal triangle row"))
    );
}

#[test]
fn huge_row() {
    let too_large = GeomError::InvalidArgument("Pascal triangle row too large");
    assert_eq!(row::<f64>(i64::MAX), Err(too_large));
    assert_eq!(row::<f32>(i64::MAX - 1), Err(too_large));
}

#[test]
fn rows_are_symmetric_and_sum_to_powers_of_two() {
    for n in 0..40 {
        let r = row::<f64>(n).unwrap();
        assert_eq!(r.len(), n as usize + 1);

        for i in 0..r.len() {
            assert_eq!(r[i], r[r.len() - 1 - i], "row {n} index {i}");
        }

        let sum: f64 = r.iter().sum();
        assert_eq!(sum, (1u64 << n) as f64);
    }
}

#[test]
fn large_row_does_not_overflow() {
    // 170! overflows f64, the individual coefficients of row 170 do not.
    let r = row::<f64>(170).unwrap();
    assert!(r.iter().all(|c| c.is_finite()));
    assert_eq!(r[1], 170.0);
}
