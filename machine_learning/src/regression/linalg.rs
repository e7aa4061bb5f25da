use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::{MlErr, Result};

/// Solves `A x = b` for a symmetric positive definite `A`.
///
/// Factors `A = L Lᵀ` and then runs a forward and a backward substitution.
///
/// # Arguments
/// * `a` - A square symmetric positive definite matrix, only its lower triangle is read.
/// * `b` - The right hand side, as long as `a` has rows.
///
/// # Returns
/// The solution `x`.
///
/// # Errors
/// `MlErr::SizeMismatch` if the shapes don't agree, `MlErr::NotPositiveDefinite` if a
/// pivot is not strictly positive or not finite.
pub fn cholesky_solve(a: ArrayView2<f64>, b: ArrayView1<f64>) -> Result<Array1<f64>> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(MlErr::SizeMismatch {
            a: "matrix rows",
            b: "matrix columns",
            got: a.ncols(),
            expected: n,
        });
    }

    if b.len() != n {
        return Err(MlErr::SizeMismatch {
            a: "matrix",
            b: "right hand side",
            got: b.len(),
            expected: n,
        });
    }

    let mut l = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in 0..=i {
            let dot: f64 = (0..j).map(|k| l[[i, k]] * l[[j, k]]).sum();

            if i == j {
                let diag = a[[i, i]] - dot;
                if !(diag > 0.0 && diag.is_finite()) {
                    return Err(MlErr::NotPositiveDefinite { pivot: i });
                }
                l[[i, i]] = diag.sqrt();
            } else {
                l[[i, j]] = (a[[i, j]] - dot) / l[[j, j]];
            }
        }
    }

    // L y = b
    let mut y = Array1::<f64>::zeros(n);
    for i in 0..n {
        let dot: f64 = (0..i).map(|k| l[[i, k]] * y[k]).sum();
        y[i] = (b[i] - dot) / l[[i, i]];
    }

    // Lᵀ x = y
    let mut x = Array1::<f64>::zeros(n);
    for i in (0..n).rev() {
        let dot: f64 = (i + 1..n).map(|k| l[[k, i]] * x[k]).sum();
        x[i] = (y[i] - dot) / l[[i, i]];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use ndarray::{arr1, arr2};

    use super::*;

    fn assert_close(got: &Array1<f64>, expected: &[f64]) {
        assert_eq!(got.len(), expected.len());
        for (g, e) in got.iter().zip(expected) {
            assert!((g - e).abs() < 1e-12, "got {got}, expected {expected:?}");
        }
    }

    #[test]
    fn solves_spd_system() {
        let a = arr2(&[[4.0, 2.0], [2.0, 3.0]]);
        let b = arr1(&[2.0, 1.0]);

        let x = cholesky_solve(a.view(), b.view()).unwrap();
        assert_close(&x, &[0.5, 0.0]);
        assert_close(&a.dot(&x), &[2.0, 1.0]);
    }

    #[test]
    fn solves_three_by_three() {
        let a = arr2(&[[25.0, 15.0, -5.0], [15.0, 18.0, 0.0], [-5.0, 0.0, 11.0]]);
        let b = arr1(&[35.0, 33.0, 6.0]);

        let x = cholesky_solve(a.view(), b.view()).unwrap();
        assert_close(&x, &[1.0, 1.0, 1.0]);
    }

    #[test]
    fn rejects_indefinite_matrix() {
        let a = arr2(&[[1.0, 2.0], [2.0, 1.0]]);
        let b = arr1(&[1.0, 1.0]);

        let err = cholesky_solve(a.view(), b.view()).unwrap_err();
        assert_eq!(err, MlErr::NotPositiveDefinite { pivot: 1 });
    }

    #[test]
    fn rejects_non_finite_matrix() {
        let a = arr2(&[[f64::INFINITY]]);
        let b = arr1(&[1.0]);

        let err = cholesky_solve(a.view(), b.view()).unwrap_err();
        assert_eq!(err, MlErr::NotPositiveDefinite { pivot: 0 });
    }

    #[test]
    fn rejects_mismatched_rhs() {
        let a = arr2(&[[1.0, 0.0], [0.0, 1.0]]);
        let b = arr1(&[1.0]);

        assert!(matches!(
            cholesky_solve(a.view(), b.view()),
            Err(MlErr::SizeMismatch { got: 1, expected: 2, .. })
        ));
    }
}
