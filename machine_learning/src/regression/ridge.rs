use ndarray::{Array1, ArrayView1, Axis};

use super::cholesky_solve;
use crate::{MlErr, Result, metrics::r2_score, sparse::SparseMatrix};

/// The L2 penalty used for temperature models.
pub const DEFAULT_ALPHA: f64 = 0.4;

/// Linear least squares with an L2 penalty on the coefficients.
///
/// Minimizes `||y - X w - b||² + alpha ||w||²`, the intercept `b` is not penalized.
/// Features are used as given, without normalization.
#[derive(Debug, Clone, Copy)]
pub struct Ridge {
    alpha: f64,
    fit_intercept: bool,
}

impl Default for Ridge {
    fn default() -> Self {
        Self::new(DEFAULT_ALPHA)
    }
}

impl Ridge {
    /// Creates a new `Ridge` that fits an intercept.
    ///
    /// # Arguments
    /// * `alpha` - The regularization strength, must be positive.
    ///
    /// # Returns
    /// A new `Ridge` instance.
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            fit_intercept: true,
        }
    }

    /// Sets whether to fit an intercept term.
    pub fn with_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Fits the model on `x` and `y`.
    ///
    /// With an intercept, the problem is solved on centered data: the columns of `x`
    /// and `y` are shifted by their means, which is done on the normal equations so
    /// `x` is never densified.
    ///
    /// # Arguments
    /// * `x` - The design matrix, one row per sample.
    /// * `y` - The targets, one per row of `x`.
    ///
    /// # Returns
    /// The fitted coefficients and intercept.
    ///
    /// # Errors
    /// `MlErr::SizeMismatch` if `x` and `y` have different amount of rows, `MlErr::NoSamples`
    /// if there are no rows, `MlErr::NotPositiveDefinite` if the normal equations can't
    /// be solved and `MlErr::NonFiniteFit` if the solution overflows.
    pub fn fit(&self, x: &SparseMatrix, y: ArrayView1<f64>) -> Result<RidgeFit> {
        let n = x.nrows();
        if y.len() != n {
            return Err(MlErr::SizeMismatch {
                a: "features",
                b: "targets",
                got: y.len(),
                expected: n,
            });
        }

        let Some(y_mean) = y.mean() else {
            return Err(MlErr::NoSamples);
        };

        let mut gram = x.gram();
        let mut xty = x.t_dot(y);

        let (x_mean, y_mean) = if self.fit_intercept {
            (x.column_means(), y_mean)
        } else {
            (Array1::zeros(x.ncols()), 0.0)
        };

        // Xcᵀ Xc = Xᵀ X - n x̄ x̄ᵀ and Xcᵀ yc = Xᵀ y - n ȳ x̄
        let col = x_mean.view().insert_axis(Axis(1));
        let row = x_mean.view().insert_axis(Axis(0));
        gram -= &(&col * &row * n as f64);
        xty -= &(&x_mean * (n as f64 * y_mean));

        gram.diag_mut().mapv_inplace(|d| d + self.alpha);

        let coef = cholesky_solve(gram.view(), xty.view())?;
        if !coef.iter().all(|c| c.is_finite()) {
            return Err(MlErr::NonFiniteFit { what: "coefficients" });
        }

        let intercept = y_mean - x_mean.dot(&coef);
        if !intercept.is_finite() {
            return Err(MlErr::NonFiniteFit { what: "intercept" });
        }

        Ok(RidgeFit { coef, intercept })
    }
}

/// The outcome of fitting a `Ridge`.
#[derive(Debug, Clone, PartialEq)]
pub struct RidgeFit {
    coef: Array1<f64>,
    intercept: f64,
}

impl RidgeFit {
    /// Returns the coefficients, one per column of the design matrix.
    pub fn coef(&self) -> ArrayView1<'_, f64> {
        self.coef.view()
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Predicts a target for every row of `x`.
    pub fn predict(&self, x: &SparseMatrix) -> Array1<f64> {
        x.dot(self.coef.view()) + self.intercept
    }

    /// Returns the coefficient of determination of the predictions for `x` against `y`.
    ///
    /// # Errors
    /// `MlErr::SizeMismatch` if `x` and `y` have different amount of rows.
    pub fn score(&self, x: &SparseMatrix, y: ArrayView1<f64>) -> Result<f64> {
        r2_score(y, self.predict(x).view())
    }
}
