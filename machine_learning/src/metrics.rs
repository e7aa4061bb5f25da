use ndarray::ArrayView1;

use crate::{MlErr, Result};

/// Computes the coefficient of determination (R²) of `y_pred` against `y_true`.
///
/// When `y_true` has no variance the score is forced to be finite: `1.0` for perfect
/// predictions and `0.0` otherwise.
///
/// # Errors
/// `MlErr::SizeMismatch` if both views have different lengths.
pub fn r2_score(y_true: ArrayView1<f64>, y_pred: ArrayView1<f64>) -> Result<f64> {
    if y_pred.len() != y_true.len() {
        return Err(MlErr::SizeMismatch {
            a: "predictions",
            b: "targets",
            got: y_pred.len(),
            expected: y_true.len(),
        });
    }

    let Some(y_mean) = y_true.mean() else {
        return Ok(1.0);
    };

    let ss_res: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(t, p)| (t - p).powi(2))
        .sum();
    let ss_tot: f64 = y_true.iter().map(|t| (t - y_mean).powi(2)).sum();

    if ss_tot == 0.0 {
        return Ok(if ss_res == 0.0 { 1.0 } else { 0.0 });
    }

    Ok(1.0 - ss_res / ss_tot)
}
