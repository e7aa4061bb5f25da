use comms::specs::fit::{CoefficientSpec, ModelSpec};

use crate::{features::SourceUniverse, regression::RidgeFit};

/// Pairs every source of `universe` with its coefficient, positionally, and packs the
/// fitted model into its wire specification.
///
/// Values are passed through untouched.
pub fn summarize(universe: &SourceUniverse, fit: &RidgeFit, score: f64) -> ModelSpec {
    debug_assert_eq!(universe.len(), fit.coef().len());

    let coefficients = universe
        .iter()
        .zip(fit.coef())
        .map(|(source, &coef)| CoefficientSpec {
            source: source.to_string(),
            coef,
        })
        .collect();

    ModelSpec {
        intercept: fit.intercept(),
        score,
        coefficients,
    }
}
