use comms::specs::fit::{ModelSpec, SampleSpec};
use log::{debug, warn};

use crate::{
    MlErr, Result,
    features::{self, SourceUniverse},
    regression::Ridge,
    summary::summarize,
};

/// Fits a temperature model relating the heat sources' states to the mean temperature.
///
/// Samples without a mean temperature are dropped before anything else, so sources
/// only they mention are not part of the model.
///
/// # Arguments
/// * `samples` - The observations to learn from.
///
/// # Returns
/// `Ok(None)` if there's no sample with a temperature or these mention no source at
/// all, otherwise the fitted model with its coefficients sorted by source.
///
/// # Errors
/// `MlErr` if the regression can't be solved or any of the fitted values isn't finite,
/// a model is never returned partially.
pub fn fit_temperature_model(samples: &[SampleSpec]) -> Result<Option<ModelSpec>> {
    let samples = features::with_temperature(samples);
    if samples.is_empty() {
        debug!("no sample carries a temperature, skipping fit");
        return Ok(None);
    }

    let universe = SourceUniverse::from_samples(&samples);
    if universe.is_empty() {
        debug!(samples = samples.len(); "no heat source mentioned, skipping fit");
        return Ok(None);
    }

    let encoded = features::encode(&samples, &universe);
    if encoded.conflicts > 0 {
        warn!(
            conflicts = encoded.conflicts;
            "sources listed both on and off in the same sample, keeping them off"
        );
    }

    let ridge = Ridge::default();
    let fit = ridge.fit(&encoded.features, encoded.targets.view())?;
    let score = fit.score(&encoded.features, encoded.targets.view())?;
    if !score.is_finite() {
        return Err(MlErr::NonFiniteFit { what: "score" });
    }

    debug!(
        samples = samples.len(),
        sources = universe.len(),
        nnz = encoded.features.nnz(),
        score = score;
        "fitted temperature model"
    );

    Ok(Some(summarize(&universe, &fit, score)))
}
