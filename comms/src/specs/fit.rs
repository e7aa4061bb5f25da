use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One observation of the heat sources' states and the temperature measured meanwhile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleSpec {
    /// The mean temperature during the observation, `None` if nothing was measured.
    pub mean_t: Option<f64>,
    pub statuses_on: Vec<String>,
    pub statuses_off: Vec<String>,
}

/// The specification for a model fitting request.
///
/// `request_id` is opaque to the worker and echoed back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitRequest {
    pub request_id: Value,
    pub samples: Vec<SampleSpec>,
}

/// The weight of a single heat source in a fitted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientSpec {
    pub source: String,
    pub coef: f64,
}

/// A fitted temperature model.
///
/// `coefficients` are sorted by source identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub intercept: f64,
    pub score: f64,
    pub coefficients: Vec<CoefficientSpec>,
}

impl ModelSpec {
    /// Predicts the mean temperature when exactly the given sources are on.
    ///
    /// # Arguments
    /// * `active` - The identifiers of the sources that are on, sources unknown
    ///              to the model contribute nothing.
    ///
    /// # Returns
    /// The predicted mean temperature.
    pub fn predict<'s, I>(&self, active: I) -> f64
    where
        I: IntoIterator<Item = &'s str>,
    {
        let active: HashSet<&str> = active.into_iter().collect();

        self.coefficients
            .iter()
            .filter(|c| active.contains(c.source.as_str()))
            .fold(self.intercept, |acc, c| acc + c.coef)
    }
}

/// The answer to a `FitRequest`, `model` is `None` when there wasn't enough data to fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitResponse {
    pub request_id: Value,
    pub model: Option<ModelSpec>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> ModelSpec {
        ModelSpec {
            intercept: 18.0,
            score: 0.9,
            coefficients: vec![
                CoefficientSpec {
                    source: "boiler".into(),
                    coef: 3.0,
                },
                CoefficientSpec {
                    source: "window".into(),
                    coef: -1.5,
                },
            ],
        }
    }

    #[test]
    fn predict_sums_active_coefficients() {
        let model = model();
        assert_eq!(model.predict(["boiler"]), 21.0);
        assert_eq!(model.predict(["boiler", "window"]), 19.5);
        assert_eq!(model.predict(std::iter::empty()), 18.0);
    }

    #[test]
    fn predict_ignores_unknown_and_repeated_sources() {
        let model = model();
        assert_eq!(model.predict(["window", "window", "oven"]), 16.5);
    }
}
