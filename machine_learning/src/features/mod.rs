mod encoder;
mod universe;

use comms::specs::fit::SampleSpec;

pub use encoder::{EncodedSamples, encode};
pub use universe::SourceUniverse;

/// A sample known to carry a measured temperature.
#[derive(Debug, Clone, Copy)]
pub struct TemperatureSample<'a> {
    pub mean_t: f64,
    pub sample: &'a SampleSpec,
}

impl<'a> TemperatureSample<'a> {
    /// Iterates every source identifier this sample mentions, on ones first.
    pub fn sources(self) -> impl Iterator<Item = &'a str> {
        self.sample
            .statuses_on
            .iter()
            .chain(&self.sample.statuses_off)
            .map(String::as_str)
    }
}

/// Keeps the samples that have a measured temperature, preserving their order.
pub fn with_temperature(samples: &[SampleSpec]) -> Vec<TemperatureSample<'_>> {
    samples
        .iter()
        .filter_map(|sample| {
            sample.mean_t.map(|mean_t| TemperatureSample { mean_t, sample })
        })
        .collect()
}
