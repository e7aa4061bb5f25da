use std::collections::BTreeSet;

use super::TemperatureSample;

/// The sorted, deduplicated heat source identifiers of a set of samples.
///
/// The position of an identifier is the column it's encoded into.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceUniverse {
    sources: Vec<String>,
}

impl SourceUniverse {
    /// Collects every source mentioned, either on or off, by `samples`.
    ///
    /// # Arguments
    /// * `samples` - The temperature bearing samples.
    ///
    /// # Returns
    /// A new `SourceUniverse` sorted lexicographically.
    pub fn from_samples(samples: &[TemperatureSample<'_>]) -> Self {
        let sources = samples
            .iter()
            .fold(BTreeSet::new(), |mut acc, sample| {
                acc.extend(sample.sources());
                acc
            })
            .into_iter()
            .map(str::to_owned)
            .collect();

        Self { sources }
    }

    /// Returns the column of `source`, if it belongs to the universe.
    pub fn index_of(&self, source: &str) -> Option<usize> {
        self.sources
            .binary_search_by(|probe| probe.as_str().cmp(source))
            .ok()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.sources
    }
}

#[cfg(test)]
mod tests {
    use comms::specs::fit::SampleSpec;

    use super::*;
    use crate::features::with_temperature;

    fn sample(mean_t: Option<f64>, on: &[&str], off: &[&str]) -> SampleSpec {
        SampleSpec {
            mean_t,
            statuses_on: on.iter().map(|s| s.to_string()).collect(),
            statuses_off: off.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn sorted_and_deduplicated() {
        let samples = [
            sample(Some(20.0), &["radiator", "boiler"], &["fan"]),
            sample(Some(21.0), &["fan"], &["boiler", "attic"]),
        ];

        let universe = SourceUniverse::from_samples(&with_temperature(&samples));
        assert_eq!(universe.as_slice(), ["attic", "boiler", "fan", "radiator"]);
        assert_eq!(universe.len(), 4);
    }

    #[test]
    fn ignores_samples_without_temperature() {
        let samples = [
            sample(None, &["ghost"], &["phantom"]),
            sample(Some(20.0), &["boiler"], &[]),
        ];

        let universe = SourceUniverse::from_samples(&with_temperature(&samples));
        assert_eq!(universe.iter().collect::<Vec<_>>(), ["boiler"]);
        assert_eq!(universe.index_of("ghost"), None);
    }

    #[test]
    fn index_of_follows_sort_order() {
        let samples = [sample(Some(20.0), &["c", "a"], &["b"])];
        let universe = SourceUniverse::from_samples(&with_temperature(&samples));

        assert_eq!(universe.index_of("a"), Some(0));
        assert_eq!(universe.index_of("b"), Some(1));
        assert_eq!(universe.index_of("c"), Some(2));
        assert_eq!(universe.index_of("d"), None);
    }

    #[test]
    fn no_sources_makes_an_empty_universe() {
        let samples = [sample(Some(18.0), &[], &[])];
        let universe = SourceUniverse::from_samples(&with_temperature(&samples));
        assert!(universe.is_empty());
    }
}
