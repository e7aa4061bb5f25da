use ndarray::Array1;

use super::{SourceUniverse, TemperatureSample};
use crate::sparse::SparseMatrix;

const ON: f64 = 1.0;
const OFF: f64 = 0.0;

/// The design matrix and target vector built out of a set of samples.
#[derive(Debug, Clone)]
pub struct EncodedSamples {
    /// One row per sample, one column per source of the universe.
    pub features: SparseMatrix,
    /// The mean temperature of every row.
    pub targets: Array1<f64>,
    /// Cells whose source was listed both on and off in the same sample.
    pub conflicts: usize,
}

/// Encodes `samples` against the columns of `universe`.
///
/// A listed on source is a `1`, a listed off source is a `0` and an unlisted source is
/// left unwritten. Off sources are written after on sources, so a source listed as both
/// ends up as `0`.
///
/// # Arguments
/// * `samples` - The temperature bearing samples, every source must belong to `universe`.
/// * `universe` - The column ordering.
///
/// # Returns
/// The encoded samples, rows in the same order as `samples`.
pub fn encode(samples: &[TemperatureSample<'_>], universe: &SourceUniverse) -> EncodedSamples {
    let column = |source: &String| {
        let col = universe.index_of(source);
        debug_assert!(col.is_some(), "source {source} is not in the universe");
        col
    };

    let mut builder = SparseMatrix::builder(universe.len());
    let mut targets = Vec::with_capacity(samples.len());
    let mut conflicts = 0;

    for TemperatureSample { mean_t, sample } in samples {
        targets.push(*mean_t);

        let on = sample.statuses_on.iter().filter_map(column).map(|j| (j, ON));
        let off = sample.statuses_off.iter().filter_map(column).map(|j| (j, OFF));
        conflicts += builder.push_row(on.chain(off));
    }

    EncodedSamples {
        features: builder.finish(),
        targets: Array1::from(targets),
        conflicts,
    }
}
