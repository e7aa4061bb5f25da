//! Compressed sparse row storage for design matrices.

use std::collections::BTreeMap;

use ndarray::{Array1, Array2, ArrayView1};

/// A compressed sparse row (CSR) matrix of `f64`.
///
/// Explicitly written zeros are stored like any other value, a cell that was never
/// written reads as `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct SparseMatrix {
    ncols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f64>,
}

impl SparseMatrix {
    /// Creates a new `SparseMatrixBuilder` for a matrix with `ncols` columns.
    pub fn builder(ncols: usize) -> SparseMatrixBuilder {
        SparseMatrixBuilder::new(ncols)
    }

    pub fn nrows(&self) -> usize {
        self.indptr.len() - 1
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns the amount of stored cells.
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    /// Iterates the stored `(column, value)` pairs of a row, sorted by column.
    ///
    /// # Panics
    /// If `row` is out of bounds.
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let span = self.indptr[row]..self.indptr[row + 1];
        self.indices[span.clone()]
            .iter()
            .copied()
            .zip(self.data[span].iter().copied())
    }

    /// Returns the value of a single cell.
    ///
    /// # Panics
    /// If `row` is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        let span = self.indptr[row]..self.indptr[row + 1];
        match self.indices[span.clone()].binary_search(&col) {
            Ok(pos) => self.data[span.start + pos],
            Err(_) => 0.0,
        }
    }

    pub fn to_dense(&self) -> Array2<f64> {
        let mut dense = Array2::zeros((self.nrows(), self.ncols));
        for i in 0..self.nrows() {
            for (j, v) in self.row(i) {
                dense[[i, j]] = v;
            }
        }

        dense
    }

    /// Computes `X w`.
    pub fn dot(&self, w: ArrayView1<f64>) -> Array1<f64> {
        debug_assert_eq!(w.len(), self.ncols);

        (0..self.nrows())
            .map(|i| self.row(i).map(|(j, v)| v * w[j]).sum::<f64>())
            .collect()
    }

    /// Computes `Xᵀ y`.
    pub fn t_dot(&self, y: ArrayView1<f64>) -> Array1<f64> {
        debug_assert_eq!(y.len(), self.nrows());

        let mut out = Array1::zeros(self.ncols);
        for (i, &yi) in y.iter().enumerate() {
            for (j, v) in self.row(i) {
                out[j] += v * yi;
            }
        }

        out
    }

    /// Computes the dense `Xᵀ X` gram matrix.
    pub fn gram(&self) -> Array2<f64> {
        let mut gram = Array2::zeros((self.ncols, self.ncols));
        for i in 0..self.nrows() {
            for (j, vj) in self.row(i) {
                for (k, vk) in self.row(i) {
                    gram[[j, k]] += vj * vk;
                }
            }
        }

        gram
    }

    /// Computes the mean of every column, unwritten cells count as zeros.
    pub fn column_means(&self) -> Array1<f64> {
        let mut sums = Array1::zeros(self.ncols);
        for (&j, &v) in self.indices.iter().zip(&self.data) {
            sums[j] += v;
        }

        match self.nrows() {
            0 => sums,
            n => sums / n as f64,
        }
    }
}

/// Builds a `SparseMatrix` one row at a time.
pub struct SparseMatrixBuilder {
    ncols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f64>,
    row: BTreeMap<usize, f64>,
}

impl SparseMatrixBuilder {
    fn new(ncols: usize) -> Self {
        Self {
            ncols,
            indptr: vec![0],
            indices: Vec::new(),
            data: Vec::new(),
            row: BTreeMap::new(),
        }
    }

    /// Appends a row made of `(column, value)` writes.
    ///
    /// Writes are applied in order, a later write to the same column replaces the
    /// earlier one.
    ///
    /// # Arguments
    /// * `writes` - The cell writes of this row.
    ///
    /// # Returns
    /// The amount of writes that replaced a different value for the same cell.
    pub fn push_row<I>(&mut self, writes: I) -> usize
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let mut overwritten = 0;
        for (col, value) in writes {
            debug_assert!(col < self.ncols, "column {col} out of {}", self.ncols);

            if self.row.insert(col, value).is_some_and(|old| old != value) {
                overwritten += 1;
            }
        }

        for (col, value) in std::mem::take(&mut self.row) {
            self.indices.push(col);
            self.data.push(value);
        }
        self.indptr.push(self.indices.len());

        overwritten
    }

    pub fn finish(self) -> SparseMatrix {
        let Self {
            ncols,
            indptr,
            indices,
            data,
            ..
        } = self;

        SparseMatrix {
            ncols,
            indptr,
            indices,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{arr1, arr2};

    use super::*;

    fn sample() -> SparseMatrix {
        let mut builder = SparseMatrix::builder(3);
        builder.push_row([(2, 1.0), (0, 1.0)]);
        builder.push_row([]);
        builder.push_row([(1, 1.0), (2, 0.0)]);
        builder.finish()
    }

    #[test]
    fn shape_and_cells() {
        let m = sample();
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.ncols(), 3);
        assert_eq!(m.nnz(), 4);

        assert_eq!(m.get(0, 0), 1.0);
        assert_eq!(m.get(0, 1), 0.0);
        assert_eq!(m.get(1, 2), 0.0);
        assert_eq!(m.get(2, 1), 1.0);
        assert_eq!(m.row(0).collect::<Vec<_>>(), [(0, 1.0), (2, 1.0)]);
    }

    #[test]
    fn last_write_wins() {
        let mut builder = SparseMatrix::builder(2);
        let overwritten = builder.push_row([(0, 1.0), (1, 1.0), (0, 0.0), (1, 1.0)]);
        let m = builder.finish();

        assert_eq!(overwritten, 1);
        assert_eq!(m.get(0, 0), 0.0);
        assert_eq!(m.get(0, 1), 1.0);
    }

    #[test]
    fn dense_products_agree() {
        let m = sample();
        let dense = m.to_dense();
        assert_eq!(
            dense,
            arr2(&[[1.0, 0.0, 1.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
        );

        let w = arr1(&[2.0, -1.0, 0.5]);
        assert_eq!(m.dot(w.view()), dense.dot(&w));

        let y = arr1(&[1.0, 4.0, 3.0]);
        assert_eq!(m.t_dot(y.view()), dense.t().dot(&y));
        assert_eq!(m.gram(), dense.t().dot(&dense));
    }

    #[test]
    fn column_means_count_missing_cells_as_zero() {
        let means = sample().column_means();
        assert_eq!(means, arr1(&[1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0]));
    }

    #[test]
    fn empty_matrix() {
        let m = SparseMatrix::builder(2).finish();
        assert_eq!(m.nrows(), 0);
        assert_eq!(m.column_means(), arr1(&[0.0, 0.0]));
        assert_eq!(m.gram(), Array2::<f64>::zeros((2, 2)));
    }
}
