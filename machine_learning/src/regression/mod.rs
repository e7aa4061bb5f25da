mod linalg;
mod ridge;

pub use linalg::cholesky_solve;
pub use ridge::{DEFAULT_ALPHA, Ridge, RidgeFit};
