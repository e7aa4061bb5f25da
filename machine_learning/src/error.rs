use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire machine learning module.
pub type Result<T> = std::result::Result<T, MlErr>;

/// The machine learning module's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum MlErr {
    SizeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    NoSamples,
    NotPositiveDefinite {
        pivot: usize,
    },
    NonFiniteFit {
        what: &'static str,
    },
}

impl Display for MlErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MlErr::SizeMismatch {
                a,
                b,
                got,
                expected,
            } => {
                format!(
                    "There's a size mismatch between {a} and {b}, got {got} and expected {expected}"
                )
            }
            MlErr::NoSamples => "Can't fit a model without any sample".to_string(),
            MlErr::NotPositiveDefinite { pivot } => format!(
                "The normal equations matrix is not positive definite, failed at pivot {pivot}"
            ),
            MlErr::NonFiniteFit { what } => {
                format!("The fitted {what} is not finite, the targets are out of range")
            }
        };

        write!(f, "{s}")
    }
}

impl Error for MlErr {}
