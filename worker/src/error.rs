use std::{error::Error, fmt, io};

use machine_learning::MlErr;

/// The worker module's result type.
pub type Result<T> = std::result::Result<T, WorkerErr>;

/// Worker runtime failures.
#[derive(Debug)]
pub enum WorkerErr {
    Io(io::Error),
    MalformedRequest(io::Error),
    UnexpectedMessage { got: &'static str },
    Ml(MlErr),
    Remote(String),
}

impl fmt::Display for WorkerErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkerErr::Io(e) => write!(f, "io error: {e}"),
            WorkerErr::MalformedRequest(e) => write!(f, "malformed request: {e}"),
            WorkerErr::UnexpectedMessage { got } => {
                write!(f, "unexpected message: got {got}")
            }
            WorkerErr::Ml(e) => write!(f, "failed to fit model: {e}"),
            WorkerErr::Remote(detail) => write!(f, "remote error: {detail}"),
        }
    }
}

impl Error for WorkerErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorkerErr::Io(e) | WorkerErr::MalformedRequest(e) => Some(e),
            WorkerErr::Ml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for WorkerErr {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<MlErr> for WorkerErr {
    fn from(value: MlErr) -> Self {
        Self::Ml(value)
    }
}

/// Boundary conversion for binaries / I/O APIs.
impl From<WorkerErr> for io::Error {
    fn from(value: WorkerErr) -> Self {
        match value {
            WorkerErr::Io(e) | WorkerErr::MalformedRequest(e) => e,
            other => io::Error::new(io::ErrorKind::InvalidData, other),
        }
    }
}
