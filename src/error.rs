use std::error::Error;
use std::fmt;

/// Which caller-supplied vector failed the shape check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorKind {
    Inputs,
    Expected,
}

impl fmt::Display for VectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorKind::Inputs => write!(f, "inputs"),
            VectorKind::Expected => write!(f, "expected output"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    ShapeMismatch {
        vector: VectorKind,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::ShapeMismatch { vector, expected, actual } => write!(
                f,
                "invalid {vector}: wanted {expected} values but have {actual}"
            ),
        }
    }
}

impl Error for NetworkError {}

/// A shape failure that aborted a training run part-way through.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochError {
    /// Iterations fully completed before the failing one.
    pub iterations_completed: usize,
    /// Mean error of the last completed iteration (0.0 if none completed).
    pub mean_error: f64,
    pub source: NetworkError,
}

impl fmt::Display for EpochError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "training aborted after {} completed iterations",
            self.iterations_completed
        )
    }
}

impl Error for EpochError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    WrongArity(usize),
    InvalidCount(String),
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyError::WrongArity(n) => {
                write!(f, "topology must have 3 dash-separated counts, found {n}")
            }
            TopologyError::InvalidCount(raw) => write!(f, "invalid layer size '{raw}'"),
        }
    }
}

impl Error for TopologyError {}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    OutOfRange { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read training config: {e}"),
            ConfigError::Json(e) => write!(f, "malformed training config: {e}"),
            ConfigError::OutOfRange { field, value } => {
                write!(f, "{field} is out of range: {value}")
            }
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Json(err)
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::OutOfRange { .. } => None,
        }
    }
}
