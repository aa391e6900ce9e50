use std::error;
use std::fmt;
use std::result;

/// Errors reported by a `TreapSet`.
///
/// Duplicate keys on insertion and missing keys on removal are not errors; those operations
/// report them through their `bool` result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required argument was absent. The treap is left unchanged.
    InvalidArgument(&'static str),
    /// A key is not strictly between the bounds imposed by its ancestors.
    OrderViolation,
    /// A node has a child with a strictly greater priority.
    HeapViolation,
    /// The number of reachable nodes differs from the recorded length.
    LengthMismatch { expected: usize, actual: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidArgument(reason) => write!(f, "invalid argument: {}", reason),
            Error::OrderViolation => write!(f, "binary search tree order violated"),
            Error::HeapViolation => write!(f, "heap order on priorities violated"),
            Error::LengthMismatch { expected, actual } => write!(
                f,
                "expected {} reachable nodes, found {}",
                expected, actual,
            ),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
