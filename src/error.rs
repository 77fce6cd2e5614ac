//! Error types for benchmark correlation.

use std::fmt;
use std::io;

/// Result type for benchdiff operations.
pub type Result<T> = std::result::Result<T, BenchDiffError>;

/// Which side of the comparison a candidate group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    /// The baseline run, matched by the first pattern.
    Before,
    /// The candidate run, matched by the second pattern.
    After,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Before => write!(f, "before"),
            Group::After => write!(f, "after"),
        }
    }
}

/// Errors that can occur while parsing or correlating benchmark reports.
#[derive(Debug)]
pub enum BenchDiffError {
    /// A selection pattern is not a valid regular expression.
    BadPattern(regex::Error),

    /// The input stream failed mid-read. Parse failures on individual
    /// lines are not errors; only I/O failures surface here.
    StreamRead(io::Error),

    /// A pattern matched zero records.
    GroupNotFound(Group),

    /// A pattern matched more than one record including a top-level one,
    /// so the intended target cannot be determined.
    GroupAmbiguous {
        /// Which side was ambiguous.
        group: Group,
        /// Names of every record the pattern matched.
        candidates: Vec<String>,
    },

    /// The before and after groups could not be paired one-to-one.
    AlignmentMismatch {
        /// Names of the before candidates.
        before: Vec<String>,
        /// Names of the after candidates.
        after: Vec<String>,
    },
}

impl fmt::Display for BenchDiffError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchDiffError::BadPattern(err) => write!(f, "invalid pattern: {}", err),
            BenchDiffError::StreamRead(err) => write!(f, "failed to read input: {}", err),
            BenchDiffError::GroupNotFound(group) => {
                write!(f, "{} benchmark not found", group)
            }
            BenchDiffError::GroupAmbiguous { group, candidates } => {
                write!(
                    f,
                    "{} benchmark is ambiguous: {}",
                    group,
                    candidates.join(", ")
                )
            }
            BenchDiffError::AlignmentMismatch { before, after } => {
                write!(
                    f,
                    "before and after benchmarks are not aligned\nbefore: {}\nafter: {}",
                    before.join(", "),
                    after.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for BenchDiffError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BenchDiffError::BadPattern(err) => Some(err),
            BenchDiffError::StreamRead(err) => Some(err),
            _ => None,
        }
    }
}

impl From<regex::Error> for BenchDiffError {
    fn from(err: regex::Error) -> Self {
        BenchDiffError::BadPattern(err)
    }
}

impl From<io::Error> for BenchDiffError {
    fn from(err: io::Error) -> Self {
        BenchDiffError::StreamRead(err)
    }
}
