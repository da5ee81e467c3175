//! Error types for the doegen library.
//!
//! Every fallible operation returns [`Result`], built on a single
//! `thiserror`-derived [`Error`] enum. Errors are deterministic: retrying
//! the same call with the same inputs always fails the same way.

use thiserror::Error;

/// The main error type for the doegen library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ============ Parameter Validation Errors ============
    /// The factor count is below the minimum the design requires.
    #[error("{design} requires at least {min} factors, got {factors}")]
    InvalidFactorCount {
        /// Name of the design being built.
        design: &'static str,
        /// Requested number of factors.
        factors: usize,
        /// Minimum number of factors for this design.
        min: usize,
    },

    /// A design parameter is outside its accepted set or has the wrong shape.
    #[error("invalid parameter: {message}")]
    InvalidParameter {
        /// Description of what is invalid.
        message: String,
    },

    /// The factor specification is malformed.
    #[error("invalid factor specification: {message}")]
    InvalidFactorSpec {
        /// Description of what is invalid.
        message: String,
    },

    /// A generator string could not be parsed.
    #[error("invalid generator {generator:?}: {message}")]
    InvalidGenerator {
        /// The offending generator text.
        generator: String,
        /// Description of what is invalid.
        message: String,
    },

    // ============ Construction Errors ============
    /// No base-factor count can reach the requested resolution.
    #[error("design not possible: {factors} factors at resolution {resolution}")]
    DesignNotPossible {
        /// Requested number of factors.
        factors: usize,
        /// Requested resolution (3 for screening designs).
        resolution: usize,
    },

    /// The design needs more base factors than the generator alphabet holds.
    #[error("design requires {required} base factors, at most {max} are available")]
    TooManyFactors {
        /// Number of base factors the design would need.
        required: usize,
        /// Maximum number of base factors.
        max: usize,
    },

    // ============ Dimension Errors ============
    /// Two blocks with different column counts were combined.
    #[error("shape mismatch: expected {expected} columns, got {actual}")]
    ShapeMismatch {
        /// Column count of the first block.
        expected: usize,
        /// Column count of the second block.
        actual: usize,
    },

    // ============ I/O Errors ============
    /// Reading or writing tabular data failed.
    #[error("i/o failure on {path}: {message}")]
    Io {
        /// Path (or stream label) involved.
        path: String,
        /// Underlying error text.
        message: String,
    },
}

/// A specialized `Result` type for doegen operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Create a new `InvalidParameter` error.
    #[must_use]
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// Create a new `InvalidFactorSpec` error.
    #[must_use]
    pub fn invalid_factor_spec(message: impl Into<String>) -> Self {
        Self::InvalidFactorSpec {
            message: message.into(),
        }
    }

    /// Create a new `InvalidGenerator` error.
    #[must_use]
    pub fn invalid_generator(generator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidGenerator {
            generator: generator.into(),
            message: message.into(),
        }
    }

    /// Create a new `Io` error.
    #[must_use]
    pub fn io(path: impl Into<String>, message: impl ToString) -> Self {
        Self::Io {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
