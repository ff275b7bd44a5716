//! Error types for the seqkit library.
//!
//! ## Key Components
//!
//! - [`SequenceError`]: Returned by sequence, cache, cursor and list
//!   operations. Every variant is a local precondition or consistency failure;
//!   nothing here is transient or worth retrying.
//! - [`InvariantError`]: Returned when an internal algorithmic invariant is
//!   violated (a derived value that does not reproduce its input, a recursion
//!   that fails to bottom out). Surfaced through [`SequenceError::Invariant`].
//! - [`ConfigError`]: Returned when builder parameters are invalid
//!   (e.g. a sieve too small to hold its seed primes).
//!
//! ## Example Usage
//!
//! ```
//! use seqkit::error::SequenceError;
//! use seqkit::prelude::*;
//!
//! let fib = FibonacciNumber::new();
//! let err = fib.sub_list(5, 5).unwrap_err();
//! assert!(matches!(err, SequenceError::InvalidArgument(_)));
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// SequenceError
// ---------------------------------------------------------------------------

/// Error returned by sequence operations.
///
/// # Example
///
/// ```
/// use seqkit::error::SequenceError;
/// use seqkit::prelude::*;
///
/// let mut cursor = PellNumber::new().cursor();
/// assert_eq!(cursor.previous().unwrap_err(), SequenceError::NoSuchElement);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// A precondition on an argument failed (malformed range, index underflow,
    /// value out of the representable range).
    InvalidArgument(String),
    /// The cache was asked to initialize a second time.
    AlreadyInitialized,
    /// A mutation was attempted on an immutable view.
    UnsupportedOperation(&'static str),
    /// A cursor was moved past one of its boundaries.
    NoSuchElement,
    /// An internal consistency check failed.
    Invariant(InvariantError),
}

impl SequenceError {
    /// Shorthand for [`SequenceError::InvalidArgument`].
    #[inline]
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

impl fmt::Display for SequenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::AlreadyInitialized => f.write_str("cache is already initialized"),
            Self::UnsupportedOperation(op) => write!(f, "unsupported operation: {op}"),
            Self::NoSuchElement => f.write_str("no such element"),
            Self::Invariant(err) => write!(f, "internal consistency failure: {err}"),
        }
    }
}

impl std::error::Error for SequenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Invariant(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InvariantError> for SequenceError {
    #[inline]
    fn from(err: InvariantError) -> Self {
        Self::Invariant(err)
    }
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when an internal algorithmic invariant is violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when builder parameters are invalid.
///
/// Produced by fallible constructors such as
/// [`SieveBuilder::try_build`](crate::sieve::SieveBuilder::try_build). Carries
/// a human-readable description of which parameter failed validation.
///
/// # Example
///
/// ```
/// use seqkit::sieve::AtkinSieve;
///
/// let err = AtkinSieve::builder().initial_size(1).try_build().unwrap_err();
/// assert!(err.to_string().contains("initial_size"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
