//! Error types for the freqset library.
//!
//! ## Key Components
//!
//! - [`EmptyCollectionError`]: Returned when the most-frequent element is
//!   requested from an empty set.
//! - [`CursorError`]: Returned by removal cursors when advanced past the
//!   tail or asked to remove without a current element.
//! - [`InvariantError`]: Returned when internal data-structure invariants
//!   are violated (`check_invariants` methods).
//!
//! All errors propagate immediately to the caller; nothing is retried or
//! masked internally.

use std::fmt;

// ---------------------------------------------------------------------------
// EmptyCollectionError
// ---------------------------------------------------------------------------

/// Error returned when `top()` is called on an empty set.
///
/// Always recoverable: check `is_empty()` or `len()` first.
///
/// # Example
///
/// ```
/// use freqset::FrequencySet;
///
/// let set: FrequencySet<&str> = FrequencySet::new();
/// assert!(set.top().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyCollectionError;

impl fmt::Display for EmptyCollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no most-frequent element in an empty set")
    }
}

impl std::error::Error for EmptyCollectionError {}

// ---------------------------------------------------------------------------
// CursorError
// ---------------------------------------------------------------------------

/// Error returned by the removal cursors.
///
/// `NoMoreElements` is the caller's responsibility to avoid by checking
/// `has_next()` first. `InvalidCursorState` is a programmer error: removal
/// is legal only immediately after an advance, and only once per advance.
///
/// # Example
///
/// ```
/// use freqset::FrequencySet;
/// use freqset::error::CursorError;
///
/// let mut set = FrequencySet::new();
/// set.add("a");
///
/// let mut cursor = set.cursor();
/// assert_eq!(cursor.remove().unwrap_err(), CursorError::InvalidCursorState);
/// cursor.advance().unwrap();
/// cursor.remove().unwrap();
/// assert_eq!(cursor.advance().unwrap_err(), CursorError::NoMoreElements);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorError {
    /// The cursor was advanced past the tail.
    NoMoreElements,
    /// Removal was requested with no valid current element.
    InvalidCursorState,
}

impl fmt::Display for CursorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CursorError::NoMoreElements => f.write_str("cursor advanced past the tail"),
            CursorError::InvalidCursorState => {
                f.write_str("cursor has no current element to remove")
            }
        }
    }
}

impl std::error::Error for CursorError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal structure invariants are violated.
///
/// Produced by `check_invariants` methods on [`FreqChain`](crate::ds::FreqChain)
/// and [`FrequencySet`](crate::FrequencySet). Carries a human-readable
/// description of which invariant failed. A violation signals a defect in
/// this library, not a condition callers should handle.
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
// Tests
// ---------------------------------------------------------------------------
