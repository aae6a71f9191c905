use thiserror::Error;

/// Errors returned by fallible [`BalancedTree`](crate::BalancedTree)
/// operations.
///
/// Operations on keys that are not present in the tree are never errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The named operation is not valid for the current state, such as
    /// dereferencing or advancing a cursor positioned at the end of the
    /// sequence.
    #[error("invalid operation: {0}")]
    InvalidOperation(&'static str),
}
