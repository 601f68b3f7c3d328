//! Error types for corpus document construction.

use thiserror::Error;

use crate::models::MetaType;

/// All errors that can occur while constructing corpus documents.
///
/// Every variant is a caller-contract violation: construction is a
/// deterministic transform from parameters to bytes, so nothing here is
/// recoverable within the call. Malformed-variant construction never fails
/// for data reasons; producing an invalid-by-design byte stream is success.
#[derive(Debug, Error)]
pub enum Error {
    /// Arrays may not contain arrays.
    #[error("array element type may not be 'array' (nested arrays are unsupported)")]
    UnsupportedNesting,

    /// An array element's variant does not match the declared element type.
    #[error("array declared element type {expected:?}, found element of type {found:?}")]
    ArrayElementType { expected: MetaType, found: MetaType },

    /// Tensor dimension count outside the supported range.
    #[error("tensor has {n_dims} dimensions (supported range is 1-4)")]
    InvalidDimensions { n_dims: u32 },

    /// Tensor payload length disagrees with the element type's sizing rule.
    #[error("tensor payload is {found} bytes, element type requires {expected}")]
    PayloadSizeMismatch { expected: u64, found: u64 },

    /// Synthesizer byte budget below the empty-document floor.
    #[error("size budget {budget} bytes cannot fit a document (minimum {minimum})")]
    BudgetTooSmall { budget: u64, minimum: u64 },

    /// Malformed-catalogue index out of range.
    #[error("malformed variant index {index} out of range (catalogue has {count} entries)")]
    UnknownVariant { index: u32, count: u32 },
}
