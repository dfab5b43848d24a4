//! Error types for padding operations

use thiserror::Error;

/// The entropy source could not produce random bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("entropy source failed: {reason}")]
pub struct EntropyError {
    /// Description reported by the underlying source
    pub reason: String,
}

impl EntropyError {
    /// Wrap a failure reported by an entropy backend.
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }
}

/// Errors from padding and unpadding
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaddingError {
    /// Input buffer was empty
    #[error("padding: empty data")]
    EmptyData,

    /// Block size is zero or cannot be encoded in a single count byte
    #[error("padding: invalid block size: {size}")]
    InvalidBlockSize {
        /// The rejected block size
        size: usize,
    },

    /// Data is not block-aligned or its padding trailer is malformed
    #[error("padding: invalid data (not padded or not multiple of the block size) with size: {len}")]
    InvalidData {
        /// Length of the rejected buffer
        len: usize,
    },

    /// Random filler could not be generated
    #[error("padding: {0}")]
    Entropy(#[from] EntropyError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_include_sizes() {
        let err = PaddingError::InvalidBlockSize { size: 0 };
        assert_eq!(err.to_string(), "padding: invalid block size: 0");

        let err = PaddingError::InvalidData { len: 17 };
        assert!(err.to_string().ends_with("with size: 17"));
    }

    #[test]
    fn entropy_error_converts() {
        let err: PaddingError = EntropyError::new("no device").into();
        assert_eq!(err.to_string(), "padding: entropy source failed: no device");
    }
}
