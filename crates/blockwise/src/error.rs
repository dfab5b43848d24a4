//! Error taxonomy shared by the validator, the backend and every mode.

use blockwise_padding::{EntropyError, PaddingError};
use thiserror::Error;

/// Errors from cipher mode operations.
///
/// Size errors carry the offending size so the message shows what was
/// actually passed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// Zero-length input where data is required
    #[error("data is empty")]
    EmptyData,

    /// Block size outside the permitted set
    #[error("invalid block size {size}")]
    InvalidBlockSize {
        /// The rejected block size
        size: usize,
    },

    /// Key length is not 16, 24 or 32 bytes
    #[error("invalid key size {size}")]
    InvalidKeySize {
        /// The rejected key length
        size: usize,
    },

    /// IV length is not 16, 24 or 32 bytes
    #[error("invalid iv size {size}")]
    InvalidIvSize {
        /// The rejected IV length
        size: usize,
    },

    /// IV length differs from the cipher's block size
    #[error("iv size {iv} is not equal to the block size {block}")]
    IvSizeMismatch {
        /// IV length supplied
        iv: usize,
        /// Block size of the cipher
        block: usize,
    },

    /// Plaintext is misaligned or a padding trailer is malformed
    #[error("invalid data (empty or not multiple of the block size) with size {len}")]
    InvalidData {
        /// Length of the rejected buffer
        len: usize,
    },

    /// Ciphertext length is not a multiple of the block size
    #[error("invalid ciphertext (not multiple of the block size) with size {len}")]
    InvalidCiphertext {
        /// Length of the rejected ciphertext
        len: usize,
    },

    /// GCM nonce is empty, or not 12 bytes where the standard size is required
    #[error("invalid nonce size {size}")]
    InvalidNonceSize {
        /// The rejected nonce length
        size: usize,
    },

    /// GCM tag size outside 12..=16
    #[error("incorrect tag size {size}, sizes between 12 and 16 bytes are allowed")]
    InvalidTagSize {
        /// The rejected tag size
        size: usize,
    },

    /// Input exceeds the GCM length bound of (2^32 - 2) blocks
    #[error("data size {len} exceeds the authenticated-mode bound")]
    DataTooLarge {
        /// Length of the rejected input
        len: usize,
    },

    /// Authentication tag did not verify; no plaintext is released
    #[error("message authentication failed")]
    AuthenticationFailed,

    /// Random bytes could not be produced
    #[error(transparent)]
    Entropy(#[from] EntropyError),
}

impl CipherError {
    /// Returns true if retrying the same call could succeed.
    ///
    /// Every size and data error is a deterministic function of the inputs,
    /// so only an entropy failure can be transient.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Entropy(_))
    }
}

/// Flatten padding failures into the cipher taxonomy so `?` works across
/// both layers.
impl From<PaddingError> for CipherError {
    fn from(err: PaddingError) -> Self {
        match err {
            PaddingError::EmptyData => Self::EmptyData,
            PaddingError::InvalidBlockSize { size } => Self::InvalidBlockSize { size },
            PaddingError::InvalidData { len } => Self::InvalidData { len },
            PaddingError::Entropy(e) => Self::Entropy(e),
        }
    }
}
