//! Randomness capability used by schemes that embed random filler.
//!
//! Padding logic never reaches for a global RNG directly. Callers hand in an
//! [`EntropySource`], which keeps the schemes pure and lets tests substitute a
//! seeded generator. [`SystemEntropy`] is the production source.

use crate::error::EntropyError;

/// Source of cryptographically secure random bytes.
///
/// # Invariants
///
/// - On success the whole buffer has been overwritten
/// - Implementations are safe to call concurrently from many threads
pub trait EntropySource {
    /// Fill `buffer` with random bytes.
    fn fill_random(&self, buffer: &mut [u8]) -> Result<(), EntropyError>;
}

impl<T: EntropySource + ?Sized> EntropySource for &T {
    fn fill_random(&self, buffer: &mut [u8]) -> Result<(), EntropyError> {
        (**self).fill_random(buffer)
    }
}

/// OS-backed entropy (getrandom).
///
/// Reads from the platform CSPRNG (`getrandom(2)` on Linux,
/// `BCryptGenRandom` on Windows). Unlike a server environment, a padding
/// library does not get to decide that entropy failure is fatal, so the
/// failure is returned to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemEntropy;

impl EntropySource for SystemEntropy {
    fn fill_random(&self, buffer: &mut [u8]) -> Result<(), EntropyError> {
        if buffer.is_empty() {
            return Ok(());
        }
        getrandom::fill(buffer).map_err(|e| EntropyError::new(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_entropy_fills_buffer() {
        let mut bytes1 = [0u8; 32];
        let mut bytes2 = [0u8; 32];

        SystemEntropy.fill_random(&mut bytes1).unwrap();
        SystemEntropy.fill_random(&mut bytes2).unwrap();

        // Extremely unlikely to be equal if random
        assert_ne!(bytes1, bytes2, "random bytes should differ");
    }

    #[test]
    fn empty_buffer_is_noop() {
        let mut empty: [u8; 0] = [];
        assert!(SystemEntropy.fill_random(&mut empty).is_ok());
    }

    #[test]
    fn reference_forwards() {
        let source = &SystemEntropy;
        let mut bytes = [0u8; 64];
        source.fill_random(&mut bytes).unwrap();

        let non_zero_count = bytes.iter().filter(|&&b| b != 0).count();
        assert!(non_zero_count > 32, "most bytes should be non-zero");
    }
}
