//! ISO/IEC 10126 padding
//!
//! Random filler followed by a final count byte. Only the count is checked
//! on unpad; the filler is discarded unverified, so a tampered filler byte
//! goes unnoticed.

use crate::{
    entropy::EntropySource,
    error::PaddingError,
    scheme::{PaddingScheme, check_pad, check_unpad},
};

/// ISO/IEC 10126 padding scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Iso10126;

impl PaddingScheme for Iso10126 {
    fn name(&self) -> &'static str {
        "ISO10126Padding"
    }

    fn pad_with<R: EntropySource + ?Sized>(
        &self,
        data: &[u8],
        block_size: usize,
        entropy: &R,
    ) -> Result<Vec<u8>, PaddingError> {
        let overhead = check_pad(data, block_size)?;
        let mut padded = vec![0u8; data.len() + overhead];
        padded[..data.len()].copy_from_slice(data);
        let last = padded.len() - 1;
        if overhead > 1 {
            entropy.fill_random(&mut padded[data.len()..last])?;
        }
        padded[last] = overhead as u8;
        Ok(padded)
    }

    fn unpad<'a>(&self, data: &'a [u8], block_size: usize) -> Result<&'a [u8], PaddingError> {
        check_unpad(data, block_size)?;
        let n = usize::from(data[data.len() - 1]);
        if n == 0 || n > data.len() || n > block_size {
            return Err(PaddingError::InvalidData { len: data.len() });
        }
        Ok(&data[..data.len() - n])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EntropyError;

    struct FixedEntropy(u8);

    impl EntropySource for FixedEntropy {
        fn fill_random(&self, buffer: &mut [u8]) -> Result<(), EntropyError> {
            buffer.fill(self.0);
            Ok(())
        }
    }

    struct BrokenEntropy;

    impl EntropySource for BrokenEntropy {
        fn fill_random(&self, _buffer: &mut [u8]) -> Result<(), EntropyError> {
            Err(EntropyError::new("device unavailable"))
        }
    }

    #[test]
    fn filler_comes_from_entropy() {
        let padded = Iso10126.pad_with(&[0x41, 0x41, 0x41], 8, &FixedEntropy(0xEE)).unwrap();
        assert_eq!(padded, [0x41, 0x41, 0x41, 0xEE, 0xEE, 0xEE, 0xEE, 0x05]);
        assert_eq!(Iso10126.unpad(&padded, 8).unwrap(), [0x41, 0x41, 0x41]);
    }

    #[test]
    fn tampered_filler_accepted() {
        let mut padded = Iso10126.pad(b"payload", 16).unwrap();
        padded[10] ^= 0xFF;
        assert_eq!(Iso10126.unpad(&padded, 16).unwrap(), b"payload");
    }

    #[test]
    fn count_checked_against_block_size() {
        let mut data = [0u8; 32];
        data[31] = 17;
        assert_eq!(Iso10126.unpad(&data, 16), Err(PaddingError::InvalidData { len: 32 }));

        data[31] = 0;
        assert!(Iso10126.unpad(&data, 16).is_err());
    }

    #[test]
    fn entropy_failure_propagates() {
        let err = Iso10126.pad_with(b"abc", 16, &BrokenEntropy).unwrap_err();
        assert_eq!(err, PaddingError::Entropy(EntropyError::new("device unavailable")));
    }

    #[test]
    fn one_byte_overhead_needs_no_entropy() {
        let padded = Iso10126.pad_with(&[0x41; 15], 16, &BrokenEntropy).unwrap();
        assert_eq!(padded[15], 0x01);
    }
}
