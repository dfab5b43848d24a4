//! ANSI X9.23 padding
//!
//! Zero filler followed by a final count byte. Unpadding verifies that the
//! filler is all zeros.

use crate::{
    entropy::EntropySource,
    error::PaddingError,
    scheme::{PaddingScheme, check_pad, check_unpad, with_capacity_for},
};

/// ANSI X9.23 padding scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct X923;

impl PaddingScheme for X923 {
    fn name(&self) -> &'static str {
        "X923Padding"
    }

    fn pad_with<R: EntropySource + ?Sized>(
        &self,
        data: &[u8],
        block_size: usize,
        _entropy: &R,
    ) -> Result<Vec<u8>, PaddingError> {
        let overhead = check_pad(data, block_size)?;
        let mut padded = with_capacity_for(data, overhead);
        padded.resize(data.len() + overhead - 1, 0x00);
        padded.push(overhead as u8);
        Ok(padded)
    }

    fn unpad<'a>(&self, data: &'a [u8], block_size: usize) -> Result<&'a [u8], PaddingError> {
        check_unpad(data, block_size)?;
        let n = usize::from(data[data.len() - 1]);
        if n == 0 || n > data.len() {
            return Err(PaddingError::InvalidData { len: data.len() });
        }
        let (body, trailer) = data.split_at(data.len() - n);
        let filler = &trailer[..n - 1];
        if filler.iter().any(|&b| b != 0x00) {
            return Err(PaddingError::InvalidData { len: data.len() });
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_with_zeros_and_count() {
        let padded = X923.pad(&[0x41, 0x41, 0x41], 8).unwrap();
        assert_eq!(padded, [0x41, 0x41, 0x41, 0, 0, 0, 0, 0x05]);
        assert_eq!(X923.unpad(&padded, 8).unwrap(), [0x41, 0x41, 0x41]);
    }

    #[test]
    fn aligned_input_gets_full_block() {
        let padded = X923.pad(&[0xFF; 16], 16).unwrap();
        assert_eq!(padded.len(), 32);
        assert_eq!(padded[31], 16);
        assert!(padded[16..31].iter().all(|&b| b == 0));
    }

    #[test]
    fn nonzero_filler_rejected() {
        let mut padded = X923.pad(b"abc", 16).unwrap();
        padded[5] = 0x01;
        assert_eq!(X923.unpad(&padded, 16), Err(PaddingError::InvalidData { len: 16 }));
    }

    #[test]
    fn count_out_of_range_rejected() {
        let mut block = [0u8; 16];
        block[15] = 0;
        assert!(X923.unpad(&block, 16).is_err());

        block[15] = 17;
        assert_eq!(X923.unpad(&block, 16), Err(PaddingError::InvalidData { len: 16 }));
    }
}
