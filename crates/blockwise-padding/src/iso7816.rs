//! ISO/IEC 7816-4 padding
//!
//! Same trailer as bit padding (`0x80` then zeros), but unpadding insists
//! the marker sits inside the final block.

use crate::{
    bit::{MARKER, marker_then_zeros},
    entropy::EntropySource,
    error::PaddingError,
    scheme::{PaddingScheme, check_pad, check_unpad},
};

/// ISO/IEC 7816-4 padding scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Iso7816;

impl PaddingScheme for Iso7816 {
    fn name(&self) -> &'static str {
        "ISO7816Padding"
    }

    fn pad_with<R: EntropySource + ?Sized>(
        &self,
        data: &[u8],
        block_size: usize,
        _entropy: &R,
    ) -> Result<Vec<u8>, PaddingError> {
        let overhead = check_pad(data, block_size)?;
        Ok(marker_then_zeros(data, overhead))
    }

    fn unpad<'a>(&self, data: &'a [u8], block_size: usize) -> Result<&'a [u8], PaddingError> {
        check_unpad(data, block_size)?;
        // Zeros after the marker: at most block_size - 1 of them
        let zeros = data.iter().rev().take_while(|&&b| b == 0x00).count();
        if zeros >= block_size {
            return Err(PaddingError::InvalidData { len: data.len() });
        }
        let marker = data.len() - zeros - 1;
        if data[marker] != MARKER {
            return Err(PaddingError::InvalidData { len: data.len() });
        }
        Ok(&data[..marker])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_like_bit_padding() {
        let padded = Iso7816.pad(&[0xDD; 5], 8).unwrap();
        assert_eq!(padded, [0xDD, 0xDD, 0xDD, 0xDD, 0xDD, 0x80, 0x00, 0x00]);
        assert_eq!(Iso7816.unpad(&padded, 8).unwrap(), [0xDD; 5]);
    }

    #[test]
    fn single_marker_byte_round_trips() {
        let data = [0x01u8; 31];
        let padded = Iso7816.pad(&data, 32).unwrap();
        assert_eq!(padded.len(), 32);
        assert_eq!(Iso7816.unpad(&padded, 32).unwrap(), data);
    }

    #[test]
    fn marker_outside_final_block_rejected() {
        let mut data = [0u8; 32];
        data[15] = 0x80;
        assert_eq!(Iso7816.unpad(&data, 16), Err(PaddingError::InvalidData { len: 32 }));
    }

    #[test]
    fn missing_marker_rejected() {
        let mut block = [0u8; 16];
        block[3] = 0x42;
        assert_eq!(Iso7816.unpad(&block, 16), Err(PaddingError::InvalidData { len: 16 }));

        let block = [0x42u8; 16];
        assert!(Iso7816.unpad(&block, 16).is_err());
    }

    #[test]
    fn earlier_marker_in_data_is_kept() {
        let data = [0x80, 0x00, 0x80, 0x00];
        let padded = Iso7816.pad(&data, 16).unwrap();
        assert_eq!(Iso7816.unpad(&padded, 16).unwrap(), data);
    }
}
