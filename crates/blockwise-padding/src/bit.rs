//! Bit padding
//!
//! A single `1` bit (the byte `0x80`) followed by zero bits up to the block
//! boundary. Unpadding scans back over zeros and requires the marker.

use crate::{
    entropy::EntropySource,
    error::PaddingError,
    scheme::{PaddingScheme, check_pad, check_unpad, with_capacity_for},
};

/// Marker byte that starts the padding.
pub(crate) const MARKER: u8 = 0x80;

/// Bit padding scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bit;

impl PaddingScheme for Bit {
    fn name(&self) -> &'static str {
        "BitPadding"
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
        let mut end = data.len();
        while end > 0 && data[end - 1] == 0x00 {
            end -= 1;
        }
        if end == 0 || data[end - 1] != MARKER {
            return Err(PaddingError::InvalidData { len: data.len() });
        }
        Ok(&data[..end - 1])
    }
}

/// `data || 0x80 || 0x00 * (overhead - 1)`, shared with ISO/IEC 7816-4.
pub(crate) fn marker_then_zeros(data: &[u8], overhead: usize) -> Vec<u8> {
    let mut padded = with_capacity_for(data, overhead);
    padded.push(MARKER);
    padded.resize(data.len() + overhead, 0x00);
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_with_marker_and_zeros() {
        let padded = Bit.pad(&[0x41, 0x41, 0x41], 8).unwrap();
        assert_eq!(padded, [0x41, 0x41, 0x41, 0x80, 0, 0, 0, 0]);
    }

    #[test]
    fn one_byte_overhead_is_just_marker() {
        let padded = Bit.pad(&[0x41; 15], 16).unwrap();
        assert_eq!(padded.len(), 16);
        assert_eq!(padded[15], 0x80);
        assert_eq!(Bit.unpad(&padded, 16).unwrap(), [0x41; 15]);
    }

    #[test]
    fn data_ending_in_marker_round_trips() {
        let data = [0x10, 0x20, 0x80];
        let padded = Bit.pad(&data, 16).unwrap();
        assert_eq!(Bit.unpad(&padded, 16).unwrap(), data);

        let data = [0x80; 16];
        let padded = Bit.pad(&data, 16).unwrap();
        assert_eq!(padded.len(), 32);
        assert_eq!(Bit.unpad(&padded, 16).unwrap(), data);
    }

    #[test]
    fn data_ending_in_zero_round_trips() {
        let data = [0x41, 0x00, 0x00];
        let padded = Bit.pad(&data, 16).unwrap();
        assert_eq!(Bit.unpad(&padded, 16).unwrap(), data);
    }

    #[test]
    fn missing_marker_rejected() {
        let mut block = [0u8; 16];
        block[0] = 0x41;
        block[1] = 0x7F;
        assert_eq!(Bit.unpad(&block, 16), Err(PaddingError::InvalidData { len: 16 }));
    }

    #[test]
    fn all_zero_rejected() {
        assert_eq!(Bit.unpad(&[0u8; 16], 16), Err(PaddingError::InvalidData { len: 16 }));
    }

    #[test]
    fn corrupted_zero_rejected() {
        let mut padded = Bit.pad(b"abc", 16).unwrap();
        padded[15] = 0x01;
        assert!(Bit.unpad(&padded, 16).is_err());
    }
}
