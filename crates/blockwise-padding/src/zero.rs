//! Zero padding
//!
//! Appends `overhead` zero bytes. Unpadding strips every trailing zero, so
//! data that legitimately ends in `0x00` loses those bytes. Use it only for
//! interoperability with systems that already depend on it.

use crate::{
    entropy::EntropySource,
    error::PaddingError,
    scheme::{PaddingScheme, check_pad, check_unpad, with_capacity_for},
};

/// Zero padding scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Zero;

impl PaddingScheme for Zero {
    fn name(&self) -> &'static str {
        "ZeroPadding"
    }

    fn pad_with<R: EntropySource + ?Sized>(
        &self,
        data: &[u8],
        block_size: usize,
        _entropy: &R,
    ) -> Result<Vec<u8>, PaddingError> {
        let overhead = check_pad(data, block_size)?;
        let mut padded = with_capacity_for(data, overhead);
        padded.resize(data.len() + overhead, 0x00);
        Ok(padded)
    }

    fn unpad<'a>(&self, data: &'a [u8], block_size: usize) -> Result<&'a [u8], PaddingError> {
        check_unpad(data, block_size)?;
        let end = data.iter().rposition(|&b| b != 0x00).map_or(0, |i| i + 1);
        Ok(&data[..end])
    }
}
