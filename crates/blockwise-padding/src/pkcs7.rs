//! PKCS#7 padding (RFC 5652 §6.3) and its PKCS#5 alias
//!
//! Every padding byte holds the overhead count, so unpadding can verify the
//! whole trailer.

use crate::{
    entropy::EntropySource,
    error::PaddingError,
    scheme::{PaddingScheme, check_pad, check_unpad, with_capacity_for},
};

/// PKCS#7 padding scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pkcs7;

impl PaddingScheme for Pkcs7 {
    fn name(&self) -> &'static str {
        "PKCS7Padding"
    }

    /// Right-pads with 1 to `block_size` bytes, each equal to the count.
    fn pad_with<R: EntropySource + ?Sized>(
        &self,
        data: &[u8],
        block_size: usize,
        _entropy: &R,
    ) -> Result<Vec<u8>, PaddingError> {
        let overhead = check_pad(data, block_size)?;
        let mut padded = with_capacity_for(data, overhead);
        padded.resize(data.len() + overhead, overhead as u8);
        Ok(padded)
    }

    /// Validates the trailer and returns data 1 to `block_size` bytes
    /// shorter.
    fn unpad<'a>(&self, data: &'a [u8], block_size: usize) -> Result<&'a [u8], PaddingError> {
        check_unpad(data, block_size)?;
        let count = data[data.len() - 1];
        let n = usize::from(count);
        if n == 0 || n > data.len() {
            return Err(PaddingError::InvalidData { len: data.len() });
        }
        let (body, trailer) = data.split_at(data.len() - n);
        if trailer.iter().any(|&b| b != count) {
            return Err(PaddingError::InvalidData { len: data.len() });
        }
        Ok(body)
    }
}

/// PKCS#5 padding.
///
/// PKCS#5 was defined for 8-byte blocks; it is byte-for-byte PKCS#7 and is
/// applied with whatever block size the caller passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pkcs5;

impl PaddingScheme for Pkcs5 {
    fn name(&self) -> &'static str {
        "PKCS5Padding"
    }

    fn pad_with<R: EntropySource + ?Sized>(
        &self,
        data: &[u8],
        block_size: usize,
        entropy: &R,
    ) -> Result<Vec<u8>, PaddingError> {
        Pkcs7.pad_with(data, block_size, entropy)
    }

    fn unpad<'a>(&self, data: &'a [u8], block_size: usize) -> Result<&'a [u8], PaddingError> {
        Pkcs7.unpad(data, block_size)
    }
}
