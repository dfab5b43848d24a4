//! The padding scheme capability and its closed enumeration.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    bit::Bit,
    entropy::{EntropySource, SystemEntropy},
    error::PaddingError,
    iso7816::Iso7816,
    iso10126::Iso10126,
    pkcs7::{Pkcs5, Pkcs7},
    x923::X923,
    zero::Zero,
};

/// Largest block size a scheme accepts. The count byte of PKCS7, X9.23 and
/// ISO 10126 must hold the overhead.
pub const MAX_BLOCK_SIZE: usize = 255;

/// Number of padding bytes appended to `len` bytes of data.
///
/// Always in `1..=block_size`: aligned input receives a full extra block so
/// that padding is never ambiguous. `block_size` must be non-zero.
pub fn overhead_size(len: usize, block_size: usize) -> usize {
    block_size - (len % block_size)
}

/// A reversible transform from arbitrary-length data to block-aligned data.
///
/// Implementations are stateless. `pad` always appends between 1 and
/// `block_size` bytes; `unpad` returns a prefix of its input and rejects
/// malformed trailers with [`PaddingError::InvalidData`] rather than
/// truncating.
pub trait PaddingScheme {
    /// Stable name used for diagnostics and selection (e.g. `PKCS7Padding`).
    fn name(&self) -> &'static str;

    /// Pad `data` to a multiple of `block_size`, drawing any random filler
    /// from `entropy`.
    fn pad_with<R: EntropySource + ?Sized>(
        &self,
        data: &[u8],
        block_size: usize,
        entropy: &R,
    ) -> Result<Vec<u8>, PaddingError>;

    /// Pad `data` to a multiple of `block_size` using OS entropy.
    fn pad(&self, data: &[u8], block_size: usize) -> Result<Vec<u8>, PaddingError> {
        self.pad_with(data, block_size, &SystemEntropy)
    }

    /// Strip padding, returning the original prefix of `data`.
    fn unpad<'a>(&self, data: &'a [u8], block_size: usize) -> Result<&'a [u8], PaddingError>;
}

/// Reject block sizes that are zero or exceed [`MAX_BLOCK_SIZE`].
pub(crate) fn check_block_size(block_size: usize) -> Result<(), PaddingError> {
    if block_size == 0 || block_size > MAX_BLOCK_SIZE {
        return Err(PaddingError::InvalidBlockSize { size: block_size });
    }
    Ok(())
}

/// Shared preconditions for `pad`. Returns the overhead to append.
pub(crate) fn check_pad(data: &[u8], block_size: usize) -> Result<usize, PaddingError> {
    if data.is_empty() {
        return Err(PaddingError::EmptyData);
    }
    check_block_size(block_size)?;
    Ok(overhead_size(data.len(), block_size))
}

/// Shared preconditions for `unpad`.
pub(crate) fn check_unpad(data: &[u8], block_size: usize) -> Result<(), PaddingError> {
    if data.is_empty() {
        return Err(PaddingError::EmptyData);
    }
    check_block_size(block_size)?;
    if data.len() % block_size != 0 {
        return Err(PaddingError::InvalidData { len: data.len() });
    }
    Ok(())
}

/// Copy `data` into a buffer with room for `overhead` more bytes.
pub(crate) fn with_capacity_for(data: &[u8], overhead: usize) -> Vec<u8> {
    let mut padded = Vec::with_capacity(data.len() + overhead);
    padded.extend_from_slice(data);
    padded
}

/// A padding scheme selected by name.
///
/// Serializes to and parses from the stable scheme name, so it can be read
/// straight out of configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Padding {
    /// Zero bytes; lossy for data ending in `0x00`
    #[serde(rename = "ZeroPadding")]
    Zero,
    /// `0x80` marker followed by zeros
    #[serde(rename = "BitPadding")]
    Bit,
    /// PKCS#5 (alias of PKCS#7)
    #[serde(rename = "PKCS5Padding")]
    Pkcs5,
    /// PKCS#7
    #[serde(rename = "PKCS7Padding")]
    Pkcs7,
    /// ANSI X9.23
    #[serde(rename = "X923Padding")]
    X923,
    /// ISO/IEC 7816-4
    #[serde(rename = "ISO7816Padding")]
    Iso7816,
    /// ISO/IEC 10126; filler is random and never verified
    #[serde(rename = "ISO10126Padding")]
    Iso10126,
}

impl Padding {
    /// Every scheme, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Zero,
        Self::Bit,
        Self::Pkcs5,
        Self::Pkcs7,
        Self::X923,
        Self::Iso7816,
        Self::Iso10126,
    ];
}

impl PaddingScheme for Padding {
    fn name(&self) -> &'static str {
        match self {
            Self::Zero => Zero.name(),
            Self::Bit => Bit.name(),
            Self::Pkcs5 => Pkcs5.name(),
            Self::Pkcs7 => Pkcs7.name(),
            Self::X923 => X923.name(),
            Self::Iso7816 => Iso7816.name(),
            Self::Iso10126 => Iso10126.name(),
        }
    }

    fn pad_with<R: EntropySource + ?Sized>(
        &self,
        data: &[u8],
        block_size: usize,
        entropy: &R,
    ) -> Result<Vec<u8>, PaddingError> {
        match self {
            Self::Zero => Zero.pad_with(data, block_size, entropy),
            Self::Bit => Bit.pad_with(data, block_size, entropy),
            Self::Pkcs5 => Pkcs5.pad_with(data, block_size, entropy),
            Self::Pkcs7 => Pkcs7.pad_with(data, block_size, entropy),
            Self::X923 => X923.pad_with(data, block_size, entropy),
            Self::Iso7816 => Iso7816.pad_with(data, block_size, entropy),
            Self::Iso10126 => Iso10126.pad_with(data, block_size, entropy),
        }
    }

    fn unpad<'a>(&self, data: &'a [u8], block_size: usize) -> Result<&'a [u8], PaddingError> {
        match self {
            Self::Zero => Zero.unpad(data, block_size),
            Self::Bit => Bit.unpad(data, block_size),
            Self::Pkcs5 => Pkcs5.unpad(data, block_size),
            Self::Pkcs7 => Pkcs7.unpad(data, block_size),
            Self::X923 => X923.unpad(data, block_size),
            Self::Iso7816 => Iso7816.unpad(data, block_size),
            Self::Iso10126 => Iso10126.unpad(data, block_size),
        }
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scheme name that matches no known padding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown padding scheme: {name}")]
pub struct UnknownPadding {
    /// The name that failed to parse
    pub name: String,
}

impl FromStr for Padding {
    type Err = UnknownPadding;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|padding| padding.name() == s)
            .ok_or_else(|| UnknownPadding { name: s.to_string() })
    }
}
