//! Mode adapters.
//!
//! Each adapter composes the validator, a [`Backend`] and an optional
//! [`Padding`] into one `encrypt`/`decrypt` pair. Adapters hold no state
//! beyond the backend, so the process-wide constants ([`ECB`], [`CBC`], ...)
//! can be shared freely across threads.
//!
//! # Call shape
//!
//! ```text
//! ECB  encrypt(data, key, padding)
//! CBC  encrypt(data, key, iv, padding)          block-aligned
//! CFB  encrypt(data, key, iv, padding)          stream, any length
//! OFB  encrypt(data, key, iv, padding)          stream, any length
//! CTR  encrypt(data, key, iv, padding)          stream, any length
//! GCM  encrypt(data, key, nonce, aad, padding)  ciphertext || tag
//! ```
//!
//! Validation always completes before a cipher is keyed or data is padded.

mod cbc;
mod cfb;
mod ctr;
mod ecb;
mod gcm;
mod ofb;

use std::{fmt, str::FromStr};

use blockwise_padding::{Padding, PaddingScheme};
use cipher::BlockSizeUser;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::Zeroize;

pub use self::{
    cbc::{CBC, CbcMode},
    cfb::{CFB, CfbMode},
    ctr::{CTR, CtrMode},
    ecb::{ECB, EcbMode},
    gcm::{GCM, GcmMode},
    ofb::{OFB, OfbMode},
};
use crate::{
    backend::Backend,
    error::CipherError,
    validate::{ensure_not_empty, valid_key_size},
};

/// A cipher mode selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    /// Electronic codebook: every block encrypted independently
    Ecb,
    /// Cipher block chaining
    Cbc,
    /// Cipher feedback (full-block segments)
    Cfb,
    /// Output feedback
    Ofb,
    /// Counter
    Ctr,
    /// Galois/counter, authenticated
    Gcm,
}

impl Mode {
    /// Every mode, in declaration order.
    pub const ALL: [Self; 6] = [Self::Ecb, Self::Cbc, Self::Cfb, Self::Ofb, Self::Ctr, Self::Gcm];

    /// Stable mode name (`ECB`, `CBC`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ecb => "ECB",
            Self::Cbc => "CBC",
            Self::Cfb => "CFB",
            Self::Ofb => "OFB",
            Self::Ctr => "CTR",
            Self::Gcm => "GCM",
        }
    }

    /// Whether unpadded input must already be block-aligned.
    pub const fn requires_alignment(self) -> bool {
        matches!(self, Self::Ecb | Self::Cbc)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A mode name that matches no known mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown cipher mode: {name}")]
pub struct UnknownMode {
    /// The name that failed to parse
    pub name: String,
}

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMode { name: s.to_string() })
    }
}

/// Empty check, key size check, then key the cipher. Returns the cipher and
/// its block size.
fn keyed_cipher<B: Backend>(
    backend: &B,
    data_len: usize,
    key: &[u8],
) -> Result<(B::Cipher, usize), CipherError> {
    ensure_not_empty(data_len)?;
    valid_key_size(key.len())?;
    let cipher = backend.new_cipher(key)?;
    Ok((cipher, <B::Cipher as BlockSizeUser>::block_size()))
}

/// Plaintext about to enter a block-aligned mode must fill whole blocks.
fn ensure_aligned(mode: Mode, len: usize, block_size: usize) -> Result<(), CipherError> {
    if mode.requires_alignment() && len % block_size != 0 {
        return Err(CipherError::InvalidData { len });
    }
    Ok(())
}

/// Copy `data`, padding it when a scheme is given.
fn pad_input<B: Backend>(
    backend: &B,
    data: &[u8],
    padding: Option<Padding>,
    block_size: usize,
) -> Result<Vec<u8>, CipherError> {
    match padding {
        Some(scheme) => Ok(scheme.pad_with(data, block_size, backend)?),
        None => Ok(data.to_vec()),
    }
}

/// Strip padding in place. Decrypted bytes are wiped if the trailer is bad.
fn unpad_output(
    mut data: Vec<u8>,
    padding: Option<Padding>,
    block_size: usize,
) -> Result<Vec<u8>, CipherError> {
    let Some(scheme) = padding else {
        return Ok(data);
    };
    match scheme.unpad(&data, block_size).map(<[u8]>::len) {
        Ok(len) => {
            data.truncate(len);
            Ok(data)
        },
        Err(e) => {
            data.zeroize();
            Err(e.into())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_case_insensitively() {
        for mode in Mode::ALL {
            assert_eq!(mode.name().parse::<Mode>().unwrap(), mode);
            assert_eq!(mode.name().to_lowercase().parse::<Mode>().unwrap(), mode);
        }
        assert_eq!(
            "XTS".parse::<Mode>().unwrap_err(),
            UnknownMode { name: "XTS".to_string() }
        );
    }

    #[test]
    fn serde_uses_upper_case_names() {
        assert_eq!(serde_json::to_string(&Mode::Ctr).unwrap(), "\"CTR\"");
        assert_eq!(serde_json::from_str::<Mode>("\"GCM\"").unwrap(), Mode::Gcm);
    }

    #[test]
    fn mode_properties() {
        assert!(Mode::Ecb.requires_alignment());
        assert!(Mode::Cbc.requires_alignment());
        assert!(!Mode::Ctr.requires_alignment());
        assert!(!Mode::Gcm.requires_alignment());
    }

    #[test]
    fn bad_trailer_is_invalid_data() {
        let data = vec![0x41u8; 16];
        assert_eq!(
            unpad_output(data, Some(Padding::Pkcs7), 16),
            Err(CipherError::InvalidData { len: 16 })
        );
    }

    #[test]
    fn alignment_only_enforced_for_block_modes() {
        assert_eq!(ensure_aligned(Mode::Ecb, 17, 16), Err(CipherError::InvalidData { len: 17 }));
        assert_eq!(ensure_aligned(Mode::Cbc, 15, 16), Err(CipherError::InvalidData { len: 15 }));
        assert!(ensure_aligned(Mode::Cbc, 32, 16).is_ok());
        for mode in [Mode::Cfb, Mode::Ofb, Mode::Ctr, Mode::Gcm] {
            assert!(ensure_aligned(mode, 17, 16).is_ok());
        }
    }

    #[test]
    fn no_padding_passes_through() {
        let data = vec![1, 2, 3];
        assert_eq!(unpad_output(data.clone(), None, 16).unwrap(), data);
    }
}
