//! Capabilities the modes are built on.
//!
//! Modes never name a concrete cipher or RNG. They go through a [`Backend`],
//! which constructs a block cipher from a key and supplies entropy for
//! padding schemes that need it. The cipher is anything implementing the
//! RustCrypto `cipher` traits over 128-bit blocks, so the `cbc`, `cfb-mode`,
//! `ofb`, `ctr` and `aes-gcm` crates can drive it directly. [`SystemBackend`]
//! wires in AES and the OS RNG; tests substitute their own entropy to stay
//! deterministic.

use aes::{Aes128, Aes192, Aes256};
use blockwise_padding::{EntropyError, EntropySource, SystemEntropy};
use cipher::{
    BlockCipher, BlockClosure, BlockDecrypt, BlockEncrypt, BlockSizeUser, KeyInit, consts::U16,
};

use crate::{error::CipherError, validate::valid_key_size};

/// Source of block ciphers and randomness for the modes.
pub trait Backend: EntropySource {
    /// Keyed 128-bit block cipher produced by [`Backend::new_cipher`].
    type Cipher: BlockCipher
        + BlockSizeUser<BlockSize = U16>
        + BlockEncrypt
        + BlockDecrypt
        + Clone;

    /// Build a cipher from raw key bytes.
    ///
    /// Fails with [`CipherError::InvalidKeySize`] if the key is rejected.
    fn new_cipher(&self, key: &[u8]) -> Result<Self::Cipher, CipherError>;
}

/// AES with a 128, 192 or 256-bit key, chosen by key length.
///
/// The block is 16 bytes for every key size.
#[derive(Clone)]
pub enum Aes {
    /// AES-128
    Aes128(Aes128),
    /// AES-192
    Aes192(Aes192),
    /// AES-256
    Aes256(Aes256),
}

impl Aes {
    /// Expand `key` into an AES key schedule.
    pub fn new(key: &[u8]) -> Result<Self, CipherError> {
        valid_key_size(key.len())?;
        let invalid = |_| CipherError::InvalidKeySize { size: key.len() };
        Ok(match key.len() {
            16 => Self::Aes128(Aes128::new_from_slice(key).map_err(invalid)?),
            24 => Self::Aes192(Aes192::new_from_slice(key).map_err(invalid)?),
            _ => Self::Aes256(Aes256::new_from_slice(key).map_err(invalid)?),
        })
    }

    /// Key length in bytes.
    pub fn key_size(&self) -> usize {
        match self {
            Self::Aes128(_) => 16,
            Self::Aes192(_) => 24,
            Self::Aes256(_) => 32,
        }
    }
}

impl std::fmt::Debug for Aes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print round keys
        write!(f, "Aes{}", self.key_size() * 8)
    }
}

impl BlockSizeUser for Aes {
    type BlockSize = U16;
}

impl BlockCipher for Aes {}

impl BlockEncrypt for Aes {
    fn encrypt_with_backend(&self, f: impl BlockClosure<BlockSize = U16>) {
        match self {
            Self::Aes128(c) => c.encrypt_with_backend(f),
            Self::Aes192(c) => c.encrypt_with_backend(f),
            Self::Aes256(c) => c.encrypt_with_backend(f),
        }
    }
}

impl BlockDecrypt for Aes {
    fn decrypt_with_backend(&self, f: impl BlockClosure<BlockSize = U16>) {
        match self {
            Self::Aes128(c) => c.decrypt_with_backend(f),
            Self::Aes192(c) => c.decrypt_with_backend(f),
            Self::Aes256(c) => c.decrypt_with_backend(f),
        }
    }
}

/// Production backend: AES from the `aes` crate and OS entropy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SystemBackend;

impl EntropySource for SystemBackend {
    fn fill_random(&self, buffer: &mut [u8]) -> Result<(), EntropyError> {
        SystemEntropy.fill_random(buffer)
    }
}

impl Backend for SystemBackend {
    type Cipher = Aes;

    fn new_cipher(&self, key: &[u8]) -> Result<Aes, CipherError> {
        Aes::new(key)
    }
}

#[cfg(test)]
mod tests {
    use cipher::generic_array::GenericArray;

    use super::*;

    fn block(s: &str) -> GenericArray<u8, U16> {
        GenericArray::clone_from_slice(&hex::decode(s).unwrap())
    }

    #[test]
    fn fips197_aes128_vector() {
        let cipher = Aes::new(&hex::decode("000102030405060708090a0b0c0d0e0f").unwrap()).unwrap();
        let mut data = block("00112233445566778899aabbccddeeff");

        cipher.encrypt_block(&mut data);
        assert_eq!(hex::encode(data), "69c4e0d86a7b0430d8cdb78070b4c55a");

        cipher.decrypt_block(&mut data);
        assert_eq!(hex::encode(data), "00112233445566778899aabbccddeeff");
    }

    #[test]
    fn fips197_aes256_vector() {
        let key = hex::decode("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f")
            .unwrap();
        let cipher = Aes::new(&key).unwrap();
        let mut data = block("00112233445566778899aabbccddeeff");

        cipher.encrypt_block(&mut data);
        assert_eq!(hex::encode(data), "8ea2b7ca516745bfeafc49904b496089");
    }

    #[test]
    fn key_size_selects_variant() {
        assert_eq!(Aes::new(&[0u8; 16]).unwrap().key_size(), 16);
        assert_eq!(Aes::new(&[0u8; 24]).unwrap().key_size(), 24);
        assert_eq!(Aes::new(&[0u8; 32]).unwrap().key_size(), 32);
        assert_eq!(Aes::block_size(), 16);
    }

    #[test]
    fn bad_key_rejected() {
        assert_eq!(Aes::new(&[0u8; 20]).unwrap_err(), CipherError::InvalidKeySize { size: 20 });
        assert_eq!(
            SystemBackend.new_cipher(&[]).unwrap_err(),
            CipherError::InvalidKeySize { size: 0 }
        );
    }

    #[test]
    fn debug_hides_key_schedule() {
        let cipher = Aes::new(&[7u8; 32]).unwrap();
        assert_eq!(format!("{cipher:?}"), "Aes256");
    }
}
