//! Output feedback mode.

use blockwise_padding::Padding;
use cipher::{InnerIvInit, StreamCipher, generic_array::GenericArray};
use ofb::{Ofb, OfbCore};

use super::{keyed_cipher, pad_input, unpad_output};
use crate::{
    backend::{Backend, SystemBackend},
    error::CipherError,
    validate::iv_size_equality,
};

/// OFB over the system backend.
pub const OFB: OfbMode = OfbMode::with_backend(SystemBackend);

/// OFB repeatedly encrypts the IV and XORs the resulting keystream into the
/// data. Encryption and decryption are the same operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfbMode<B = SystemBackend> {
    backend: B,
}

impl<B> OfbMode<B> {
    /// OFB over a custom backend.
    pub const fn with_backend(backend: B) -> Self {
        Self { backend }
    }
}

impl<B: Backend> OfbMode<B> {
    /// Encrypt `plaintext` under the keystream seeded by `iv`.
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        key: &[u8],
        iv: &[u8],
        padding: Option<Padding>,
    ) -> Result<Vec<u8>, CipherError> {
        let (cipher, block_size) = keyed_cipher(&self.backend, plaintext.len(), key)?;
        iv_size_equality(iv.len(), block_size)?;

        let mut buf = pad_input(&self.backend, plaintext, padding, block_size)?;
        keystream::<B>(cipher, iv).apply_keystream(&mut buf);
        Ok(buf)
    }

    /// Decrypt `ciphertext` under the keystream seeded by `iv`, then strip
    /// padding.
    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        iv: &[u8],
        padding: Option<Padding>,
    ) -> Result<Vec<u8>, CipherError> {
        let (cipher, block_size) = keyed_cipher(&self.backend, ciphertext.len(), key)?;
        iv_size_equality(iv.len(), block_size)?;

        let mut buf = ciphertext.to_vec();
        keystream::<B>(cipher, iv).apply_keystream(&mut buf);
        unpad_output(buf, padding, block_size)
    }
}

fn keystream<B: Backend>(cipher: B::Cipher, iv: &[u8]) -> Ofb<B::Cipher> {
    Ofb::from_core(OfbCore::inner_iv_init(cipher, GenericArray::from_slice(iv)))
}
