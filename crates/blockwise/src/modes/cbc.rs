//! Cipher block chaining mode.

use blockwise_padding::Padding;
use cipher::{BlockDecryptMut, BlockEncryptMut, InnerIvInit, generic_array::GenericArray};

use super::{Mode, ensure_aligned, keyed_cipher, pad_input, unpad_output};
use crate::{
    backend::{Backend, SystemBackend},
    error::CipherError,
    validate::{iv_size_equality, valid_ciphertext},
};

/// CBC over the system backend.
pub const CBC: CbcMode = CbcMode::with_backend(SystemBackend);

/// CBC XORs each plaintext block with the previous ciphertext block (the IV
/// for the first) before encrypting it.
///
/// The IV must be exactly one block. Without padding the input must already
/// be block-aligned.
#[derive(Debug, Clone, Copy, Default)]
pub struct CbcMode<B = SystemBackend> {
    backend: B,
}

impl<B> CbcMode<B> {
    /// CBC over a custom backend.
    pub const fn with_backend(backend: B) -> Self {
        Self { backend }
    }
}

impl<B: Backend> CbcMode<B> {
    /// Encrypt `plaintext` with chaining from `iv`.
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
        ensure_aligned(Mode::Cbc, buf.len(), block_size)?;

        let mut chain =
            cbc::Encryptor::<B::Cipher>::inner_iv_init(cipher, GenericArray::from_slice(iv));
        for block in buf.chunks_exact_mut(block_size) {
            chain.encrypt_block_mut(GenericArray::from_mut_slice(block));
        }
        Ok(buf)
    }

    /// Decrypt `ciphertext` with chaining from `iv`, then strip padding.
    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        iv: &[u8],
        padding: Option<Padding>,
    ) -> Result<Vec<u8>, CipherError> {
        let (cipher, block_size) = keyed_cipher(&self.backend, ciphertext.len(), key)?;
        iv_size_equality(iv.len(), block_size)?;
        valid_ciphertext(ciphertext.len(), block_size)?;

        let mut buf = ciphertext.to_vec();
        let mut chain =
            cbc::Decryptor::<B::Cipher>::inner_iv_init(cipher, GenericArray::from_slice(iv));
        for block in buf.chunks_exact_mut(block_size) {
            chain.decrypt_block_mut(GenericArray::from_mut_slice(block));
        }
        unpad_output(buf, padding, block_size)
    }
}
