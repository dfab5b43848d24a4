//! Cipher feedback mode with full-block segments (CFB128 for AES).

use blockwise_padding::Padding;
use cfb_mode::{BufDecryptor, BufEncryptor};
use cipher::{InnerIvInit, generic_array::GenericArray};

use super::{keyed_cipher, pad_input, unpad_output};
use crate::{
    backend::{Backend, SystemBackend},
    error::CipherError,
    validate::iv_size_equality,
};

/// CFB over the system backend.
pub const CFB: CfbMode = CfbMode::with_backend(SystemBackend);

/// CFB encrypts the previous ciphertext block (the IV for the first) and
/// XORs the result into the next plaintext block.
///
/// Input of any length is accepted. The final segment may be short.
#[derive(Debug, Clone, Copy, Default)]
pub struct CfbMode<B = SystemBackend> {
    backend: B,
}

impl<B> CfbMode<B> {
    /// CFB over a custom backend.
    pub const fn with_backend(backend: B) -> Self {
        Self { backend }
    }
}

impl<B: Backend> CfbMode<B> {
    /// Encrypt `plaintext` with feedback from `iv`.
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
        BufEncryptor::<B::Cipher>::inner_iv_init(cipher, GenericArray::from_slice(iv))
            .encrypt(&mut buf);
        Ok(buf)
    }

    /// Decrypt `ciphertext` with feedback from `iv`, then strip padding.
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
        BufDecryptor::<B::Cipher>::inner_iv_init(cipher, GenericArray::from_slice(iv))
            .decrypt(&mut buf);
        unpad_output(buf, padding, block_size)
    }
}
