//! Galois/counter mode.

use blockwise_padding::Padding;
use cipher::BlockSizeUser;

use super::{pad_input, unpad_output};
use crate::{
    aead::{AeadCipher, Gcm},
    backend::{Backend, SystemBackend},
    error::CipherError,
    validate::{
        GCM_TAG_SIZE, ensure_not_empty, valid_data_size, valid_gcm_block_size, valid_key_size,
        valid_nonce_size, valid_std_nonce_size, valid_tag_size,
    },
};

/// GCM over the system backend.
pub const GCM: GcmMode = GcmMode::with_backend(SystemBackend);

/// GCM authenticated encryption. Output is `ciphertext || tag`.
///
/// Three call variants differ only in which sizes they accept:
///
/// | Variant | Nonce | Tag |
/// |---|---|---|
/// | `encrypt` / `decrypt` | 12 | 16 |
/// | `*_with_nonce_size` | any non-zero | 16 |
/// | `*_with_tag_size` | 12 | 12..=16 |
///
/// Decryption verifies the tag before any plaintext is produced.
#[derive(Debug, Clone, Copy, Default)]
pub struct GcmMode<B = SystemBackend> {
    backend: B,
}

impl<B> GcmMode<B> {
    /// GCM over a custom backend.
    pub const fn with_backend(backend: B) -> Self {
        Self { backend }
    }
}

impl<B: Backend> GcmMode<B> {
    /// Seal with a 12-byte nonce and a 16-byte tag.
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        key: &[u8],
        nonce: &[u8],
        aad: &[u8],
        padding: Option<Padding>,
    ) -> Result<Vec<u8>, CipherError> {
        self.seal(plaintext, key, nonce, aad, GCM_TAG_SIZE, valid_std_nonce_size, padding)
    }

    /// Open with a 12-byte nonce and a 16-byte tag.
    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        nonce: &[u8],
        aad: &[u8],
        padding: Option<Padding>,
    ) -> Result<Vec<u8>, CipherError> {
        self.open(ciphertext, key, nonce, aad, GCM_TAG_SIZE, valid_std_nonce_size, padding)
    }

    /// Seal with a nonce of any non-zero length and a 16-byte tag.
    pub fn encrypt_with_nonce_size(
        &self,
        plaintext: &[u8],
        key: &[u8],
        nonce: &[u8],
        aad: &[u8],
        padding: Option<Padding>,
    ) -> Result<Vec<u8>, CipherError> {
        self.seal(plaintext, key, nonce, aad, GCM_TAG_SIZE, valid_nonce_size, padding)
    }

    /// Open with a nonce of any non-zero length and a 16-byte tag.
    pub fn decrypt_with_nonce_size(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        nonce: &[u8],
        aad: &[u8],
        padding: Option<Padding>,
    ) -> Result<Vec<u8>, CipherError> {
        self.open(ciphertext, key, nonce, aad, GCM_TAG_SIZE, valid_nonce_size, padding)
    }

    /// Seal with a 12-byte nonce and a tag truncated to `tag_size` bytes.
    pub fn encrypt_with_tag_size(
        &self,
        plaintext: &[u8],
        key: &[u8],
        nonce: &[u8],
        aad: &[u8],
        tag_size: usize,
        padding: Option<Padding>,
    ) -> Result<Vec<u8>, CipherError> {
        self.seal(plaintext, key, nonce, aad, tag_size, valid_std_nonce_size, padding)
    }

    /// Open with a 12-byte nonce and a tag of `tag_size` bytes.
    pub fn decrypt_with_tag_size(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        nonce: &[u8],
        aad: &[u8],
        tag_size: usize,
        padding: Option<Padding>,
    ) -> Result<Vec<u8>, CipherError> {
        self.open(ciphertext, key, nonce, aad, tag_size, valid_std_nonce_size, padding)
    }

    /// Validate, key the cipher and wrap it for GCM.
    fn prepare(
        &self,
        data_len: usize,
        key: &[u8],
        nonce: &[u8],
        tag_size: usize,
        nonce_rule: fn(usize) -> Result<(), CipherError>,
    ) -> Result<(B::Cipher, usize), CipherError> {
        ensure_not_empty(data_len)?;
        valid_key_size(key.len())?;
        nonce_rule(nonce.len())?;
        valid_tag_size(tag_size)?;

        let cipher = self.backend.new_cipher(key)?;
        let block_size = <B::Cipher as BlockSizeUser>::block_size();
        valid_gcm_block_size(block_size)?;
        valid_data_size(data_len, block_size)?;
        Ok((cipher, block_size))
    }

    #[allow(clippy::too_many_arguments)]
    fn seal(
        &self,
        plaintext: &[u8],
        key: &[u8],
        nonce: &[u8],
        aad: &[u8],
        tag_size: usize,
        nonce_rule: fn(usize) -> Result<(), CipherError>,
        padding: Option<Padding>,
    ) -> Result<Vec<u8>, CipherError> {
        let (cipher, block_size) = self.prepare(plaintext.len(), key, nonce, tag_size, nonce_rule)?;
        let padded = pad_input(&self.backend, plaintext, padding, block_size)?;
        Gcm::new(cipher, nonce.len(), tag_size)?.seal(nonce, &padded, aad)
    }

    #[allow(clippy::too_many_arguments)]
    fn open(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        nonce: &[u8],
        aad: &[u8],
        tag_size: usize,
        nonce_rule: fn(usize) -> Result<(), CipherError>,
        padding: Option<Padding>,
    ) -> Result<Vec<u8>, CipherError> {
        let (cipher, block_size) = self.prepare(ciphertext.len(), key, nonce, tag_size, nonce_rule)?;
        let plaintext = Gcm::new(cipher, nonce.len(), tag_size)?.open(nonce, ciphertext, aad)?;
        unpad_output(plaintext, padding, block_size)
    }
}
