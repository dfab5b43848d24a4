//! Electronic codebook mode.

use blockwise_padding::Padding;
use cipher::{BlockDecrypt, BlockEncrypt, generic_array::GenericArray};

use super::{Mode, ensure_aligned, keyed_cipher, pad_input, unpad_output};
use crate::{
    backend::{Backend, SystemBackend},
    error::CipherError,
    validate::valid_ciphertext,
};

/// ECB over the system backend.
pub const ECB: EcbMode = EcbMode::with_backend(SystemBackend);

/// ECB encrypts every block independently and takes no IV.
///
/// Identical plaintext blocks produce identical ciphertext blocks. Without
/// padding the input must already be block-aligned.
#[derive(Debug, Clone, Copy, Default)]
pub struct EcbMode<B = SystemBackend> {
    backend: B,
}

impl<B> EcbMode<B> {
    /// ECB over a custom backend.
    pub const fn with_backend(backend: B) -> Self {
        Self { backend }
    }
}

impl<B: Backend> EcbMode<B> {
    /// Encrypt `plaintext` block by block.
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        key: &[u8],
        padding: Option<Padding>,
    ) -> Result<Vec<u8>, CipherError> {
        let (cipher, block_size) = keyed_cipher(&self.backend, plaintext.len(), key)?;

        let mut buf = pad_input(&self.backend, plaintext, padding, block_size)?;
        ensure_aligned(Mode::Ecb, buf.len(), block_size)?;
        for block in buf.chunks_exact_mut(block_size) {
            cipher.encrypt_block(GenericArray::from_mut_slice(block));
        }
        Ok(buf)
    }

    /// Decrypt `ciphertext` block by block, then strip padding.
    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        key: &[u8],
        padding: Option<Padding>,
    ) -> Result<Vec<u8>, CipherError> {
        let (cipher, block_size) = keyed_cipher(&self.backend, ciphertext.len(), key)?;
        valid_ciphertext(ciphertext.len(), block_size)?;

        let mut buf = ciphertext.to_vec();
        for block in buf.chunks_exact_mut(block_size) {
            cipher.decrypt_block(GenericArray::from_mut_slice(block));
        }
        unpad_output(buf, padding, block_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";

    #[test]
    fn sp800_38a_first_block() {
        let key = hex::decode(KEY).unwrap();
        let pt = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();

        let ct = ECB.encrypt(&pt, &key, None).unwrap();
        assert_eq!(hex::encode(&ct), "3ad77bb40d7a3660a89ecaf32466ef97");
        assert_eq!(ECB.decrypt(&ct, &key, None).unwrap(), pt);
    }

    #[test]
    fn unpadded_misaligned_input_rejected() {
        let key = [0u8; 16];
        assert_eq!(ECB.encrypt(&[0u8; 17], &key, None), Err(CipherError::InvalidData { len: 17 }));
    }

    #[test]
    fn misaligned_ciphertext_rejected() {
        let key = [0u8; 16];
        assert_eq!(
            ECB.decrypt(&[0u8; 20], &key, None),
            Err(CipherError::InvalidCiphertext { len: 20 })
        );
    }

    #[test]
    fn padded_round_trip() {
        let key = [7u8; 24];
        let ct = ECB.encrypt(b"seventeen bytes!!", &key, Some(Padding::Pkcs7)).unwrap();
        assert_eq!(ct.len(), 32);
        assert_eq!(ECB.decrypt(&ct, &key, Some(Padding::Pkcs7)).unwrap(), b"seventeen bytes!!");
    }

    #[test]
    fn identical_blocks_leak() {
        let key = [1u8; 32];
        let ct = ECB.encrypt(&[0x55u8; 32], &key, None).unwrap();
        assert_eq!(ct[..16], ct[16..]);
    }

    #[test]
    fn checks_run_in_order() {
        // Empty data wins over a bad key
        assert_eq!(ECB.encrypt(&[], &[0u8; 5], None), Err(CipherError::EmptyData));
        assert_eq!(ECB.encrypt(&[1], &[0u8; 5], None), Err(CipherError::InvalidKeySize { size: 5 }));
    }
}
