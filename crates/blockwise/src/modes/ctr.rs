//! Counter mode.

use blockwise_padding::Padding;
use cipher::{InnerIvInit, StreamCipher, generic_array::GenericArray};
use ctr::{Ctr128BE, CtrCore};

use super::{keyed_cipher, pad_input, unpad_output};
use crate::{
    backend::{Backend, SystemBackend},
    error::CipherError,
    validate::iv_size_equality,
};

/// CTR over the system backend.
pub const CTR: CtrMode = CtrMode::with_backend(SystemBackend);

/// CTR treats the IV as a big-endian counter block, encrypts it to produce
/// one keystream block and increments it across the whole block width.
///
/// The counter wraps from all-ones to all-zeros. Encryption and decryption
/// are the same operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CtrMode<B = SystemBackend> {
    backend: B,
}

impl<B> CtrMode<B> {
    /// CTR over a custom backend.
    pub const fn with_backend(backend: B) -> Self {
        Self { backend }
    }
}

impl<B: Backend> CtrMode<B> {
    /// Encrypt `plaintext` under the keystream starting at counter `iv`.
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
        apply_keystream::<B>(cipher, iv, &mut buf)?;
        Ok(buf)
    }

    /// Decrypt `ciphertext` under the keystream starting at counter `iv`,
    /// then strip padding.
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
        apply_keystream::<B>(cipher, iv, &mut buf)?;
        unpad_output(buf, padding, block_size)
    }
}

fn apply_keystream<B: Backend>(
    cipher: B::Cipher,
    iv: &[u8],
    data: &mut [u8],
) -> Result<(), CipherError> {
    let len = data.len();
    let core = CtrCore::inner_iv_init(cipher, GenericArray::from_slice(iv));
    Ctr128BE::<B::Cipher>::from_core(core)
        .try_apply_keystream(data)
        .map_err(|_| CipherError::DataTooLarge { len })
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "2b7e151628aed2a6abf7158809cf4f3c";
    const COUNTER: &str = "f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff";
    const PT: &str = "6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51";
    const CT: &str = "874d6191b620e3261bef6864990db6ce9806f66b7970fdff8617187bb9fffdff";

    #[test]
    fn sp800_38a_vectors() {
        let (key, iv, pt) =
            (hex::decode(KEY).unwrap(), hex::decode(COUNTER).unwrap(), hex::decode(PT).unwrap());

        let ct = CTR.encrypt(&pt, &key, &iv, None).unwrap();
        assert_eq!(hex::encode(&ct), CT);
        assert_eq!(CTR.decrypt(&ct, &key, &iv, None).unwrap(), pt);
    }

    #[test]
    fn unaligned_prefix_of_keystream() {
        let (key, iv, pt) =
            (hex::decode(KEY).unwrap(), hex::decode(COUNTER).unwrap(), hex::decode(PT).unwrap());

        let ct = CTR.encrypt(&pt[..5], &key, &iv, None).unwrap();
        assert_eq!(hex::encode(&ct), &CT[..10]);
    }

    #[test]
    fn counter_wraps_from_all_ones_to_zero() {
        let key = [9u8; 16];
        let ct = CTR.encrypt(&[0u8; 32], &key, &[0xffu8; 16], None).unwrap();

        let mut counters = [0xffu8; 32];
        counters[16..].fill(0);
        let keystream = crate::modes::ECB.encrypt(&counters, &key, None).unwrap();
        assert_eq!(ct, keystream);
    }

    #[test]
    fn padded_round_trip() {
        let (key, iv) = ([2u8; 32], [0xf0u8; 16]);
        let ct = CTR.encrypt(b"counter", &key, &iv, Some(Padding::Pkcs7)).unwrap();
        assert_eq!(ct.len(), 16);
        assert_eq!(CTR.decrypt(&ct, &key, &iv, Some(Padding::Pkcs7)).unwrap(), b"counter");
    }
}
