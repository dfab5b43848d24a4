//! Galois/Counter Mode over any 128-bit block cipher.
//!
//! A 12-byte nonce goes straight to `aes_gcm::AesGcm`, with the tag length
//! picked from 12..=16 at runtime. `AesGcm` fixes the nonce length at
//! compile time, so every other length is composed by hand from the same
//! parts: `J0` is the `ghash` of the nonce and the keystream is a 32-bit
//! big-endian `ctr` starting at `J0`.
//!
//! # Security
//!
//! - Tags are compared in constant time
//! - `open` authenticates the ciphertext before releasing any plaintext
//! - Hash subkeys, counter blocks and tag masks are zeroized on drop

use aes_gcm::{
    AesGcm, TagSize,
    aead::{
        AeadInPlace,
        consts::{U12, U13, U14, U15, U16},
    },
};
use cipher::{
    BlockCipher, BlockEncrypt, BlockSizeUser, InnerIvInit, StreamCipher,
    generic_array::GenericArray,
};
use ctr::{Ctr32BE, CtrCore};
use ghash::{
    GHash,
    universal_hash::{KeyInit, UniversalHash},
};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::{
    error::CipherError,
    validate::{
        GCM_BLOCK_SIZE, GCM_STD_NONCE_SIZE, valid_gcm_block_size, valid_nonce_size,
        valid_tag_size,
    },
};

/// An authenticated cipher with associated data.
pub trait AeadCipher {
    /// Encrypt `plaintext` and append the authentication tag.
    fn seal(&self, nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, CipherError>;

    /// Verify and decrypt `ciphertext || tag`.
    ///
    /// Fails with [`CipherError::AuthenticationFailed`] without releasing any
    /// plaintext if the tag does not match.
    fn open(&self, nonce: &[u8], sealed: &[u8], aad: &[u8]) -> Result<Vec<u8>, CipherError>;
}

type Block = [u8; GCM_BLOCK_SIZE];

/// GCM with a nonce and tag size fixed at construction.
pub struct Gcm<C> {
    cipher: C,
    nonce_size: usize,
    tag_size: usize,
}

impl<C> Gcm<C>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncrypt + Clone,
{
    /// Wrap `cipher` for GCM.
    ///
    /// Fails if the nonce size is zero or the tag size is outside 12..=16.
    pub fn new(cipher: C, nonce_size: usize, tag_size: usize) -> Result<Self, CipherError> {
        valid_gcm_block_size(C::block_size())?;
        valid_nonce_size(nonce_size)?;
        valid_tag_size(tag_size)?;
        Ok(Self { cipher, nonce_size, tag_size })
    }

    fn check_nonce(&self, nonce: &[u8]) -> Result<(), CipherError> {
        if nonce.len() != self.nonce_size {
            return Err(CipherError::InvalidNonceSize { size: nonce.len() });
        }
        Ok(())
    }

    /// Encrypt `buffer` in place and append a `T`-byte tag.
    fn seal_std<T: TagSize>(
        &self,
        nonce: &[u8],
        aad: &[u8],
        buffer: &mut Vec<u8>,
    ) -> Result<(), CipherError> {
        let aead = AesGcm::<C, U12, T>::from(self.cipher.clone());
        let tag = aead
            .encrypt_in_place_detached(GenericArray::from_slice(nonce), aad, buffer)
            .map_err(|_| CipherError::DataTooLarge { len: buffer.len() })?;
        buffer.extend_from_slice(&tag);
        Ok(())
    }

    /// Verify a `T`-byte tag, then decrypt `buffer` in place.
    fn open_std<T: TagSize>(
        &self,
        nonce: &[u8],
        aad: &[u8],
        buffer: &mut [u8],
        tag: &[u8],
    ) -> Result<(), CipherError> {
        let aead = AesGcm::<C, U12, T>::from(self.cipher.clone());
        aead.decrypt_in_place_detached(
            GenericArray::from_slice(nonce),
            aad,
            buffer,
            GenericArray::from_slice(tag),
        )
        .map_err(|_| CipherError::AuthenticationFailed)
    }

    /// Hash subkey, keystream positioned after `E(K, J0)`, and `E(K, J0)`.
    fn hashed_nonce_parts(
        &self,
        nonce: &[u8],
    ) -> (Zeroizing<Block>, Ctr32BE<C>, Zeroizing<Block>) {
        let mut h = Zeroizing::new([0u8; GCM_BLOCK_SIZE]);
        self.cipher.encrypt_block(GenericArray::from_mut_slice(h.as_mut_slice()));

        let mut ghash = GHash::new(GenericArray::from_slice(h.as_slice()));
        ghash.update_padded(nonce);
        ghash.update(&[length_block(0, nonce.len())]);
        let mut j0 = Zeroizing::new([0u8; GCM_BLOCK_SIZE]);
        j0.copy_from_slice(&ghash.finalize());

        let mut ctr = Ctr32BE::<C>::from_core(CtrCore::inner_iv_init(
            self.cipher.clone(),
            GenericArray::from_slice(j0.as_slice()),
        ));
        let mut mask = Zeroizing::new([0u8; GCM_BLOCK_SIZE]);
        ctr.apply_keystream(mask.as_mut_slice());
        (h, ctr, mask)
    }

    fn seal_hashed(
        &self,
        nonce: &[u8],
        aad: &[u8],
        buffer: &mut Vec<u8>,
    ) -> Result<(), CipherError> {
        let (h, mut ctr, mask) = self.hashed_nonce_parts(nonce);
        ctr.try_apply_keystream(buffer)
            .map_err(|_| CipherError::DataTooLarge { len: buffer.len() })?;
        let tag = hashed_tag(&h, &mask, aad, buffer);
        buffer.extend_from_slice(&tag[..self.tag_size]);
        Ok(())
    }

    fn open_hashed(
        &self,
        nonce: &[u8],
        aad: &[u8],
        buffer: &mut [u8],
        tag: &[u8],
    ) -> Result<(), CipherError> {
        let (h, mut ctr, mask) = self.hashed_nonce_parts(nonce);
        let expected = hashed_tag(&h, &mask, aad, buffer);
        if !bool::from(expected[..self.tag_size].ct_eq(tag)) {
            return Err(CipherError::AuthenticationFailed);
        }
        ctr.try_apply_keystream(buffer)
            .map_err(|_| CipherError::DataTooLarge { len: buffer.len() })
    }
}

impl<C> AeadCipher for Gcm<C>
where
    C: BlockCipher + BlockSizeUser<BlockSize = U16> + BlockEncrypt + Clone,
{
    fn seal(&self, nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.check_nonce(nonce)?;

        let mut out = Vec::with_capacity(plaintext.len() + self.tag_size);
        out.extend_from_slice(plaintext);
        if nonce.len() != GCM_STD_NONCE_SIZE {
            self.seal_hashed(nonce, aad, &mut out)?;
            return Ok(out);
        }
        match self.tag_size {
            12 => self.seal_std::<U12>(nonce, aad, &mut out)?,
            13 => self.seal_std::<U13>(nonce, aad, &mut out)?,
            14 => self.seal_std::<U14>(nonce, aad, &mut out)?,
            15 => self.seal_std::<U15>(nonce, aad, &mut out)?,
            _ => self.seal_std::<U16>(nonce, aad, &mut out)?,
        }
        Ok(out)
    }

    fn open(&self, nonce: &[u8], sealed: &[u8], aad: &[u8]) -> Result<Vec<u8>, CipherError> {
        self.check_nonce(nonce)?;
        if sealed.len() < self.tag_size {
            return Err(CipherError::AuthenticationFailed);
        }
        let (ciphertext, tag) = sealed.split_at(sealed.len() - self.tag_size);

        let mut plaintext = ciphertext.to_vec();
        let opened = if nonce.len() == GCM_STD_NONCE_SIZE {
            match self.tag_size {
                12 => self.open_std::<U12>(nonce, aad, &mut plaintext, tag),
                13 => self.open_std::<U13>(nonce, aad, &mut plaintext, tag),
                14 => self.open_std::<U14>(nonce, aad, &mut plaintext, tag),
                15 => self.open_std::<U15>(nonce, aad, &mut plaintext, tag),
                _ => self.open_std::<U16>(nonce, aad, &mut plaintext, tag),
            }
        } else {
            self.open_hashed(nonce, aad, &mut plaintext, tag)
        };

        // Never hand back a buffer the cipher may have touched
        if let Err(e) = opened {
            plaintext.zeroize();
            return Err(e);
        }
        Ok(plaintext)
    }
}

/// `[len(aad)]_64 || [len(text)]_64` in bits.
fn length_block(aad_len: usize, text_len: usize) -> GenericArray<u8, U16> {
    let mut block = GenericArray::default();
    block[..8].copy_from_slice(&(aad_len as u64 * 8).to_be_bytes());
    block[8..].copy_from_slice(&(text_len as u64 * 8).to_be_bytes());
    block
}

/// Full 16-byte tag: `GHASH(H, aad, ciphertext) ^ E(K, J0)`.
fn hashed_tag(h: &Block, mask: &Block, aad: &[u8], ciphertext: &[u8]) -> Zeroizing<Block> {
    let mut ghash = GHash::new(GenericArray::from_slice(h));
    ghash.update_padded(aad);
    ghash.update_padded(ciphertext);
    ghash.update(&[length_block(aad.len(), ciphertext.len())]);
    let s = ghash.finalize();

    let mut tag = Zeroizing::new([0u8; GCM_BLOCK_SIZE]);
    for ((t, s), m) in tag.iter_mut().zip(s.iter()).zip(mask.iter()) {
        *t = s ^ m;
    }
    tag
}
