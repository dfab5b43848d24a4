//! Size and precondition checks.
//!
//! Pure predicates over lengths. Every mode runs them in the same order
//! (empty data, key size, nonce/tag size, cipher construction, IV against
//! block size, data size or alignment), so the first violated precondition
//! is the one reported no matter how many others also fail.

use crate::error::CipherError;

/// Block size GCM operates on, regardless of key size.
pub const GCM_BLOCK_SIZE: usize = 16;

/// Nonce length of the standard GCM variant.
pub const GCM_STD_NONCE_SIZE: usize = 12;

/// Smallest tag GCM will produce or accept.
pub const GCM_MIN_TAG_SIZE: usize = 12;

/// Full-length GCM tag.
pub const GCM_TAG_SIZE: usize = 16;

/// Maximum number of blocks GCM can encrypt under one nonce (2^32 - 2).
pub const GCM_MAX_BLOCKS: u64 = (1 << 32) - 2;

/// Sizes permitted for keys, blocks and IVs.
const AES_SIZES: [usize; 3] = [16, 24, 32];

/// Fail with [`CipherError::EmptyData`] on zero-length input.
pub fn ensure_not_empty(len: usize) -> Result<(), CipherError> {
    if len == 0 {
        return Err(CipherError::EmptyData);
    }
    Ok(())
}

/// Key must be 16, 24 or 32 bytes.
pub fn valid_key_size(size: usize) -> Result<(), CipherError> {
    if AES_SIZES.contains(&size) { Ok(()) } else { Err(CipherError::InvalidKeySize { size }) }
}

/// Block must be 16, 24 or 32 bytes.
pub fn valid_block_size(size: usize) -> Result<(), CipherError> {
    if AES_SIZES.contains(&size) { Ok(()) } else { Err(CipherError::InvalidBlockSize { size }) }
}

/// IV must be 16, 24 or 32 bytes.
pub fn valid_iv_size(size: usize) -> Result<(), CipherError> {
    if AES_SIZES.contains(&size) { Ok(()) } else { Err(CipherError::InvalidIvSize { size }) }
}

/// The IV of a chaining or stream mode must be exactly one block.
///
/// The block size is validated first; any IV that does not match a valid
/// block size is reported as [`CipherError::IvSizeMismatch`].
pub fn iv_size_equality(iv_len: usize, block_size: usize) -> Result<(), CipherError> {
    valid_block_size(block_size)?;
    if iv_len != block_size {
        return Err(CipherError::IvSizeMismatch { iv: iv_len, block: block_size });
    }
    Ok(())
}

/// Ciphertext for a block mode must be a whole number of blocks.
pub fn valid_ciphertext(len: usize, block_size: usize) -> Result<(), CipherError> {
    if block_size == 0 || len % block_size != 0 {
        return Err(CipherError::InvalidCiphertext { len });
    }
    Ok(())
}

/// GCM only runs over a 16-byte block cipher.
pub fn valid_gcm_block_size(size: usize) -> Result<(), CipherError> {
    if size != GCM_BLOCK_SIZE {
        return Err(CipherError::InvalidBlockSize { size });
    }
    Ok(())
}

/// Standard GCM nonce: exactly 12 bytes.
pub fn valid_std_nonce_size(size: usize) -> Result<(), CipherError> {
    if size != GCM_STD_NONCE_SIZE {
        return Err(CipherError::InvalidNonceSize { size });
    }
    Ok(())
}

/// Custom GCM nonce: any non-zero length. An empty nonce would compromise
/// the key immediately.
pub fn valid_nonce_size(size: usize) -> Result<(), CipherError> {
    if size == 0 {
        return Err(CipherError::InvalidNonceSize { size });
    }
    Ok(())
}

/// GCM tag between 12 and 16 bytes inclusive.
pub fn valid_tag_size(size: usize) -> Result<(), CipherError> {
    if !(GCM_MIN_TAG_SIZE..=GCM_TAG_SIZE).contains(&size) {
        return Err(CipherError::InvalidTagSize { size });
    }
    Ok(())
}

/// GCM input may not exceed `(2^32 - 2) * block_size` bytes.
pub fn valid_data_size(len: usize, block_size: usize) -> Result<(), CipherError> {
    let limit = GCM_MAX_BLOCKS.saturating_mul(block_size as u64);
    if len as u64 > limit {
        return Err(CipherError::DataTooLarge { len });
    }
    Ok(())
}
