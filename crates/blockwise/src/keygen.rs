//! Random key, IV and nonce generation.

use blockwise_padding::EntropySource;
use zeroize::Zeroizing;

use crate::{
    error::CipherError,
    validate::{valid_iv_size, valid_key_size, valid_nonce_size},
};

/// `len` bytes from `entropy`.
pub fn random_bytes<R: EntropySource + ?Sized>(
    len: usize,
    entropy: &R,
) -> Result<Vec<u8>, CipherError> {
    let mut buf = vec![0u8; len];
    entropy.fill_random(&mut buf)?;
    Ok(buf)
}

/// Fresh key of `size` bytes (16, 24 or 32), wiped on drop.
pub fn generate_key<R: EntropySource + ?Sized>(
    size: usize,
    entropy: &R,
) -> Result<Zeroizing<Vec<u8>>, CipherError> {
    valid_key_size(size)?;
    random_bytes(size, entropy).map(Zeroizing::new)
}

/// Fresh IV of one block (16, 24 or 32 bytes).
pub fn generate_iv<R: EntropySource + ?Sized>(
    block_size: usize,
    entropy: &R,
) -> Result<Vec<u8>, CipherError> {
    valid_iv_size(block_size)?;
    random_bytes(block_size, entropy)
}

/// Fresh GCM nonce of any non-zero length.
///
/// Random 12-byte nonces are safe for about 2^32 messages under one key.
pub fn generate_nonce<R: EntropySource + ?Sized>(
    size: usize,
    entropy: &R,
) -> Result<Vec<u8>, CipherError> {
    valid_nonce_size(size)?;
    random_bytes(size, entropy)
}
