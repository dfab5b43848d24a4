//! Blockwise
//!
//! A validating front-end over a raw block cipher. It checks every size
//! precondition before a cipher is keyed, dispatches to one of six modes and
//! applies an interchangeable padding scheme around the cipher transform.
//!
//! # Architecture
//!
//! ```text
//! caller ─► mode adapter ─► validate ─► pad ─► mode core ──► output
//!                  │                              ▲
//!                  └────────── Backend ───────────┘
//! ```
//!
//! - [`validate`]: pure size checks, run in a fixed order
//! - [`backend`]: the [`Backend`] capability, keying any 128-bit block
//!   cipher from the [`cipher`] traits, with AES and OS entropy as the default
//! - [`modes`]: ECB, CBC, CFB, OFB, CTR and GCM adapters
//! - [`aead`]: [`Gcm`] over `aes-gcm`, with a GHASH-derived counter for
//!   non-standard nonce lengths
//! - [`suite`]: serde-configurable mode/padding selection
//! - [`keygen`]: random keys, IVs and nonces
//!
//! Padding schemes live in `blockwise-padding` and are re-exported here.
//!
//! # Example
//!
//! ```
//! use blockwise::{CBC, Padding};
//!
//! let key = [0x2b; 16];
//! let iv = [0x00; 16];
//! let ct = CBC.encrypt(b"hello", &key, &iv, Some(Padding::Pkcs7))?;
//! assert_eq!(ct.len(), 16);
//! assert_eq!(CBC.decrypt(&ct, &key, &iv, Some(Padding::Pkcs7))?, b"hello");
//! # Ok::<(), blockwise::CipherError>(())
//! ```
//!
//! # Errors
//!
//! Every failure is a [`CipherError`]. Padding failures are flattened into
//! the same enum. Only [`CipherError::Entropy`] is worth retrying.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod aead;
pub mod backend;
pub mod error;
pub mod keygen;
pub mod modes;
pub mod suite;
pub mod validate;

pub use aead::{AeadCipher, Gcm};
pub use backend::{Aes, Backend, SystemBackend};
pub use cipher;
pub use blockwise_padding::{
    EntropyError, EntropySource, Padding, PaddingError, PaddingScheme, SystemEntropy,
};
pub use error::CipherError;
pub use keygen::{generate_iv, generate_key, generate_nonce, random_bytes};
pub use modes::{
    CBC, CFB, CTR, CbcMode, CfbMode, CtrMode, ECB, EcbMode, GCM, GcmMode, Mode, OFB, OfbMode,
    UnknownMode,
};
pub use suite::{GcmVariant, Suite};
