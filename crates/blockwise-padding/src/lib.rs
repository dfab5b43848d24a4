//! Blockwise Padding Schemes
//!
//! Interchangeable algorithms that turn arbitrary-length data into a whole
//! number of cipher blocks and back. Every scheme is stateless and pure; the
//! only external resource is an [`EntropySource`], consulted by ISO/IEC 10126
//! for its random filler.
//!
//! # Overhead
//!
//! Every scheme appends `block_size - (len % block_size)` bytes, which is
//! always between 1 and `block_size`. Block-aligned input therefore grows by
//! a full block. Without that, an aligned message could not be told apart
//! from a padded one.
//!
//! ```text
//! data:  41 41 41                      (3 bytes, block size 8)
//!
//! Zero       41 41 41 00 00 00 00 00
//! Bit        41 41 41 80 00 00 00 00
//! PKCS7      41 41 41 05 05 05 05 05
//! X9.23      41 41 41 00 00 00 00 05
//! ISO 7816-4 41 41 41 80 00 00 00 00
//! ISO 10126  41 41 41 ?? ?? ?? ?? 05
//! ```
//!
//! # Verification strength
//!
//! - PKCS7, X9.23, Bit and ISO 7816-4 check every padding byte on unpad and
//!   reject a corrupted trailer
//! - ISO 10126 checks only the count byte; its random filler is not
//!   integrity-checked
//! - Zero padding checks nothing and strips any trailing zero bytes of the
//!   original data along with the padding
//!
//! The weak schemes exist for compatibility. Their behavior is kept as-is.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod bit;
pub mod entropy;
pub mod error;
pub mod iso10126;
pub mod iso7816;
pub mod pkcs7;
pub mod scheme;
pub mod x923;
pub mod zero;

pub use bit::Bit;
pub use entropy::{EntropySource, SystemEntropy};
pub use error::{EntropyError, PaddingError};
pub use iso7816::Iso7816;
pub use iso10126::Iso10126;
pub use pkcs7::{Pkcs5, Pkcs7};
pub use scheme::{MAX_BLOCK_SIZE, Padding, PaddingScheme, UnknownPadding, overhead_size};
pub use x923::X923;
pub use zero::Zero;
