//! Fuzz target for PaddingScheme::unpad
//!
//! Feeds arbitrary trailers to every scheme at every block size.
//!
//! # Invariants
//!
//! - unpad NEVER panics, whatever the trailer says
//! - A successful unpad returns a prefix of the input
//! - Only Zero padding may return the whole input unchanged
//! - Misaligned input is always rejected

#![no_main]

use arbitrary::Arbitrary;
use blockwise_padding::{Padding, PaddingError, PaddingScheme};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct UnpadInput {
    scheme: u8,
    block_size: u8,
    data: Vec<u8>,
}

fuzz_target!(|input: UnpadInput| {
    let padding = Padding::ALL[input.scheme as usize % Padding::ALL.len()];
    let block_size = input.block_size as usize;

    match padding.unpad(&input.data, block_size) {
        Ok(out) => {
            // INVARIANT 1: output is a prefix
            assert_eq!(out, &input.data[..out.len()], "unpad must return a prefix");

            // INVARIANT 2: verifying schemes always strip something
            if padding != Padding::Zero {
                assert!(out.len() < input.data.len(), "{padding} returned the whole input");
            }
        },
        Err(PaddingError::InvalidData { len }) => {
            assert_eq!(len, input.data.len());
        },
        Err(_) => {
            // Empty data or zero block size
        },
    }

    // INVARIANT 3: misaligned input never unpads
    if block_size != 0 && !input.data.is_empty() && input.data.len() % block_size != 0 {
        assert!(padding.unpad(&input.data, block_size).is_err());
    }
});
