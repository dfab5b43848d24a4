//! Fuzz target for mode round-trips and GCM forgery resistance
//!
//! # Strategy
//!
//! - Arbitrary mode, padding and key size
//! - Arbitrary plaintext, IV and additional data
//! - A single flipped bit in the GCM output
//!
//! # Invariants
//!
//! - Encrypt and decrypt never panic on any input
//! - decrypt(encrypt(pt)) == pt whenever encrypt succeeds (Zero padding
//!   modulo trailing zeros)
//! - A tampered GCM message never decrypts

#![no_main]

use arbitrary::Arbitrary;
use blockwise::{CipherError, GcmVariant, Mode, Padding, Suite};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum KeySize {
    Aes128([u8; 16]),
    Aes192([u8; 24]),
    Aes256([u8; 32]),
    Other(Vec<u8>),
}

impl KeySize {
    fn as_bytes(&self) -> &[u8] {
        match self {
            KeySize::Aes128(k) => k,
            KeySize::Aes192(k) => k,
            KeySize::Aes256(k) => k,
            KeySize::Other(k) => k,
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Scenario {
    mode: u8,
    padding: Option<u8>,
    tag_size: u8,
    key: KeySize,
    iv: Vec<u8>,
    aad: Vec<u8>,
    plaintext: Vec<u8>,
    flip: u16,
}

fuzz_target!(|s: Scenario| {
    let mode = Mode::ALL[s.mode as usize % Mode::ALL.len()];
    let padding = s.padding.map(|p| Padding::ALL[p as usize % Padding::ALL.len()]);
    let gcm = match s.tag_size % 3 {
        0 => GcmVariant::Standard,
        1 => GcmVariant::CustomNonce,
        _ => GcmVariant::CustomTag { tag_size: usize::from(s.tag_size % 20) },
    };
    let suite = Suite { mode, padding, gcm };
    let key = s.key.as_bytes();

    // INVARIANT 1: encrypt never panics
    let Ok(ct) = suite.encrypt(&s.plaintext, key, &s.iv, &s.aad) else {
        return;
    };

    // INVARIANT 2: round-trip
    let pt = suite.decrypt(&ct, key, &s.iv, &s.aad).expect("own ciphertext must decrypt");
    if padding == Some(Padding::Zero) {
        let end = s.plaintext.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        assert_eq!(pt, &s.plaintext[..end]);
    } else {
        assert_eq!(pt, s.plaintext);
    }

    // INVARIANT 3: GCM rejects any single-bit change
    if mode == Mode::Gcm {
        let mut tampered = ct.clone();
        let bit = s.flip as usize % (tampered.len() * 8);
        tampered[bit / 8] ^= 1 << (bit % 8);
        assert_eq!(
            suite.decrypt(&tampered, key, &s.iv, &s.aad),
            Err(CipherError::AuthenticationFailed)
        );
    }
});
