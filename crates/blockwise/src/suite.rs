//! Declarative cipher configuration.
//!
//! A [`Suite`] names a mode, an optional padding scheme and, for GCM, which
//! size variant to use. It deserializes from any serde format, so callers can
//! keep their cipher choice in a config file:
//!
//! ```json
//! { "mode": "GCM", "padding": null, "gcm": { "variant": "custom_tag", "tag_size": 12 } }
//! ```

use blockwise_padding::Padding;
use serde::{Deserialize, Serialize};

use crate::{
    backend::{Backend, SystemBackend},
    error::CipherError,
    modes::{CbcMode, CfbMode, CtrMode, EcbMode, GcmMode, Mode, OfbMode},
};

/// Which GCM size rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum GcmVariant {
    /// 12-byte nonce, 16-byte tag
    #[default]
    Standard,
    /// Any non-zero nonce length, 16-byte tag
    CustomNonce,
    /// 12-byte nonce, tag of `tag_size` bytes (12..=16)
    CustomTag {
        /// Tag length in bytes
        tag_size: usize,
    },
}

/// A mode, an optional padding scheme and a GCM variant.
///
/// The GCM variant is ignored by every other mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suite {
    /// Cipher mode
    pub mode: Mode,
    /// Padding applied before encryption and stripped after decryption
    #[serde(default)]
    pub padding: Option<Padding>,
    /// GCM size rules
    #[serde(default)]
    pub gcm: GcmVariant,
}

impl Suite {
    /// Suite for `mode` with no padding and the standard GCM variant.
    pub const fn new(mode: Mode) -> Self {
        Self { mode, padding: None, gcm: GcmVariant::Standard }
    }

    /// Set the padding scheme.
    #[must_use]
    pub const fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Set the GCM variant.
    #[must_use]
    pub const fn with_gcm(mut self, gcm: GcmVariant) -> Self {
        self.gcm = gcm;
        self
    }

    /// Encrypt with the system backend.
    ///
    /// `iv_or_nonce` is ignored by ECB. `aad` is ignored by every mode
    /// except GCM.
    pub fn encrypt(
        &self,
        data: &[u8],
        key: &[u8],
        iv_or_nonce: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CipherError> {
        self.encrypt_with(SystemBackend, data, key, iv_or_nonce, aad)
    }

    /// Decrypt with the system backend.
    pub fn decrypt(
        &self,
        data: &[u8],
        key: &[u8],
        iv_or_nonce: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CipherError> {
        self.decrypt_with(SystemBackend, data, key, iv_or_nonce, aad)
    }

    /// Encrypt through a custom backend.
    pub fn encrypt_with<B: Backend>(
        &self,
        backend: B,
        data: &[u8],
        key: &[u8],
        iv_or_nonce: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CipherError> {
        tracing::trace!(
            mode = %self.mode,
            padding = ?self.padding,
            gcm = ?self.gcm,
            len = data.len(),
            "suite encrypt"
        );

        let padding = self.padding;
        match self.mode {
            Mode::Ecb => EcbMode::with_backend(backend).encrypt(data, key, padding),
            Mode::Cbc => CbcMode::with_backend(backend).encrypt(data, key, iv_or_nonce, padding),
            Mode::Cfb => CfbMode::with_backend(backend).encrypt(data, key, iv_or_nonce, padding),
            Mode::Ofb => OfbMode::with_backend(backend).encrypt(data, key, iv_or_nonce, padding),
            Mode::Ctr => CtrMode::with_backend(backend).encrypt(data, key, iv_or_nonce, padding),
            Mode::Gcm => {
                let gcm = GcmMode::with_backend(backend);
                match self.gcm {
                    GcmVariant::Standard => gcm.encrypt(data, key, iv_or_nonce, aad, padding),
                    GcmVariant::CustomNonce => {
                        gcm.encrypt_with_nonce_size(data, key, iv_or_nonce, aad, padding)
                    },
                    GcmVariant::CustomTag { tag_size } => {
                        gcm.encrypt_with_tag_size(data, key, iv_or_nonce, aad, tag_size, padding)
                    },
                }
            },
        }
    }

    /// Decrypt through a custom backend.
    pub fn decrypt_with<B: Backend>(
        &self,
        backend: B,
        data: &[u8],
        key: &[u8],
        iv_or_nonce: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CipherError> {
        tracing::trace!(
            mode = %self.mode,
            padding = ?self.padding,
            gcm = ?self.gcm,
            len = data.len(),
            "suite decrypt"
        );

        let padding = self.padding;
        match self.mode {
            Mode::Ecb => EcbMode::with_backend(backend).decrypt(data, key, padding),
            Mode::Cbc => CbcMode::with_backend(backend).decrypt(data, key, iv_or_nonce, padding),
            Mode::Cfb => CfbMode::with_backend(backend).decrypt(data, key, iv_or_nonce, padding),
            Mode::Ofb => OfbMode::with_backend(backend).decrypt(data, key, iv_or_nonce, padding),
            Mode::Ctr => CtrMode::with_backend(backend).decrypt(data, key, iv_or_nonce, padding),
            Mode::Gcm => {
                let gcm = GcmMode::with_backend(backend);
                match self.gcm {
                    GcmVariant::Standard => gcm.decrypt(data, key, iv_or_nonce, aad, padding),
                    GcmVariant::CustomNonce => {
                        gcm.decrypt_with_nonce_size(data, key, iv_or_nonce, aad, padding)
                    },
                    GcmVariant::CustomTag { tag_size } => {
                        gcm.decrypt_with_tag_size(data, key, iv_or_nonce, aad, tag_size, padding)
                    },
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_from_json() {
        let suite: Suite = serde_json::from_str(
            r#"{ "mode": "GCM", "gcm": { "variant": "custom_tag", "tag_size": 12 } }"#,
        )
        .unwrap();
        assert_eq!(suite, Suite::new(Mode::Gcm).with_gcm(GcmVariant::CustomTag { tag_size: 12 }));

        let suite: Suite =
            serde_json::from_str(r#"{ "mode": "CBC", "padding": "PKCS7Padding" }"#).unwrap();
        assert_eq!(suite, Suite::new(Mode::Cbc).with_padding(Padding::Pkcs7));
    }

    #[test]
    fn unknown_names_rejected() {
        assert!(serde_json::from_str::<Suite>(r#"{ "mode": "XTS" }"#).is_err());
        assert!(
            serde_json::from_str::<Suite>(r#"{ "mode": "CBC", "padding": "PKCS1" }"#).is_err()
        );
    }

    #[test]
    fn every_mode_round_trips() {
        let key = [0x42u8; 32];
        for mode in Mode::ALL {
            let suite = Suite::new(mode).with_padding(Padding::Iso10126);
            let iv: &[u8] = if mode == Mode::Gcm { &[7u8; 12] } else { &[7u8; 16] };

            let ct = suite.encrypt(b"suite payload", &key, iv, b"aad").unwrap();
            assert_eq!(suite.decrypt(&ct, &key, iv, b"aad").unwrap(), b"suite payload", "{mode}");
        }
    }

    #[test]
    fn ecb_ignores_iv() {
        let suite = Suite::new(Mode::Ecb).with_padding(Padding::Pkcs7);
        let key = [1u8; 16];
        let a = suite.encrypt(b"same", &key, &[], &[]).unwrap();
        let b = suite.encrypt(b"same", &key, &[9u8; 16], &[]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn gcm_variant_selects_sizes() {
        let key = [3u8; 16];
        let nonce = [4u8; 12];

        let suite = Suite::new(Mode::Gcm).with_gcm(GcmVariant::CustomTag { tag_size: 13 });
        let ct = suite.encrypt(b"tagged", &key, &nonce, &[]).unwrap();
        assert_eq!(ct.len(), 6 + 13);

        let suite = Suite::new(Mode::Gcm).with_gcm(GcmVariant::CustomNonce);
        assert!(suite.encrypt(b"nonce", &key, &[4u8; 7], &[]).is_ok());

        assert_eq!(
            Suite::new(Mode::Gcm).encrypt(b"nonce", &key, &[4u8; 7], &[]),
            Err(CipherError::InvalidNonceSize { size: 7 })
        );
    }
}
