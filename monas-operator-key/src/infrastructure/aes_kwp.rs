use aes_kw::KekAes256;

use crate::domain::envelope::{KeyWrap, KeyWrapError, WrappingKey};

/// AES-256 Key Wrap with Padding（RFC 5649 / NIST SP 800-38F KWP）による実装。
#[derive(Debug, Default, Clone, Copy)]
pub struct AesKwpKeyWrap;

impl KeyWrap for AesKwpKeyWrap {
    fn wrap(&self, key: &WrappingKey, plaintext: &[u8]) -> Result<Vec<u8>, KeyWrapError> {
        if plaintext.is_empty() {
            return Err(KeyWrapError::Wrap("plaintext must not be empty".into()));
        }
        let kek = KekAes256::from(*key.as_bytes());
        kek.wrap_with_padding_vec(plaintext)
            .map_err(|e| KeyWrapError::Wrap(e.to_string()))
    }

    fn unwrap(&self, key: &WrappingKey, wrapped: &[u8]) -> Result<Vec<u8>, KeyWrapError> {
        let kek = KekAes256::from(*key.as_bytes());
        kek.unwrap_with_padding_vec(wrapped)
            .map_err(|e| KeyWrapError::Unwrap(e.to_string()))
    }
}
