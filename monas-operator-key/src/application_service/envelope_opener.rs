use crate::domain::encoding::EncodedPrivateKey;
use crate::domain::envelope::{
    CiphertextEnvelope, EnvelopeFormatError, KeyTransportError, KeyWrap, KeyWrapError,
};
use crate::infrastructure::rsa_oaep::RsaOaepKeyReceiver;

#[derive(Debug, thiserror::Error)]
pub enum EnvelopeOpenError {
    #[error(transparent)]
    Format(#[from] EnvelopeFormatError),
    #[error(transparent)]
    Transport(#[from] KeyTransportError),
    #[error(transparent)]
    Unwrap(#[from] KeyWrapError),
    #[error("envelope key segment is {envelope} bytes, but the private key modulus is {key} bytes")]
    KeySizeMismatch { envelope: usize, key: usize },
}

/// 暗号文封筒を RSA 秘密鍵で開き、PKCS#8 バイト列を取り出す。
///
/// 通常は KMS 側が行う処理で、ここでは生成物の検証用に持っている。
/// 区切り位置は秘密鍵のモジュラス長から決まる。
pub struct EnvelopeOpener<W> {
    key_wrap: W,
    receiver: RsaOaepKeyReceiver,
}

impl<W> EnvelopeOpener<W>
where
    W: KeyWrap,
{
    pub fn new(key_wrap: W, receiver: RsaOaepKeyReceiver) -> Self {
        Self { key_wrap, receiver }
    }

    pub fn open_base64(&self, text: &str) -> Result<EncodedPrivateKey, EnvelopeOpenError> {
        let envelope = CiphertextEnvelope::from_base64(text, self.receiver.ciphertext_len())?;
        self.open(&envelope)
    }

    pub fn open(
        &self,
        envelope: &CiphertextEnvelope,
    ) -> Result<EncodedPrivateKey, EnvelopeOpenError> {
        if envelope.transport_len() != self.receiver.ciphertext_len() {
            return Err(EnvelopeOpenError::KeySizeMismatch {
                envelope: envelope.transport_len(),
                key: self.receiver.ciphertext_len(),
            });
        }

        let (encrypted_key, wrapped_key) = envelope.split();
        let wrapping_key = self.receiver.decrypt_key(encrypted_key)?;
        let plaintext = self.key_wrap.unwrap(&wrapping_key, wrapped_key)?;
        Ok(EncodedPrivateKey::new(plaintext))
    }
}
