use rand_core::CryptoRngCore;

use crate::domain::encoding::EncodedPrivateKey;
use crate::domain::envelope::{
    CiphertextEnvelope, KeyTransport, KeyTransportError, KeyWrap, KeyWrapError, WrappingKey,
};

#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("encoded key must not be empty")]
    EmptyInput,
    #[error("failed to generate wrapping key: {0}")]
    KeyGeneration(String),
    #[error(transparent)]
    Wrap(KeyWrapError),
    #[error(transparent)]
    AsymmetricEncrypt(KeyTransportError),
}

/// PKCS#8 バイト列をハイブリッド暗号化し、暗号文封筒を組み立てる。
///
/// 手順:
/// 1. 乱数源から 32 バイトのラッピング鍵を生成する
/// 2. ラッピング鍵で PKCS#8 を AES-KWP でラップする
/// 3. ラッピング鍵を受信者の RSA 公開鍵で OAEP 暗号化する（同じ乱数源を使う）
/// 4. `[暗号化された鍵] || [ラップされた PKCS#8]` の順に連結する
/// 5. 標準 base64（パディングあり）でテキスト化する（`build_base64`）
///
/// `build` は 4 までを行い、区切り位置を保持した `CiphertextEnvelope` を返す。
///
/// 途中で失敗した場合は何も返さない。ラッピング鍵はこの呼び出しの中だけで使われ、破棄される。
pub struct EnvelopeBuilder<W> {
    key_wrap: W,
}

impl<W> EnvelopeBuilder<W>
where
    W: KeyWrap,
{
    pub fn new(key_wrap: W) -> Self {
        Self { key_wrap }
    }

    pub fn build<T, R>(
        &self,
        encoded_key: &EncodedPrivateKey,
        transport: &T,
        rng: &mut R,
    ) -> Result<CiphertextEnvelope, EnvelopeError>
    where
        T: KeyTransport,
        R: CryptoRngCore,
    {
        if encoded_key.is_empty() {
            return Err(EnvelopeError::EmptyInput);
        }

        let wrapping_key = WrappingKey::generate(rng)
            .map_err(|e| EnvelopeError::KeyGeneration(e.to_string()))?;

        let wrapped_key = self
            .key_wrap
            .wrap(&wrapping_key, encoded_key.as_bytes())
            .map_err(EnvelopeError::Wrap)?;

        let encrypted_key = transport
            .encrypt_key(&wrapping_key, rng)
            .map_err(EnvelopeError::AsymmetricEncrypt)?;
        drop(wrapping_key);

        tracing::debug!(
            encrypted_key_len = encrypted_key.len(),
            wrapped_key_len = wrapped_key.len(),
            "assembled ciphertext envelope"
        );

        Ok(CiphertextEnvelope::assemble(encrypted_key, &wrapped_key))
    }

    /// `build` の結果を base64 テキストにして返す。
    pub fn build_base64<T, R>(
        &self,
        encoded_key: &EncodedPrivateKey,
        transport: &T,
        rng: &mut R,
    ) -> Result<String, EnvelopeError>
    where
        T: KeyTransport,
        R: CryptoRngCore,
    {
        self.build(encoded_key, transport, rng)
            .map(|envelope| envelope.to_base64())
    }
}
