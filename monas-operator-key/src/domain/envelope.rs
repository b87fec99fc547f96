use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// ラッピング鍵（AES-256）のバイト長。
pub const WRAPPING_KEY_LEN: usize = 32;

/// 1 回の封筒作成でだけ使う使い捨ての対称鍵。
///
/// - 生成直後に使われ、永続化もログ出力もしない。
/// - ドロップ時にゼロクリアされる。
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WrappingKey([u8; WRAPPING_KEY_LEN]);

impl WrappingKey {
    pub fn new(bytes: [u8; WRAPPING_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// 乱数源から 32 バイトを引いて鍵を作る。
    ///
    /// エントロピー取得に失敗した場合は再試行せずにそのままエラーを返す。
    pub fn generate<R: CryptoRngCore>(rng: &mut R) -> Result<Self, rand_core::Error> {
        let mut bytes = [0u8; WRAPPING_KEY_LEN];
        if let Err(e) = rng.try_fill_bytes(&mut bytes) {
            bytes.zeroize();
            return Err(e);
        }
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; WRAPPING_KEY_LEN] {
        &self.0
    }
}

impl std::fmt::Debug for WrappingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("WrappingKey(..)")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeyWrapError {
    #[error("key wrap failed: {0}")]
    Wrap(String),
    #[error("key unwrap failed: {0}")]
    Unwrap(String),
}

/// 対称鍵によるキーラップ（AES-KWP など）のポート。
///
/// 同じ鍵と入力からは同じ出力を返す決定的な変換であること。
pub trait KeyWrap {
    fn wrap(&self, key: &WrappingKey, plaintext: &[u8]) -> Result<Vec<u8>, KeyWrapError>;

    fn unwrap(&self, key: &WrappingKey, wrapped: &[u8]) -> Result<Vec<u8>, KeyWrapError>;
}

#[derive(Debug, thiserror::Error)]
pub enum KeyTransportError {
    #[error("asymmetric encryption failed: {0}")]
    Encrypt(String),
    #[error("asymmetric decryption failed: {0}")]
    Decrypt(String),
}

/// ラッピング鍵を受信者の公開鍵で暗号化するポート（RSA-OAEP など）。
///
/// - 出力長は公開鍵のサイズで固定され、`ciphertext_len` で取得できる。
/// - パディングは乱数化されるため、同じ入力でも呼び出しごとに異なる暗号文になる。
pub trait KeyTransport {
    fn ciphertext_len(&self) -> usize;

    fn encrypt_key<R: CryptoRngCore>(
        &self,
        key: &WrappingKey,
        rng: &mut R,
    ) -> Result<Vec<u8>, KeyTransportError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeFormatError {
    #[error("invalid base64: {0}")]
    Base64(String),
    #[error("envelope is {actual} bytes, shorter than the {transport_len}-byte key segment")]
    TooShort { actual: usize, transport_len: usize },
}

/// 最終的な暗号文封筒。
///
/// レイアウトは `[非対称暗号化されたラッピング鍵] || [ラップされた PKCS#8]`。
/// 区切り位置は埋め込まれておらず、RSA 鍵のモジュラス長（バイト）で決まる。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiphertextEnvelope {
    bytes: Vec<u8>,
    transport_len: usize,
}

impl CiphertextEnvelope {
    pub fn assemble(encrypted_key: Vec<u8>, wrapped_key: &[u8]) -> Self {
        let transport_len = encrypted_key.len();
        let mut bytes = encrypted_key;
        bytes.extend_from_slice(wrapped_key);
        Self {
            bytes,
            transport_len,
        }
    }

    /// base64 テキストから復元する。区切り位置は呼び出し側が知っている前提。
    pub fn from_base64(text: &str, transport_len: usize) -> Result<Self, EnvelopeFormatError> {
        let bytes = BASE64_STANDARD
            .decode(text.trim())
            .map_err(|e| EnvelopeFormatError::Base64(e.to_string()))?;
        if bytes.len() <= transport_len {
            return Err(EnvelopeFormatError::TooShort {
                actual: bytes.len(),
                transport_len,
            });
        }
        Ok(Self {
            bytes,
            transport_len,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// 非対称暗号文セグメントの長さ（= RSA モジュラスのバイト長）。
    pub fn transport_len(&self) -> usize {
        self.transport_len
    }

    /// `(encrypted_key, wrapped_key)` に分割する。
    pub fn split(&self) -> (&[u8], &[u8]) {
        self.bytes.split_at(self.transport_len)
    }

    /// パディングありの標準 base64 に変換する。
    pub fn to_base64(&self) -> String {
        BASE64_STANDARD.encode(&self.bytes)
    }
}
