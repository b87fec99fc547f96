use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::domain::private_scalar::PrivateScalar;

#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    /// DER シリアライザが構造を受け付けなかった場合。
    #[error("der encoding failed: {0}")]
    Der(String),
}

/// 暗号化対象となる PKCS#8 `PrivateKeyInfo` の DER バイト列。
///
/// 中身は秘密鍵そのものなので、ドロップ時にゼロクリアする。
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct EncodedPrivateKey(Vec<u8>);

impl EncodedPrivateKey {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for EncodedPrivateKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Debug for EncodedPrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncodedPrivateKey")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

/// 秘密鍵スカラーを鍵交換用の標準構造へエンコードするポート。
///
/// - 実装は純粋関数であること（I/O・乱数・時刻に依存しない）。
/// - 同じスカラーからは常に同じバイト列を返す。
pub trait PrivateKeyEncoding {
    fn encode(&self, scalar: &PrivateScalar) -> Result<EncodedPrivateKey, EncodingError>;
}
