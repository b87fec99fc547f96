use zeroize::Zeroizing;

use crate::domain::private_scalar::{PrivateScalar, SCALAR_LEN};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScalarParseError {
    #[error("operator private key is required")]
    Empty,
    #[error("invalid hex: {0}")]
    InvalidHex(String),
    #[error("invalid length {0} bytes, need {SCALAR_LEN}")]
    InvalidLength(usize),
    #[error("private key is zero or not below the secp256k1 order")]
    OutOfRange,
}

/// 人間が入力した hex 文字列を secp256k1 の秘密鍵スカラーとして検証する。
///
/// - 前後の空白と `0x` / `0X` 接頭辞は取り除く。
/// - ちょうど 32 バイトであること、0 < d < n であることを確認する。
pub fn parse_private_scalar(text: &str) -> Result<PrivateScalar, ScalarParseError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.is_empty() {
        return Err(ScalarParseError::Empty);
    }

    let bytes = Zeroizing::new(
        hex::decode(digits).map_err(|e| ScalarParseError::InvalidHex(e.to_string()))?,
    );
    if bytes.len() != SCALAR_LEN {
        return Err(ScalarParseError::InvalidLength(bytes.len()));
    }

    // 曲線上の有効なスカラーかどうかは k256 に判定させる
    k256::SecretKey::from_slice(&bytes).map_err(|_| ScalarParseError::OutOfRange)?;

    PrivateScalar::from_be_bytes(&bytes).map_err(|_| ScalarParseError::OutOfRange)
}
