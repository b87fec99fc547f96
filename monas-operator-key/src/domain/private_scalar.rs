use zeroize::{Zeroize, ZeroizeOnDrop};

/// secp256k1 スカラーの固定バイト長。
pub const SCALAR_LEN: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PrivateScalarError {
    #[error("private scalar must not be empty")]
    Empty,
    #[error("private scalar is {0} bytes, longer than {SCALAR_LEN}")]
    TooLong(usize),
}

/// 楕円曲線の秘密鍵スカラー（256 bit 符号なし整数）。
///
/// - 内部には先頭のゼロを取り除いた big-endian の自然表現を保持する。
/// - 曲線の位数未満であるか、非ゼロであるかの検証は呼び出し側（`scalar_parser`）の責務で、
///   ここでは「32 バイトに収まる整数」であることのみを保証する。
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct PrivateScalar {
    magnitude: Vec<u8>,
}

impl PrivateScalar {
    /// big-endian のバイト列から生成する。先頭のゼロバイトは自然表現から除かれる。
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self, PrivateScalarError> {
        if bytes.is_empty() {
            return Err(PrivateScalarError::Empty);
        }

        let first_non_zero = bytes
            .iter()
            .position(|b| *b != 0)
            .unwrap_or(bytes.len());
        let magnitude = &bytes[first_non_zero..];
        if magnitude.len() > SCALAR_LEN {
            return Err(PrivateScalarError::TooLong(magnitude.len()));
        }

        Ok(Self {
            magnitude: magnitude.to_vec(),
        })
    }

    /// 先頭ゼロを含まない big-endian 表現。値がゼロの場合は空になる。
    pub fn natural_be_bytes(&self) -> &[u8] {
        &self.magnitude
    }

    /// 左側をゼロで埋めた 32 バイト固定長の表現を返す。
    ///
    /// 右側へのパディングや切り詰めは行わない。
    pub fn to_fixed_width(&self) -> [u8; SCALAR_LEN] {
        let mut out = [0u8; SCALAR_LEN];
        let offset = SCALAR_LEN - self.magnitude.len();
        out[offset..].copy_from_slice(&self.magnitude);
        out
    }
}

impl std::fmt::Debug for PrivateScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateScalar").finish_non_exhaustive()
    }
}
