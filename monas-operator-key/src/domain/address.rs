use sha3::{Digest, Keccak256};

pub const ADDRESS_LEN: usize = 20;

/// オペレーター鍵の公開識別子（Ethereum 形式のアドレス）。
///
/// 暗号文封筒とは暗号学的な関係を持たず、表示用途のみ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperatorAddress([u8; ADDRESS_LEN]);

impl OperatorAddress {
    pub fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// EIP-55 のチェックサム付き表記（`0x` + 40 桁）。
    pub fn to_checksum_string(&self) -> String {
        let lower = hex::encode(self.0);
        let hash = Keccak256::digest(lower.as_bytes());

        let mut out = String::with_capacity(2 + lower.len());
        out.push_str("0x");
        for (i, c) in lower.chars().enumerate() {
            let nibble = if i % 2 == 0 {
                hash[i / 2] >> 4
            } else {
                hash[i / 2] & 0x0f
            };
            if c.is_ascii_alphabetic() && nibble >= 8 {
                out.push(c.to_ascii_uppercase());
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl std::fmt::Display for OperatorAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_checksum_string())
    }
}
