use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::SecretKey;
use sha3::{Digest, Keccak256};

use crate::domain::address::{OperatorAddress, ADDRESS_LEN};
use crate::domain::private_scalar::PrivateScalar;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressDerivationError {
    #[error("scalar is not a valid secp256k1 private key")]
    InvalidScalar,
}

/// 秘密鍵スカラーから Ethereum 形式のアドレスを導出する。
///
/// 非圧縮公開鍵 (0x04 || X || Y) の X || Y を Keccak-256 し、末尾 20 バイトを取る。
pub fn derive_address(
    scalar: &PrivateScalar,
) -> Result<OperatorAddress, AddressDerivationError> {
    let secret_key = SecretKey::from_slice(&scalar.to_fixed_width())
        .map_err(|_| AddressDerivationError::InvalidScalar)?;
    let point = secret_key.public_key().to_encoded_point(false);

    let hash = Keccak256::digest(&point.as_bytes()[1..]);
    let mut bytes = [0u8; ADDRESS_LEN];
    bytes.copy_from_slice(&hash[hash.len() - ADDRESS_LEN..]);
    Ok(OperatorAddress::new(bytes))
}
