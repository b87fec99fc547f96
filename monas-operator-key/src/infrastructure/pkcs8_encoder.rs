use pkcs8::der::asn1::AnyRef;
use pkcs8::der::Encode;
use pkcs8::{AlgorithmIdentifierRef, ObjectIdentifier, PrivateKeyInfo};
use sec1::{EcParameters, EcPrivateKey};
use zeroize::Zeroizing;

use crate::domain::encoding::{EncodedPrivateKey, EncodingError, PrivateKeyEncoding};
use crate::domain::private_scalar::PrivateScalar;

/// secp256k1 の名前付き曲線 OID（1.3.132.0.10）。
pub const SECP256K1_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.10");

/// id-ecPublicKey（1.2.840.10045.2.1）。
pub const EC_PUBLIC_KEY_OID: ObjectIdentifier =
    ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// secp256k1 秘密鍵を PKCS#8 `PrivateKeyInfo` の DER にエンコードする。
///
/// 構造は次の 2 段:
///
/// - 内側: SEC1 `ECPrivateKey { version = 1, privateKey = 32 バイト, [0] namedCurve }`
///   （公開鍵フィールドは持たない）
/// - 外側: `PrivateKeyInfo { version = 0, { id-ecPublicKey, secp256k1 }, privateKey = 内側の DER }`
///
/// 内側と外側はそれぞれ独立に DER 化し、値として合成する。
#[derive(Debug, Default, Clone, Copy)]
pub struct Secp256k1Pkcs8Encoder;

impl Secp256k1Pkcs8Encoder {
    fn encode_ec_private_key(
        scalar: &PrivateScalar,
    ) -> Result<Zeroizing<Vec<u8>>, EncodingError> {
        let private_key = Zeroizing::new(scalar.to_fixed_width());
        let ec_private_key = EcPrivateKey {
            private_key: private_key.as_slice(),
            parameters: Some(EcParameters::NamedCurve(SECP256K1_OID)),
            public_key: None,
        };

        ec_private_key
            .to_der()
            .map(Zeroizing::new)
            .map_err(|e| EncodingError::Der(format!("ECPrivateKey: {e}")))
    }

    fn encode_private_key_info(ec_private_key_der: &[u8]) -> Result<Vec<u8>, EncodingError> {
        let algorithm = AlgorithmIdentifierRef {
            oid: EC_PUBLIC_KEY_OID,
            parameters: Some(AnyRef::from(&SECP256K1_OID)),
        };

        PrivateKeyInfo::new(algorithm, ec_private_key_der)
            .to_der()
            .map_err(|e| EncodingError::Der(format!("PrivateKeyInfo: {e}")))
    }
}

impl PrivateKeyEncoding for Secp256k1Pkcs8Encoder {
    fn encode(&self, scalar: &PrivateScalar) -> Result<EncodedPrivateKey, EncodingError> {
        let inner = Self::encode_ec_private_key(scalar)?;
        let outer = Self::encode_private_key_info(&inner)?;
        Ok(EncodedPrivateKey::new(outer))
    }
}
