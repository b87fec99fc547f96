use rand_core::CryptoRngCore;

use crate::application_service::envelope_builder::EnvelopeBuilder;
use crate::domain::address::OperatorAddress;
use crate::domain::encoding::PrivateKeyEncoding;
use crate::domain::envelope::{KeyTransport, KeyWrap};
use crate::error::OperatorKeyError;
use crate::infrastructure::address::derive_address;
use crate::infrastructure::aes_kwp::AesKwpKeyWrap;
use crate::infrastructure::pkcs8_encoder::Secp256k1Pkcs8Encoder;
use crate::infrastructure::public_key_pem::parse_rsa_public_key_pem;
use crate::infrastructure::rsa_oaep::RsaOaepKeyTransport;
use crate::infrastructure::scalar_parser::parse_private_scalar;

#[derive(Clone, Default)]
pub struct WrapOperatorKeyCommand {
    /// secp256k1 秘密鍵の hex 文字列。
    pub operator_private_key: String,
    /// RSA 公開鍵（SubjectPublicKeyInfo）の PEM。
    pub wrapping_pem: String,
    /// 受け取り側が想定している RSA モジュラスのビット長。指定時は一致しなければエラー。
    pub expected_rsa_bits: Option<usize>,
}

impl std::fmt::Debug for WrapOperatorKeyCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrapOperatorKeyCommand")
            .field("operator_private_key", &"<redacted>")
            .field("wrapping_pem_len", &self.wrapping_pem.len())
            .field("expected_rsa_bits", &self.expected_rsa_bits)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapOperatorKeyResult {
    pub operator_address: OperatorAddress,
    /// base64 化された暗号文封筒。
    pub ciphertext: String,
    /// 封筒先頭の RSA 暗号文セグメントの長さ（バイト）。
    pub encrypted_key_len: usize,
    pub rsa_modulus_bits: usize,
}

/// オペレーター鍵を KMS 取り込み用の暗号文に変換するユースケース。
pub struct OperatorKeyService<E, W> {
    pub encoder: E,
    pub envelope_builder: EnvelopeBuilder<W>,
}

/// PKCS#8 エンコーダと AES-KWP を組み合わせた標準構成。
pub type DefaultOperatorKeyService = OperatorKeyService<Secp256k1Pkcs8Encoder, AesKwpKeyWrap>;

impl Default for DefaultOperatorKeyService {
    fn default() -> Self {
        Self {
            encoder: Secp256k1Pkcs8Encoder,
            envelope_builder: EnvelopeBuilder::new(AesKwpKeyWrap),
        }
    }
}

impl<E, W> OperatorKeyService<E, W>
where
    E: PrivateKeyEncoding,
    W: KeyWrap,
{
    /// 入力の検証をすべて済ませてから乱数を消費する。
    pub fn wrap_operator_key<R: CryptoRngCore>(
        &self,
        cmd: &WrapOperatorKeyCommand,
        rng: &mut R,
    ) -> Result<WrapOperatorKeyResult, OperatorKeyError> {
        let scalar = parse_private_scalar(&cmd.operator_private_key)?;
        let public_key = parse_rsa_public_key_pem(&cmd.wrapping_pem)?;
        let transport = RsaOaepKeyTransport::new(public_key);

        let rsa_modulus_bits = transport.modulus_bits();
        if let Some(expected) = cmd.expected_rsa_bits {
            if expected != rsa_modulus_bits {
                return Err(OperatorKeyError::Input(format!(
                    "wrapping key is {rsa_modulus_bits}-bit RSA, expected {expected}-bit"
                )));
            }
        }

        let operator_address = derive_address(&scalar)?;
        let encoded_key = self.encoder.encode(&scalar)?;
        drop(scalar);

        let ciphertext = self
            .envelope_builder
            .build_base64(&encoded_key, &transport, rng)?;

        tracing::info!(
            operator_address = %operator_address,
            rsa_modulus_bits,
            ciphertext_len = ciphertext.len(),
            encrypted_key_len = transport.ciphertext_len(),
            "wrapped operator private key"
        );

        Ok(WrapOperatorKeyResult {
            operator_address,
            ciphertext,
            encrypted_key_len: transport.ciphertext_len(),
            rsa_modulus_bits,
        })
    }
}
