use monas_operator_key::application_service::envelope_builder::EnvelopeBuilder;
use monas_operator_key::application_service::envelope_opener::{
    EnvelopeOpenError, EnvelopeOpener,
};
use monas_operator_key::application_service::operator_key_service::{
    DefaultOperatorKeyService, WrapOperatorKeyCommand,
};
use monas_operator_key::domain::encoding::PrivateKeyEncoding;
use monas_operator_key::domain::envelope::CiphertextEnvelope;
use monas_operator_key::domain::private_scalar::PrivateScalar;
use monas_operator_key::infrastructure::aes_kwp::AesKwpKeyWrap;
use monas_operator_key::infrastructure::pkcs8_encoder::Secp256k1Pkcs8Encoder;
use monas_operator_key::infrastructure::rsa_oaep::{RsaOaepKeyReceiver, RsaOaepKeyTransport};
use monas_operator_key::OperatorKeyError;
use rand_core::{CryptoRng, OsRng, RngCore};
use rsa::pkcs8::DecodePrivateKey;
use rsa::RsaPrivateKey;

const RSA_2048_PRIVATE_PEM: &str = include_str!("fixtures/rsa2048_private.pem");
const RSA_2048_PUBLIC_PEM: &str = include_str!("fixtures/rsa2048_public.pem");
const RSA_512_PUBLIC_PEM: &str = include_str!("fixtures/rsa512_public.pem");

/// encode(1): PKCS#8 (secp256k1) wrapping a SEC1 key with a 31-zero-byte padded scalar.
const ENCODED_ONE_HEX: &str = concat!(
    "3047020100301006072a8648ce3d020106052b8104000a0430302e0201010420",
    "0000000000000000000000000000000000000000000000000000000000000001",
    "a00706052b8104000a",
);

/// Envelope for scalar 1 under the 2048-bit fixture key, with the wrapping key
/// taken from bytes 0x00..0x1f and the OAEP seed from bytes 0x20..0x3f.
const GOLDEN_CIPHERTEXT: &str = concat!(
    "XKc4rJOxmNB4VBrbDwqCXL+XeWzMzEuXs30/6bQZogvdvXGMeS5B8H9roQ72NohmxiPdQ159Z4re",
    "UGMtlyRR7o1vek2NWvnDWqNQlyNmHiukaLOwFxIHRpQWHjkt6NHfhfnL6BcHJ4VhHx7sO/VBE68Z",
    "8x2J6NlZbON+uL+fYgXbLgtSg2WkkP4CU06SgSF3MhXVCopg5rPnoMmNbycanhuivsP7rKdCCgob",
    "p4hrq8UkoWL8xkQKmI2lZRBU1XF1KAZdtvxwiaBhM4piOjojo2h0JNLs80u9tleVP+bSRE6UPA/7",
    "Ji3jHb8xM/OFB7PXOEY/CU3erxH2zTjO0X89HbMPA5VNvg+aHz3cPDN1j4bpd6hJEGhwRVqFgAOF",
    "e7+xEKUS6Xs/Fv3QYTJP5UcJnNc6LW7dDI4k3i+kWVGDibBdUV6xfuRuficn7G8GZBuXJVZGH2XN",
    "JBA=",
);

/// Wrapped PKCS#8 segment of the golden envelope (AES-KWP under key 0x00..0x1f).
const GOLDEN_WRAPPED_HEX: &str = concat!(
    "b30f03954dbe0f9a1f3ddc3c33758f86e977a849106870455a858003857bbfb1",
    "10a512e97b3f16fdd061324fe547099cd73a2d6edd0c8e24de2fa459518389b0",
    "5d515eb17ee46e7e2727ec6f06641b972556461f65cd2410",
);

/// Deterministic byte source: 0, 1, 2, ...
struct CountingRng(u8);

impl RngCore for CountingRng {
    fn next_u32(&mut self) -> u32 {
        rand_core::impls::next_u32_via_fill(self)
    }

    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_fill(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for b in dest.iter_mut() {
            *b = self.0;
            self.0 = self.0.wrapping_add(1);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl CryptoRng for CountingRng {}

fn key_one() -> String {
    format!("0x{}01", "00".repeat(31))
}

fn command(private_key: &str, pem: &str) -> WrapOperatorKeyCommand {
    WrapOperatorKeyCommand {
        operator_private_key: private_key.to_string(),
        wrapping_pem: pem.to_string(),
        expected_rsa_bits: None,
    }
}

fn opener() -> EnvelopeOpener<AesKwpKeyWrap> {
    let private_key = RsaPrivateKey::from_pkcs8_pem(RSA_2048_PRIVATE_PEM).unwrap();
    EnvelopeOpener::new(AesKwpKeyWrap, RsaOaepKeyReceiver::new(private_key))
}

fn encode_hex(scalar_hex: &str) -> Vec<u8> {
    let scalar = PrivateScalar::from_be_bytes(&hex::decode(scalar_hex).unwrap()).unwrap();
    Secp256k1Pkcs8Encoder
        .encode(&scalar)
        .unwrap()
        .as_bytes()
        .to_vec()
}

#[test]
fn golden_output_for_scalar_one() {
    let service = DefaultOperatorKeyService::default();
    let result = service
        .wrap_operator_key(
            &command(&key_one(), RSA_2048_PUBLIC_PEM),
            &mut CountingRng(0),
        )
        .unwrap();

    assert_eq!(
        result.operator_address.to_string(),
        "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
    );
    assert_eq!(result.ciphertext, GOLDEN_CIPHERTEXT);

    let envelope = CiphertextEnvelope::from_base64(&result.ciphertext, 256).unwrap();
    let (_, wrapped) = envelope.split();
    assert_eq!(hex::encode(wrapped), GOLDEN_WRAPPED_HEX);
}

#[test]
fn golden_envelope_opens_to_encoded_one() {
    let plaintext = opener().open_base64(GOLDEN_CIPHERTEXT).unwrap();

    assert_eq!(hex::encode(plaintext.as_bytes()), ENCODED_ONE_HEX);
}

#[test]
fn roundtrip_reproduces_encoding() {
    let scalar_hex = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
    let service = DefaultOperatorKeyService::default();
    let result = service
        .wrap_operator_key(&command(scalar_hex, RSA_2048_PUBLIC_PEM), &mut OsRng)
        .unwrap();

    assert_eq!(
        result.operator_address.to_string(),
        "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23"
    );

    let plaintext = opener().open_base64(&result.ciphertext).unwrap();
    assert_eq!(plaintext.as_bytes(), encode_hex(scalar_hex).as_slice());
}

#[test]
fn repeated_builds_differ_but_open_identically() {
    let service = DefaultOperatorKeyService::default();
    let cmd = command(&key_one(), RSA_2048_PUBLIC_PEM);

    let first = service.wrap_operator_key(&cmd, &mut OsRng).unwrap();
    let second = service.wrap_operator_key(&cmd, &mut OsRng).unwrap();

    assert_ne!(first.ciphertext, second.ciphertext);
    assert_eq!(first.operator_address, second.operator_address);

    let opener = opener();
    let a = opener.open_base64(&first.ciphertext).unwrap();
    let b = opener.open_base64(&second.ciphertext).unwrap();
    assert_eq!(a.as_bytes(), b.as_bytes());
    assert_eq!(hex::encode(a.as_bytes()), ENCODED_ONE_HEX);
}

#[test]
fn builder_and_opener_agree_on_split_point() {
    let private_key = RsaPrivateKey::from_pkcs8_pem(RSA_2048_PRIVATE_PEM).unwrap();
    let transport = RsaOaepKeyTransport::new(private_key.to_public_key());
    let encoded = Secp256k1Pkcs8Encoder
        .encode(&PrivateScalar::from_be_bytes(&[0x2a]).unwrap())
        .unwrap();

    let envelope = EnvelopeBuilder::new(AesKwpKeyWrap)
        .build(&encoded, &transport, &mut OsRng)
        .unwrap();

    assert_eq!(envelope.transport_len(), 256);
    assert_eq!(envelope.as_bytes().len(), 256 + 88);

    let plaintext = opener().open(&envelope).unwrap();
    assert_eq!(plaintext.as_bytes(), encoded.as_bytes());
}

#[test]
fn tampered_wrapped_segment_fails_to_open() {
    let envelope = CiphertextEnvelope::from_base64(GOLDEN_CIPHERTEXT, 256).unwrap();
    let mut bytes = envelope.as_bytes().to_vec();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;

    let (encrypted_key, wrapped) = bytes.split_at(256);
    let tampered = CiphertextEnvelope::assemble(encrypted_key.to_vec(), wrapped);

    assert!(matches!(
        opener().open(&tampered),
        Err(EnvelopeOpenError::Unwrap(_))
    ));
}

#[test]
fn truncated_envelope_is_rejected() {
    let result = opener().open_base64("AAAA");

    assert!(matches!(result, Err(EnvelopeOpenError::Format(_))));
}

#[test]
fn small_rsa_key_fails_without_output() {
    let service = DefaultOperatorKeyService::default();
    let result = service.wrap_operator_key(&command(&key_one(), RSA_512_PUBLIC_PEM), &mut OsRng);

    assert!(matches!(result, Err(OperatorKeyError::AsymmetricEncrypt(_))));
}

#[test]
fn pem_with_escaped_newlines_is_accepted() {
    let escaped = RSA_2048_PUBLIC_PEM.trim_end().replace('\n', "\\n");
    let service = DefaultOperatorKeyService::default();
    let result = service
        .wrap_operator_key(&command(&key_one(), &escaped), &mut OsRng)
        .unwrap();

    let plaintext = opener().open_base64(&result.ciphertext).unwrap();
    assert_eq!(hex::encode(plaintext.as_bytes()), ENCODED_ONE_HEX);
}
