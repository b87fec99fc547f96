use rand_core::CryptoRngCore;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::domain::envelope::{KeyTransport, KeyTransportError, WrappingKey, WRAPPING_KEY_LEN};

/// OAEP(SHA-256, MGF1-SHA-256, ラベルなし) で 32 バイト鍵を運ぶのに必要な最小モジュラス長。
pub const MIN_MODULUS_LEN: usize = WRAPPING_KEY_LEN + 2 * 32 + 2;

fn oaep() -> Oaep {
    Oaep::new::<Sha256>()
}

/// ラッピング鍵を RSA-OAEP-SHA256 で受信者の公開鍵に向けて暗号化する。
#[derive(Debug, Clone)]
pub struct RsaOaepKeyTransport {
    public_key: RsaPublicKey,
}

impl RsaOaepKeyTransport {
    pub fn new(public_key: RsaPublicKey) -> Self {
        Self { public_key }
    }

    pub fn modulus_bits(&self) -> usize {
        self.public_key.n().bits()
    }
}

impl KeyTransport for RsaOaepKeyTransport {
    fn ciphertext_len(&self) -> usize {
        self.public_key.size()
    }

    fn encrypt_key<R: CryptoRngCore>(
        &self,
        key: &WrappingKey,
        rng: &mut R,
    ) -> Result<Vec<u8>, KeyTransportError> {
        self.public_key
            .encrypt(rng, oaep(), key.as_bytes())
            .map_err(|e| {
                KeyTransportError::Encrypt(format!(
                    "{e} (modulus {} bytes, at least {MIN_MODULUS_LEN} required)",
                    self.public_key.size()
                ))
            })
    }
}

/// 封筒を開く側。RSA 秘密鍵でラッピング鍵を復号する。
#[derive(Debug, Clone)]
pub struct RsaOaepKeyReceiver {
    private_key: RsaPrivateKey,
}

impl RsaOaepKeyReceiver {
    pub fn new(private_key: RsaPrivateKey) -> Self {
        Self { private_key }
    }

    /// 封筒先頭の非対称暗号文セグメント長。
    pub fn ciphertext_len(&self) -> usize {
        self.private_key.size()
    }

    pub fn decrypt_key(&self, encrypted_key: &[u8]) -> Result<WrappingKey, KeyTransportError> {
        let plain = Zeroizing::new(
            self.private_key
                .decrypt(oaep(), encrypted_key)
                .map_err(|e| KeyTransportError::Decrypt(e.to_string()))?,
        );

        let bytes: [u8; WRAPPING_KEY_LEN] = plain.as_slice().try_into().map_err(|_| {
            KeyTransportError::Decrypt(format!(
                "wrapping key is {} bytes, expected {WRAPPING_KEY_LEN}",
                plain.len()
            ))
        })?;
        Ok(WrappingKey::new(bytes))
    }
}
