use pkcs8::der::{pem, Decode};
use pkcs8::SubjectPublicKeyInfoRef;
use rsa::RsaPublicKey;

const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublicKeyParseError {
    #[error("wrapping PEM is required")]
    Empty,
    #[error("failed to decode PEM block: {0}")]
    Pem(String),
    #[error("unexpected PEM label {0:?}, expected \"PUBLIC KEY\"")]
    Label(String),
    #[error("failed to parse SubjectPublicKeyInfo: {0}")]
    Spki(String),
    #[error("not an RSA public key (algorithm {0})")]
    NotRsa(String),
}

/// 1 行で渡された PEM に含まれるリテラルの `\n` を実際の改行に戻す。
///
/// コマンドライン引数や環境変数経由だと改行がエスケープされたまま届くことがある。
pub fn normalize_pem(text: &str) -> String {
    let normalized = if text.contains("\\n") {
        tracing::warn!("wrapping PEM contains escaped newlines, normalizing");
        text.replace("\\r\\n", "\n").replace("\\n", "\n")
    } else {
        text.to_string()
    };
    normalized.trim().to_string()
}

/// PEM エンコードされた SubjectPublicKeyInfo から RSA 公開鍵を取り出す。
pub fn parse_rsa_public_key_pem(text: &str) -> Result<RsaPublicKey, PublicKeyParseError> {
    let pem_text = normalize_pem(text);
    if pem_text.is_empty() {
        return Err(PublicKeyParseError::Empty);
    }

    let (label, der_bytes) =
        pem::decode_vec(pem_text.as_bytes()).map_err(|e| PublicKeyParseError::Pem(e.to_string()))?;
    if label != PUBLIC_KEY_LABEL {
        return Err(PublicKeyParseError::Label(label.to_string()));
    }

    let spki = SubjectPublicKeyInfoRef::from_der(&der_bytes)
        .map_err(|e| PublicKeyParseError::Spki(e.to_string()))?;
    if spki.algorithm.oid != rsa::pkcs1::ALGORITHM_OID {
        return Err(PublicKeyParseError::NotRsa(spki.algorithm.oid.to_string()));
    }

    RsaPublicKey::try_from(spki).map_err(|e| PublicKeyParseError::Spki(e.to_string()))
}
