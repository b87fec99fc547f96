use crate::application_service::envelope_builder::EnvelopeError;
use crate::domain::encoding::EncodingError;
use crate::infrastructure::address::AddressDerivationError;
use crate::infrastructure::public_key_pem::PublicKeyParseError;
use crate::infrastructure::scalar_parser::ScalarParseError;

/// オペレーター鍵のラップ処理全体のエラー。
///
/// どの段階で失敗しても部分的な出力（アドレスだけ、暗号文だけ）は返さない。
#[derive(Debug, thiserror::Error)]
pub enum OperatorKeyError {
    #[error("input error: {0}")]
    Input(String),
    #[error("encoding error: {0}")]
    Encoding(#[from] EncodingError),
    #[error("key generation error: {0}")]
    KeyGeneration(String),
    #[error("wrap error: {0}")]
    Wrap(String),
    #[error("asymmetric encrypt error: {0}")]
    AsymmetricEncrypt(String),
}

impl From<ScalarParseError> for OperatorKeyError {
    fn from(e: ScalarParseError) -> Self {
        Self::Input(e.to_string())
    }
}

impl From<PublicKeyParseError> for OperatorKeyError {
    fn from(e: PublicKeyParseError) -> Self {
        Self::Input(e.to_string())
    }
}

impl From<AddressDerivationError> for OperatorKeyError {
    fn from(e: AddressDerivationError) -> Self {
        Self::Input(e.to_string())
    }
}

impl From<EnvelopeError> for OperatorKeyError {
    fn from(e: EnvelopeError) -> Self {
        match e {
            EnvelopeError::EmptyInput => Self::Input(e.to_string()),
            EnvelopeError::KeyGeneration(msg) => Self::KeyGeneration(msg),
            EnvelopeError::Wrap(inner) => Self::Wrap(inner.to_string()),
            EnvelopeError::AsymmetricEncrypt(inner) => Self::AsymmetricEncrypt(inner.to_string()),
        }
    }
}
