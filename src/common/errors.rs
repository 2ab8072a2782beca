use crate::asymmetric::errors::AsymmetricError;
use crate::asymmetric::systems::traditional::ecdh::EcdhSystemError;
use crate::asymmetric::systems::traditional::ecdsa::EcdsaSystemError;
use crate::asymmetric::systems::traditional::rsa::RsaSystemError;
use crate::symmetric::errors::SymmetricError;
use crate::symmetric::systems::aes_cbc::AesCbcSystemError;
use crate::symmetric::systems::aes_gcm::AesGcmSystemError;
use thiserror::Error;

/// 加密操作可能遇到的错误类型
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error (JSON): {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 decoding failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid data format: {0}")]
    Format(String),

    #[error("Asymmetric cryptographic error: {0}")]
    Asymmetric(#[from] AsymmetricError),

    #[error("Symmetric cryptographic error: {0}")]
    Symmetric(#[from] SymmetricError),
}

// 让各算法的错误可以直接用 `?` 提升为顶层错误
impl From<RsaSystemError> for Error {
    fn from(err: RsaSystemError) -> Self {
        Error::Asymmetric(err.into())
    }
}

impl From<EcdsaSystemError> for Error {
    fn from(err: EcdsaSystemError) -> Self {
        Error::Asymmetric(err.into())
    }
}

impl From<EcdhSystemError> for Error {
    fn from(err: EcdhSystemError) -> Self {
        Error::Asymmetric(err.into())
    }
}

impl From<AesCbcSystemError> for Error {
    fn from(err: AesCbcSystemError) -> Self {
        Error::Symmetric(err.into())
    }
}

impl From<AesGcmSystemError> for Error {
    fn from(err: AesGcmSystemError) -> Self {
        Error::Symmetric(err.into())
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Format(format!("UTF-8 conversion error: {}", err))
    }
}
