use crate::asymmetric::systems::traditional::ecdh::EcdhSystemError;
use crate::asymmetric::systems::traditional::ecdsa::EcdsaSystemError;
use crate::asymmetric::systems::traditional::rsa::RsaSystemError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AsymmetricError {
    #[error("RSA error: {0}")]
    Rsa(#[from] RsaSystemError),
    #[error("ECDSA error: {0}")]
    Ecdsa(#[from] EcdsaSystemError),
    #[error("ECDH error: {0}")]
    Ecdh(#[from] EcdhSystemError),
}
