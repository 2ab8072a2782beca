use crate::symmetric::systems::aes_cbc::AesCbcSystemError;
use crate::symmetric::systems::aes_gcm::AesGcmSystemError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymmetricError {
    #[error("AES-CBC System error: {0}")]
    AesCbc(#[from] AesCbcSystemError),

    #[error("AES-GCM System error: {0}")]
    AesGcm(#[from] AesGcmSystemError),
}
