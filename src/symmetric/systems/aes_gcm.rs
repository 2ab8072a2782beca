//! AES-256-GCM 对称加密实现
//!
//! 密文格式：`[12 字节 nonce][密文][16 字节认证标签]`
use crate::common::config::CryptoConfig;
use crate::common::utils::{ZeroizingVec, from_base64, to_base64};
use crate::symmetric::traits::SymmetricCryptographicSystem;
use aes_gcm::aead::{Aead, Error as AeadError, KeyInit, Payload};
use aes_gcm::{AeadCore, Aes256Gcm, Nonce};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const KEY_SIZE: usize = 32;
pub const NONCE_SIZE: usize = 12;
pub const TAG_SIZE: usize = 16;

/// AES-GCM 系统的独立错误类型
#[derive(Error, Debug)]
pub enum AesGcmSystemError {
    #[error("Key generation failed: {0}")]
    KeyGeneration(#[from] rand_core::OsError),

    #[error("Invalid key size: expected {expected}, got {actual}")]
    InvalidKeySize { expected: usize, actual: usize },

    #[error("Encryption failed: {0}")]
    EncryptionFailed(#[from] AeadError),

    #[error("Decryption failed")]
    DecryptionFailed,

    #[error("Ciphertext is malformed or truncated: {0}")]
    MalformedCiphertext(String),

    #[error("Base64 decoding failed: {0}")]
    Base64Decode(#[from] base64::DecodeError),
}

/// AES-256-GCM 对称加密系统
#[derive(Debug)]
pub struct AesGcmSystem;

/// AES-GCM 密钥，释放时擦除
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct AesGcmKey(pub ZeroizingVec);

fn cipher_for(key: &AesGcmKey) -> Result<Aes256Gcm, AesGcmSystemError> {
    Aes256Gcm::new_from_slice(&key.0).map_err(|_| AesGcmSystemError::InvalidKeySize {
        expected: KEY_SIZE,
        actual: key.0.len(),
    })
}

impl SymmetricCryptographicSystem for AesGcmSystem {
    type Key = AesGcmKey;
    type Error = AesGcmSystemError;

    // 固定 256 位，不读取 aes_key_bits
    fn generate_key(_config: &CryptoConfig) -> Result<Self::Key, Self::Error> {
        let mut key_bytes = ZeroizingVec(vec![0u8; KEY_SIZE]);
        use rand_core::{OsRng, TryRngCore};
        OsRng.try_fill_bytes(&mut key_bytes.0)?;
        Ok(AesGcmKey(key_bytes))
    }

    fn encrypt(
        key: &Self::Key,
        plaintext: &[u8],
        additional_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, Self::Error> {
        let cipher = cipher_for(key)?;
        use aes_gcm::aead::OsRng;
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let sealed = cipher.encrypt(
            &nonce,
            Payload {
                msg: plaintext,
                aad: additional_data.unwrap_or(&[]),
            },
        )?;

        let mut output = Vec::with_capacity(NONCE_SIZE + sealed.len());
        output.extend_from_slice(nonce.as_slice());
        output.extend_from_slice(&sealed);

        debug!(plaintext_len = plaintext.len(), output_len = output.len(), "AES-GCM encrypt");
        Ok(output)
    }

    fn decrypt(
        key: &Self::Key,
        ciphertext: &[u8],
        additional_data: Option<&[u8]>,
    ) -> Result<Vec<u8>, Self::Error> {
        if ciphertext.len() < NONCE_SIZE + TAG_SIZE {
            return Err(AesGcmSystemError::MalformedCiphertext(
                "Ciphertext is too short to contain nonce and tag".to_string(),
            ));
        }
        let cipher = cipher_for(key)?;

        let (nonce_slice, sealed) = ciphertext.split_at(NONCE_SIZE);
        cipher
            .decrypt(
                Nonce::from_slice(nonce_slice),
                Payload {
                    msg: sealed,
                    aad: additional_data.unwrap_or(&[]),
                },
            )
            .map_err(|_| AesGcmSystemError::DecryptionFailed)
    }

    fn export_key(key: &Self::Key) -> Result<String, Self::Error> {
        Ok(to_base64(&key.0))
    }

    fn import_key(encoded_key: &str) -> Result<Self::Key, Self::Error> {
        let key_bytes = ZeroizingVec(from_base64(encoded_key)?);
        if key_bytes.len() != KEY_SIZE {
            return Err(AesGcmSystemError::InvalidKeySize {
                expected: KEY_SIZE,
                actual: key_bytes.len(),
            });
        }
        Ok(AesGcmKey(key_bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_key() {
        let config = CryptoConfig::default();
        let key = AesGcmSystem::generate_key(&config).unwrap();
        assert_eq!(key.0.len(), KEY_SIZE);
    }

    #[test]
    fn test_encrypt_decrypt_success() {
        let config = CryptoConfig::default();
        let key = AesGcmSystem::generate_key(&config).unwrap();
        let plaintext = b"this is a secret message";

        let ciphertext = AesGcmSystem::encrypt(&key, plaintext, None).unwrap();
        assert_eq!(ciphertext.len(), NONCE_SIZE + plaintext.len() + TAG_SIZE);

        let decrypted_plaintext = AesGcmSystem::decrypt(&key, &ciphertext, None).unwrap();
        assert_eq!(plaintext, decrypted_plaintext.as_slice());
    }

    #[test]
    fn test_encrypt_decrypt_with_aad_success() {
        let config = CryptoConfig::default();
        let key = AesGcmSystem::generate_key(&config).unwrap();
        let plaintext = b"this is a secret message with aad";
        let aad = b"additional authenticated data";

        let ciphertext = AesGcmSystem::encrypt(&key, plaintext, Some(aad)).unwrap();
        let decrypted_plaintext = AesGcmSystem::decrypt(&key, &ciphertext, Some(aad)).unwrap();

        assert_eq!(plaintext, decrypted_plaintext.as_slice());
    }

    #[test]
    fn test_decrypt_wrong_key() {
        let config = CryptoConfig::default();
        let key1 = AesGcmSystem::generate_key(&config).unwrap();
        let key2 = AesGcmSystem::generate_key(&config).unwrap();
        let plaintext = b"this is another secret";

        let ciphertext = AesGcmSystem::encrypt(&key1, plaintext, None).unwrap();
        let result = AesGcmSystem::decrypt(&key2, &ciphertext, None);

        assert!(matches!(result, Err(AesGcmSystemError::DecryptionFailed)));
    }

    #[test]
    fn test_decrypt_tampered_ciphertext() {
        let config = CryptoConfig::default();
        let key = AesGcmSystem::generate_key(&config).unwrap();
        let plaintext = b"secret message, do not tamper";

        let mut ciphertext = AesGcmSystem::encrypt(&key, plaintext, None).unwrap();
        ciphertext[NONCE_SIZE] ^= 0xff;

        let result = AesGcmSystem::decrypt(&key, &ciphertext, None);
        assert!(matches!(result, Err(AesGcmSystemError::DecryptionFailed)));
    }

    #[test]
    fn test_decrypt_tampered_aad() {
        let config = CryptoConfig::default();
        let key = AesGcmSystem::generate_key(&config).unwrap();
        let plaintext = b"secret message";
        let aad = b"authentic data";
        let tampered_aad = b"tampered authentic data";

        let ciphertext = AesGcmSystem::encrypt(&key, plaintext, Some(aad)).unwrap();
        let result = AesGcmSystem::decrypt(&key, &ciphertext, Some(tampered_aad));

        assert!(matches!(result, Err(AesGcmSystemError::DecryptionFailed)));
    }

    #[test]
    fn test_export_import_key() {
        let config = CryptoConfig::default();
        let key = AesGcmSystem::generate_key(&config).unwrap();
        let plaintext = b"message for exported/imported key";

        let exported_key = AesGcmSystem::export_key(&key).unwrap();
        let imported_key = AesGcmSystem::import_key(&exported_key).unwrap();

        assert_eq!(key, imported_key);

        let ciphertext = AesGcmSystem::encrypt(&imported_key, plaintext, None).unwrap();
        let decrypted_plaintext = AesGcmSystem::decrypt(&key, &ciphertext, None).unwrap();

        assert_eq!(plaintext, decrypted_plaintext.as_slice());
    }

    #[test]
    fn test_import_invalid_key() {
        let result = AesGcmSystem::import_key("not-a-base64-key");
        assert!(matches!(result, Err(AesGcmSystemError::Base64Decode(_))));

        let short_encoded_key = to_base64(&[0u8; 16]);
        let result_short = AesGcmSystem::import_key(&short_encoded_key);
        assert!(matches!(
            result_short,
            Err(AesGcmSystemError::InvalidKeySize { expected: 32, actual: 16 })
        ));
    }

    #[test]
    fn test_decrypt_truncated_ciphertext() {
        let config = CryptoConfig::default();
        let key = AesGcmSystem::generate_key(&config).unwrap();

        let short_ciphertext = vec![0u8; NONCE_SIZE + TAG_SIZE - 1];
        let result = AesGcmSystem::decrypt(&key, &short_ciphertext, None);
        assert!(matches!(
            result,
            Err(AesGcmSystemError::MalformedCiphertext(e)) if e.contains("too short")
        ));
    }

    fn assert_std_error<E: std::error::Error + Send + Sync + 'static>() {}

    #[test]
    fn test_error_sources_are_std_errors() {
        assert_std_error::<rand_core::OsError>();
        assert_std_error::<AeadError>();
        assert_std_error::<AesGcmSystemError>();

        let err = AesGcmSystemError::from(AeadError);
        assert!(std::error::Error::source(&err).is_some());

        let err = crate::common::errors::Error::from(AesGcmSystemError::DecryptionFailed);
        assert!(err.to_string().contains("Decryption failed"));
    }

    #[test]
    fn test_encrypt_empty_plaintext() {
        let config = CryptoConfig::default();
        let key = AesGcmSystem::generate_key(&config).unwrap();

        let ciphertext = AesGcmSystem::encrypt(&key, b"", None).unwrap();
        assert_eq!(ciphertext.len(), NONCE_SIZE + TAG_SIZE);
        assert!(AesGcmSystem::decrypt(&key, &ciphertext, None).unwrap().is_empty());
    }
}
