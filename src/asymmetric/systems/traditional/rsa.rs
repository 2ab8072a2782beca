//! `RsaCryptoSystem` 提供了基于 RSA 的公钥加解密与 PSS 签名。
//!
//! 加密默认使用 PKCS#1 v1.5 填充，也可以通过 [`RsaPadding`] 选择 OAEP (SHA-256)。
//! 密文长度总是等于模数长度。

use crate::asymmetric::traits::{
    AsymmetricCryptographicSystem, DigitalSignatureSystem, KeyPairSystem,
};
use crate::common::config::{CryptoConfig, RsaPadding};
use crate::common::utils::ZeroizingVec;
use rsa::pkcs8::{
    DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding,
};
use rsa::pss::{Signature as PssSignature, SigningKey, VerifyingKey};
use rsa::rand_core::OsRng as RsaOsRng;
use rsa::signature::{RandomizedSigner, SignatureEncoding, Verifier};
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;
use tracing::debug;

/// PKCS#1 v1.5 填充开销（字节）
const PKCS1V15_OVERHEAD: usize = 11;
/// SHA-256 摘要长度
const SHA256_LEN: usize = 32;

/// RSA 系统的独立错误类型
#[derive(Error, Debug)]
pub enum RsaSystemError {
    #[error("RSA key generation failed: {0}")]
    KeyGeneration(rsa::Error),

    #[error("RSA key encoding failed: {0}")]
    KeyEncoding(String),

    #[error("message too long for RSA key: at most {max} bytes, got {actual}")]
    MessageTooLong { max: usize, actual: usize },

    #[error("RSA encryption failed: {0}")]
    Encryption(rsa::Error),

    #[error("RSA decryption failed: {0}")]
    Decryption(rsa::Error),

    #[error("RSA signing failed: {0}")]
    Signing(rsa::signature::Error),

    #[error("malformed RSA signature: {0}")]
    MalformedSignature(String),

    #[error("RSA signature verification failed")]
    VerificationFailed,
}

/// RSA公钥包装器，内部为 DER (SPKI) 编码
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsaPublicKeyWrapper(pub Vec<u8>);

impl RsaPublicKeyWrapper {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn to_key(&self) -> Result<RsaPublicKey, RsaSystemError> {
        RsaPublicKey::from_public_key_der(&self.0)
            .map_err(|e| RsaSystemError::KeyEncoding(format!("invalid RSA public key: {}", e)))
    }
}

/// RSA私钥包装器，内部为 DER (PKCS#8) 编码，释放时擦除
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsaPrivateKeyWrapper(pub ZeroizingVec);

impl RsaPrivateKeyWrapper {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    fn to_key(&self) -> Result<RsaPrivateKey, RsaSystemError> {
        RsaPrivateKey::from_pkcs8_der(&self.0)
            .map_err(|e| RsaSystemError::KeyEncoding(format!("invalid RSA private key: {}", e)))
    }
}

/// RSA 签名包装器
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsaSignature(pub Vec<u8>);

impl AsRef<[u8]> for RsaSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// RSA加密系统实现
///
/// 通过 trait 调用时使用 PKCS#1 v1.5；需要 OAEP 时使用 [`RsaCryptoSystem::encrypt_with_padding`]。
pub struct RsaCryptoSystem;

impl RsaCryptoSystem {
    /// 模数长度（字节），也就是密文长度
    pub fn modulus_size(public_key: &RsaPublicKeyWrapper) -> Result<usize, RsaSystemError> {
        Ok(public_key.to_key()?.size())
    }

    /// 给定填充方案下一次可加密的最大明文长度
    pub fn max_plaintext_len(
        public_key: &RsaPublicKeyWrapper,
        padding: RsaPadding,
    ) -> Result<usize, RsaSystemError> {
        Ok(capacity(&public_key.to_key()?, padding))
    }

    pub fn encrypt_with_padding(
        public_key: &RsaPublicKeyWrapper,
        plaintext: &[u8],
        padding: RsaPadding,
    ) -> Result<Vec<u8>, RsaSystemError> {
        let key = public_key.to_key()?;
        let max = capacity(&key, padding);
        if plaintext.len() > max {
            return Err(RsaSystemError::MessageTooLong {
                max,
                actual: plaintext.len(),
            });
        }

        let mut rng = RsaOsRng;
        let ciphertext = match padding {
            RsaPadding::Pkcs1v15 => key.encrypt(&mut rng, Pkcs1v15Encrypt, plaintext),
            RsaPadding::OaepSha256 => key.encrypt(&mut rng, Oaep::new::<Sha256>(), plaintext),
        }
        .map_err(RsaSystemError::Encryption)?;

        debug!(
            %padding,
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            "RSA encrypt"
        );
        Ok(ciphertext)
    }

    pub fn decrypt_with_padding(
        private_key: &RsaPrivateKeyWrapper,
        ciphertext: &[u8],
        padding: RsaPadding,
    ) -> Result<Vec<u8>, RsaSystemError> {
        let key = private_key.to_key()?;
        match padding {
            RsaPadding::Pkcs1v15 => key.decrypt(Pkcs1v15Encrypt, ciphertext),
            RsaPadding::OaepSha256 => key.decrypt(Oaep::new::<Sha256>(), ciphertext),
        }
        .map_err(RsaSystemError::Decryption)
    }
}

fn capacity(key: &RsaPublicKey, padding: RsaPadding) -> usize {
    let overhead = match padding {
        RsaPadding::Pkcs1v15 => PKCS1V15_OVERHEAD,
        RsaPadding::OaepSha256 => 2 * SHA256_LEN + 2,
    };
    key.size().saturating_sub(overhead)
}

impl KeyPairSystem for RsaCryptoSystem {
    type PublicKey = RsaPublicKeyWrapper;
    type PrivateKey = RsaPrivateKeyWrapper;
    type Error = RsaSystemError;

    fn generate_keypair(
        config: &CryptoConfig,
    ) -> Result<(Self::PublicKey, Self::PrivateKey), Self::Error> {
        let bits = config.rsa_key_bits;
        // 超过上限的私钥能生成，但公钥无法再被解析
        if bits > CryptoConfig::MAX_RSA_KEY_BITS {
            return Err(RsaSystemError::KeyGeneration(rsa::Error::ModulusTooLarge));
        }
        debug!(bits, "generating RSA key pair");

        // 公钥指数固定为 65537
        let mut rng = RsaOsRng;
        let private_key =
            RsaPrivateKey::new(&mut rng, bits).map_err(RsaSystemError::KeyGeneration)?;
        let public_key = RsaPublicKey::from(&private_key);

        let public_der = public_key
            .to_public_key_der()
            .map_err(|e| RsaSystemError::KeyEncoding(e.to_string()))?;
        let private_der = private_key
            .to_pkcs8_der()
            .map_err(|e| RsaSystemError::KeyEncoding(e.to_string()))?;

        Ok((
            RsaPublicKeyWrapper(public_der.as_bytes().to_vec()),
            RsaPrivateKeyWrapper(ZeroizingVec(private_der.as_bytes().to_vec())),
        ))
    }

    fn export_public_key(public_key: &Self::PublicKey) -> Result<String, Self::Error> {
        public_key
            .to_key()?
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| RsaSystemError::KeyEncoding(e.to_string()))
    }

    fn export_private_key(private_key: &Self::PrivateKey) -> Result<String, Self::Error> {
        let pem = private_key
            .to_key()?
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| RsaSystemError::KeyEncoding(e.to_string()))?;
        Ok(pem.to_string())
    }

    fn import_public_key(key_data: &str) -> Result<Self::PublicKey, Self::Error> {
        let public_key = RsaPublicKey::from_public_key_pem(key_data)
            .map_err(|e| RsaSystemError::KeyEncoding(format!("cannot import public key: {}", e)))?;
        let der = public_key
            .to_public_key_der()
            .map_err(|e| RsaSystemError::KeyEncoding(e.to_string()))?;
        Ok(RsaPublicKeyWrapper(der.as_bytes().to_vec()))
    }

    fn import_private_key(key_data: &str) -> Result<Self::PrivateKey, Self::Error> {
        let private_key = RsaPrivateKey::from_pkcs8_pem(key_data).map_err(|e| {
            RsaSystemError::KeyEncoding(format!("cannot import private key: {}", e))
        })?;
        let der = private_key
            .to_pkcs8_der()
            .map_err(|e| RsaSystemError::KeyEncoding(e.to_string()))?;
        Ok(RsaPrivateKeyWrapper(ZeroizingVec(der.as_bytes().to_vec())))
    }
}

impl AsymmetricCryptographicSystem for RsaCryptoSystem {
    fn encrypt(public_key: &Self::PublicKey, plaintext: &[u8]) -> Result<Vec<u8>, Self::Error> {
        Self::encrypt_with_padding(public_key, plaintext, RsaPadding::Pkcs1v15)
    }

    fn decrypt(
        private_key: &Self::PrivateKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, Self::Error> {
        Self::decrypt_with_padding(private_key, ciphertext, RsaPadding::Pkcs1v15)
    }
}

impl DigitalSignatureSystem for RsaCryptoSystem {
    type Signature = RsaSignature;

    fn sign(
        private_key: &Self::PrivateKey,
        message: &[u8],
    ) -> Result<Self::Signature, Self::Error> {
        let signing_key = SigningKey::<Sha256>::new(private_key.to_key()?);
        let mut rng = RsaOsRng;
        let signature = signing_key
            .try_sign_with_rng(&mut rng, message)
            .map_err(RsaSystemError::Signing)?;

        Ok(RsaSignature(signature.to_vec()))
    }

    fn verify(
        public_key: &Self::PublicKey,
        message: &[u8],
        signature: &Self::Signature,
    ) -> Result<(), Self::Error> {
        let verifying_key = VerifyingKey::<Sha256>::new(public_key.to_key()?);
        let pss_signature = PssSignature::try_from(signature.as_ref())
            .map_err(|e| RsaSystemError::MalformedSignature(e.to_string()))?;

        verifying_key
            .verify(message, &pss_signature)
            .map_err(|_| RsaSystemError::VerificationFailed)
    }
}
