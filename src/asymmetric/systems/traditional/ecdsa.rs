//! NIST P-256 (prime256v1 / secp256r1) 上的 ECDSA 签名。
//!
//! 签名前先对消息做 SHA-256 摘要，签名以 DER 编码输出（长度不固定，最长 72 字节）。
//! 与直接把原始消息字节当作摘要送入签名器的做法不兼容：那种签名不能用这里的 `verify` 校验，
//! 反之亦然。
//! 这里定义的 P-256 密钥包装器同时被 ECDH 使用。

use crate::asymmetric::traits::{DigitalSignatureSystem, KeyPairSystem};
use crate::common::config::CryptoConfig;
use crate::common::utils::ZeroizingVec;
use p256::ecdsa::signature::{Signer, Verifier};
use p256::ecdsa::{Signature, SigningKey, VerifyingKey};
use p256::elliptic_curve::rand_core::OsRng;
use p256::pkcs8::{
    DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding,
};
use p256::{PublicKey, SecretKey};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// DER 编码的 P-256 ECDSA 签名的最大长度
pub const MAX_SIGNATURE_LEN: usize = 72;

/// ECDSA 系统的独立错误类型
#[derive(Error, Debug)]
pub enum EcdsaSystemError {
    #[error("EC key encoding failed: {0}")]
    KeyEncoding(String),

    #[error("ECDSA signing failed: {0}")]
    Signing(p256::ecdsa::Error),

    #[error("malformed ECDSA signature: {0}")]
    MalformedSignature(p256::ecdsa::Error),

    #[error("ECDSA signature verification failed")]
    VerificationFailed,
}

/// P-256 公钥包装器，内部为 DER (SPKI) 编码
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct P256PublicKeyWrapper(pub Vec<u8>);

impl P256PublicKeyWrapper {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub(crate) fn to_key(&self) -> Result<PublicKey, EcdsaSystemError> {
        PublicKey::from_public_key_der(&self.0).map_err(|e| {
            EcdsaSystemError::KeyEncoding(format!("invalid P-256 public key: {}", e))
        })
    }

    fn from_key(key: &PublicKey) -> Result<Self, EcdsaSystemError> {
        let der = key
            .to_public_key_der()
            .map_err(|e| EcdsaSystemError::KeyEncoding(e.to_string()))?;
        Ok(Self(der.as_bytes().to_vec()))
    }
}

/// P-256 私钥包装器，内部为 DER (PKCS#8) 编码，释放时擦除
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct P256PrivateKeyWrapper(pub ZeroizingVec);

impl P256PrivateKeyWrapper {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub(crate) fn to_key(&self) -> Result<SecretKey, EcdsaSystemError> {
        SecretKey::from_pkcs8_der(&self.0).map_err(|e| {
            EcdsaSystemError::KeyEncoding(format!("invalid P-256 private key: {}", e))
        })
    }

    fn from_key(key: &SecretKey) -> Result<Self, EcdsaSystemError> {
        let der = key
            .to_pkcs8_der()
            .map_err(|e| EcdsaSystemError::KeyEncoding(e.to_string()))?;
        Ok(Self(ZeroizingVec(der.as_bytes().to_vec())))
    }
}

/// 生成一对 P-256 密钥，ECDSA 与 ECDH 共用
pub(crate) fn generate_p256_keypair()
-> Result<(P256PublicKeyWrapper, P256PrivateKeyWrapper), EcdsaSystemError> {
    let secret_key = SecretKey::random(&mut OsRng);
    let public_key = secret_key.public_key();

    Ok((
        P256PublicKeyWrapper::from_key(&public_key)?,
        P256PrivateKeyWrapper::from_key(&secret_key)?,
    ))
}

/// DER 编码的 ECDSA 签名
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcdsaSignature(pub Vec<u8>);

impl AsRef<[u8]> for EcdsaSignature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// ECDSA P-256 / SHA-256 签名系统
pub struct EcdsaCryptoSystem;

impl KeyPairSystem for EcdsaCryptoSystem {
    type PublicKey = P256PublicKeyWrapper;
    type PrivateKey = P256PrivateKeyWrapper;
    type Error = EcdsaSystemError;

    fn generate_keypair(
        _config: &CryptoConfig,
    ) -> Result<(Self::PublicKey, Self::PrivateKey), Self::Error> {
        debug!(curve = "P-256", "generating ECDSA key pair");
        generate_p256_keypair()
    }

    fn export_public_key(public_key: &Self::PublicKey) -> Result<String, Self::Error> {
        public_key
            .to_key()?
            .to_public_key_pem(LineEnding::LF)
            .map_err(|e| EcdsaSystemError::KeyEncoding(e.to_string()))
    }

    fn export_private_key(private_key: &Self::PrivateKey) -> Result<String, Self::Error> {
        let pem = private_key
            .to_key()?
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| EcdsaSystemError::KeyEncoding(e.to_string()))?;
        Ok(pem.to_string())
    }

    fn import_public_key(key_data: &str) -> Result<Self::PublicKey, Self::Error> {
        let key = PublicKey::from_public_key_pem(key_data).map_err(|e| {
            EcdsaSystemError::KeyEncoding(format!("cannot import public key: {}", e))
        })?;
        P256PublicKeyWrapper::from_key(&key)
    }

    fn import_private_key(key_data: &str) -> Result<Self::PrivateKey, Self::Error> {
        let key = SecretKey::from_pkcs8_pem(key_data).map_err(|e| {
            EcdsaSystemError::KeyEncoding(format!("cannot import private key: {}", e))
        })?;
        P256PrivateKeyWrapper::from_key(&key)
    }
}

impl DigitalSignatureSystem for EcdsaCryptoSystem {
    type Signature = EcdsaSignature;

    fn sign(
        private_key: &Self::PrivateKey,
        message: &[u8],
    ) -> Result<Self::Signature, Self::Error> {
        let signing_key = SigningKey::from(&private_key.to_key()?);
        let signature: Signature = signing_key
            .try_sign(message)
            .map_err(EcdsaSystemError::Signing)?;

        Ok(EcdsaSignature(signature.to_der().as_bytes().to_vec()))
    }

    fn verify(
        public_key: &Self::PublicKey,
        message: &[u8],
        signature: &Self::Signature,
    ) -> Result<(), Self::Error> {
        let verifying_key = VerifyingKey::from(&public_key.to_key()?);
        let signature =
            Signature::from_der(signature.as_ref()).map_err(EcdsaSystemError::MalformedSignature)?;

        verifying_key
            .verify(message, &signature)
            .map_err(|_| EcdsaSystemError::VerificationFailed)
    }
}
