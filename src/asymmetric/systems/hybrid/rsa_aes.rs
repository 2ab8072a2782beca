//!
//! 一个混合加密方案：RSA-OAEP (SHA-256) 封装一次性 AES-256 密钥，AES-256-CBC (PKCS#7) 加密数据。
//!
//! 密文是 JSON 信封，三个字段均为 Base64：
//!
//! ```json
//! { "encrypted_key": "...", "iv": "...", "ciphertext": "..." }
//! ```

use crate::asymmetric::systems::traditional::rsa::{
    RsaCryptoSystem, RsaPrivateKeyWrapper, RsaPublicKeyWrapper,
};
use crate::asymmetric::traits::{AsymmetricCryptographicSystem, KeyPairSystem};
use crate::common::config::{CbcPadding, CryptoConfig, RsaPadding};
use crate::common::errors::Error;
use crate::common::utils::{ZeroizingVec, from_base64, to_base64};
use crate::symmetric::systems::aes_cbc::{AesCbcKey, AesCbcSystem, BLOCK_SIZE};
use crate::symmetric::traits::SymmetricCryptographicSystem;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 数据密钥固定为 AES-256
const DATA_KEY_BITS: usize = 256;

/// 混合加密的密文信封
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HybridEnvelope {
    /// RSA-OAEP 加密后的 AES 密钥
    pub encrypted_key: String,
    /// AES-CBC 的 IV
    pub iv: String,
    /// AES-CBC 密文
    pub ciphertext: String,
}

impl HybridEnvelope {
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(Into::into)
    }

    pub fn from_json(data: &str) -> Result<Self, Error> {
        serde_json::from_str(data).map_err(Into::into)
    }
}

/// RSA + AES 混合加密系统
pub struct RsaAesCryptoSystem;

impl RsaAesCryptoSystem {
    /// 加密并返回结构化的信封
    pub fn seal(
        public_key: &RsaPublicKeyWrapper,
        plaintext: &[u8],
    ) -> Result<HybridEnvelope, Error> {
        // 1. 生成一次性的 AES-256 密钥
        let data_key_config = CryptoConfig {
            aes_key_bits: DATA_KEY_BITS,
            ..Default::default()
        };
        let data_key = AesCbcSystem::generate_key(&data_key_config)?;

        // 2. 用 RSA-OAEP 封装 AES 密钥
        let encrypted_key = RsaCryptoSystem::encrypt_with_padding(
            public_key,
            data_key.as_bytes(),
            RsaPadding::OaepSha256,
        )?;

        // 3. 用 AES-CBC 加密数据，输出为 IV || 密文
        let sealed = AesCbcSystem::encrypt_with_padding(&data_key, plaintext, CbcPadding::Pkcs7)?;
        let (iv, ciphertext) = sealed.split_at(BLOCK_SIZE);

        debug!(
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            "hybrid RSA-AES seal"
        );

        Ok(HybridEnvelope {
            encrypted_key: to_base64(&encrypted_key),
            iv: to_base64(iv),
            ciphertext: to_base64(ciphertext),
        })
    }

    /// 打开信封，恢复明文
    pub fn open(
        private_key: &RsaPrivateKeyWrapper,
        envelope: &HybridEnvelope,
    ) -> Result<Vec<u8>, Error> {
        let encrypted_key = from_base64(&envelope.encrypted_key)?;
        let iv = from_base64(&envelope.iv)?;
        let ciphertext = from_base64(&envelope.ciphertext)?;

        if iv.len() != BLOCK_SIZE {
            return Err(Error::Format(format!(
                "IV must be {} bytes, got {}",
                BLOCK_SIZE,
                iv.len()
            )));
        }

        // 1. 用 RSA 私钥解封 AES 密钥
        let key_bytes = ZeroizingVec(RsaCryptoSystem::decrypt_with_padding(
            private_key,
            &encrypted_key,
            RsaPadding::OaepSha256,
        )?);
        let data_key = AesCbcKey::from_bytes(&key_bytes)?;

        // 2. 还原 IV || 密文 并解密
        let mut sealed = Vec::with_capacity(iv.len() + ciphertext.len());
        sealed.extend_from_slice(&iv);
        sealed.extend_from_slice(&ciphertext);

        AesCbcSystem::decrypt_with_padding(&data_key, &sealed, CbcPadding::Pkcs7)
            .map_err(Into::into)
    }
}

impl KeyPairSystem for RsaAesCryptoSystem {
    type PublicKey = RsaPublicKeyWrapper;
    type PrivateKey = RsaPrivateKeyWrapper;
    type Error = Error;

    fn generate_keypair(
        config: &CryptoConfig,
    ) -> Result<(Self::PublicKey, Self::PrivateKey), Self::Error> {
        RsaCryptoSystem::generate_keypair(config).map_err(Into::into)
    }

    fn export_public_key(pk: &Self::PublicKey) -> Result<String, Self::Error> {
        RsaCryptoSystem::export_public_key(pk).map_err(Into::into)
    }

    fn export_private_key(sk: &Self::PrivateKey) -> Result<String, Self::Error> {
        RsaCryptoSystem::export_private_key(sk).map_err(Into::into)
    }

    fn import_public_key(pk_str: &str) -> Result<Self::PublicKey, Self::Error> {
        RsaCryptoSystem::import_public_key(pk_str).map_err(Into::into)
    }

    fn import_private_key(sk_str: &str) -> Result<Self::PrivateKey, Self::Error> {
        RsaCryptoSystem::import_private_key(sk_str).map_err(Into::into)
    }
}

impl AsymmetricCryptographicSystem for RsaAesCryptoSystem {
    /// 输出 JSON 信封的 UTF-8 字节
    fn encrypt(public_key: &Self::PublicKey, plaintext: &[u8]) -> Result<Vec<u8>, Self::Error> {
        Ok(Self::seal(public_key, plaintext)?.to_json()?.into_bytes())
    }

    fn decrypt(
        private_key: &Self::PrivateKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, Self::Error> {
        let json = String::from_utf8(ciphertext.to_vec())?;
        Self::open(private_key, &HybridEnvelope::from_json(&json)?)
    }
}
