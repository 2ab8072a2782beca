//! 定义了非对称加密系统的核心 Trait。
use crate::common::config::CryptoConfig;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// `KeyPairSystem` 是所有非对称算法共有的部分：生成密钥对，以及以标准格式 (PEM) 导入导出密钥。
///
/// 密钥以包装类型持有，离开作用域即被释放（私钥同时被擦除）。
pub trait KeyPairSystem: Sized {
    /// 公钥类型
    type PublicKey: Clone + Serialize + for<'de> Deserialize<'de> + Debug;

    /// 私钥类型
    type PrivateKey: Clone + Serialize + for<'de> Deserialize<'de> + Debug;

    /// 错误类型
    type Error: std::error::Error + Send + Sync + 'static;

    /// 生成密钥对
    fn generate_keypair(
        config: &CryptoConfig,
    ) -> Result<(Self::PublicKey, Self::PrivateKey), Self::Error>;

    /// 将公钥导出为标准格式
    fn export_public_key(public_key: &Self::PublicKey) -> Result<String, Self::Error>;

    /// 将私钥导出为标准格式
    fn export_private_key(private_key: &Self::PrivateKey) -> Result<String, Self::Error>;

    /// 从标准格式导入公钥
    fn import_public_key(key_data: &str) -> Result<Self::PublicKey, Self::Error>;

    /// 从标准格式导入私钥
    fn import_private_key(key_data: &str) -> Result<Self::PrivateKey, Self::Error>;
}

/// `AsymmetricCryptographicSystem` 定义了公钥加密算法必须实现的功能。
pub trait AsymmetricCryptographicSystem: KeyPairSystem {
    /// 使用公钥加密数据
    fn encrypt(public_key: &Self::PublicKey, plaintext: &[u8]) -> Result<Vec<u8>, Self::Error>;

    /// 使用私钥解密数据
    fn decrypt(private_key: &Self::PrivateKey, ciphertext: &[u8])
    -> Result<Vec<u8>, Self::Error>;
}

/// `DigitalSignatureSystem` 定义了签名算法必须实现的功能。
pub trait DigitalSignatureSystem: KeyPairSystem {
    /// 签名类型
    type Signature: AsRef<[u8]> + Clone + Debug;

    /// 使用私钥对消息签名
    fn sign(private_key: &Self::PrivateKey, message: &[u8])
    -> Result<Self::Signature, Self::Error>;

    /// 使用公钥验证签名，验证失败返回错误
    fn verify(
        public_key: &Self::PublicKey,
        message: &[u8],
        signature: &Self::Signature,
    ) -> Result<(), Self::Error>;
}

/// `KeyAgreementSystem` 定义了密钥协商算法必须实现的功能。
pub trait KeyAgreementSystem: KeyPairSystem {
    /// 协商得到的共享密钥类型
    type SharedKey: AsRef<[u8]>;

    /// 用自己的私钥与对方公钥派生共享密钥
    fn derive_shared_key(
        private_key: &Self::PrivateKey,
        peer_public_key: &Self::PublicKey,
    ) -> Result<Self::SharedKey, Self::Error>;
}
