//!
//! 集成测试的通用辅助函数
//!
#![allow(dead_code)]

use classical_crypto::asymmetric::systems::traditional::{
    P256PrivateKeyWrapper, P256PublicKeyWrapper, RsaPrivateKeyWrapper, RsaPublicKeyWrapper,
};
use classical_crypto::prelude::*;
use std::sync::OnceLock;

/// 整个测试进程共用一对 2048 位 RSA 密钥，避免重复生成
pub fn rsa_keys() -> &'static (RsaPublicKeyWrapper, RsaPrivateKeyWrapper) {
    static KEYS: OnceLock<(RsaPublicKeyWrapper, RsaPrivateKeyWrapper)> = OnceLock::new();
    KEYS.get_or_init(|| RsaCryptoSystem::generate_keypair(&CryptoConfig::default()).unwrap())
}

pub fn p256_keys() -> (P256PublicKeyWrapper, P256PrivateKeyWrapper) {
    EcdsaCryptoSystem::generate_keypair(&CryptoConfig::default()).unwrap()
}

/// 只设置 AES 位数的配置
pub fn aes_config(bits: usize, padding: CbcPadding) -> CryptoConfig {
    CryptoConfig {
        aes_key_bits: bits,
        cbc_padding: padding,
        ..Default::default()
    }
}
