//! # 对称加密系统模块
//!
//! 每个对称加密系统都实现 `SymmetricCryptographicSystem` 特征。
//!
//! - [`aes_cbc`]：AES-128/192/256-CBC，零填充或 PKCS#7，输出以随机 IV 开头。
//! - [`aes_gcm`]：AES-256-GCM，支持附加认证数据。

pub mod aes_cbc;
pub mod aes_gcm;

pub use aes_cbc::{AesCbcKey, AesCbcSystem};
pub use aes_gcm::{AesGcmKey, AesGcmSystem};
