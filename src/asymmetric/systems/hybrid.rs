//! # 混合加密系统模块
//!
//! 用 RSA-OAEP 封装一次性 AES 密钥，再用 AES-CBC 加密实际数据，
//! 从而突破 RSA 单次可加密长度的限制。

pub mod rsa_aes;

pub use rsa_aes::{HybridEnvelope, RsaAesCryptoSystem};
