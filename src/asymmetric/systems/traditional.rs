//! # 传统加密算法模块
//!
//! RSA 加密与签名、P-256 上的 ECDSA 签名和 ECDH 密钥协商。
//! 这些算法都依赖大整数分解或离散对数难题，可被 Shor 算法攻破。

pub mod ecdh;
pub mod ecdsa;
pub mod rsa;

pub use ecdh::EcdhCryptoSystem;
pub use ecdsa::{EcdsaCryptoSystem, P256PrivateKeyWrapper, P256PublicKeyWrapper};
pub use rsa::{RsaCryptoSystem, RsaPrivateKeyWrapper, RsaPublicKeyWrapper};
