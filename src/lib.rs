//! # classical-crypto
//!
//! 经典（可被量子计算攻破的）密码算法的类型化封装：RSA 加密与签名、AES-CBC / AES-GCM、
//! P-256 上的 ECDSA 与 ECDH，以及 RSA + AES 混合加密。所有数学运算都交给 RustCrypto 系列库。
//!
//! 密钥以包装类型持有，离开作用域即被释放，私钥材料在释放时擦除。
//!
//! ## Quick Start
//!
//! ```rust
//! use classical_crypto::prelude::*;
//!
//! fn main() -> Result<(), Error> {
//!     let config = CryptoConfig::default();
//!
//!     let (public_key, private_key) = EcdsaCryptoSystem::generate_keypair(&config)?;
//!     let signature = EcdsaCryptoSystem::sign(&private_key, b"Message for ECC signing")?;
//!     EcdsaCryptoSystem::verify(&public_key, b"Message for ECC signing", &signature)?;
//!
//!     let key = AesCbcSystem::generate_key(&config)?;
//!     let ciphertext = AesCbcSystem::encrypt(&key, b"Secret message for AES encryption", None)?;
//!     assert_eq!(ciphertext.len(), 64);
//!     Ok(())
//! }
//! ```

pub mod asymmetric;
pub mod common;
pub mod demo;
pub mod symmetric;

pub use common::errors::Error;

/// 最常用的特征与类型
pub mod prelude {
    pub use crate::asymmetric::systems::hybrid::{HybridEnvelope, RsaAesCryptoSystem};
    pub use crate::asymmetric::systems::traditional::{
        EcdhCryptoSystem, EcdsaCryptoSystem, RsaCryptoSystem,
    };
    pub use crate::asymmetric::traits::{
        AsymmetricCryptographicSystem, DigitalSignatureSystem, KeyAgreementSystem, KeyPairSystem,
    };
    pub use crate::common::config::{CbcPadding, ConfigFile, CryptoConfig, DemoConfig, RsaPadding};
    pub use crate::common::errors::Error;
    pub use crate::demo::{DemoReport, QuantumVulnerableDemo};
    pub use crate::symmetric::systems::{AesCbcSystem, AesGcmSystem};
    pub use crate::symmetric::traits::SymmetricCryptographicSystem;
}

/// The version of the `classical-crypto` crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
