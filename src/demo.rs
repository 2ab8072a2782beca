//! 演示程序：依次执行 RSA、AES、ECC 三个独立流程，每个流程输出一行结果。
//!
//! 每个流程在生成输出后立即用对应的密钥做一次反向校验（解密或验签），
//! 结果记录在 [`FlowReport::verified`] 中。密钥只在流程内部存活，返回前即被释放。

use crate::asymmetric::systems::traditional::{EcdsaCryptoSystem, RsaCryptoSystem};
use crate::asymmetric::traits::{DigitalSignatureSystem, KeyPairSystem};
use crate::common::config::{CbcPadding, ConfigFile};
use crate::common::errors::Error;
use crate::symmetric::systems::AesCbcSystem;
use crate::symmetric::traits::SymmetricCryptographicSystem;
use std::fmt;
use tracing::{info, warn};

/// 单个流程的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowReport {
    /// 算法描述，例如 `RSA-2048/pkcs1v15`
    pub algorithm: String,
    /// 输出（密文或签名）的字节长度
    pub output_len: usize,
    /// 反向校验是否通过
    pub verified: bool,
}

/// 三个流程的汇总
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    pub rsa: FlowReport,
    pub aes: FlowReport,
    pub ecc: FlowReport,
}

impl DemoReport {
    pub fn all_verified(&self) -> bool {
        self.rsa.verified && self.aes.verified && self.ecc.verified
    }
}

impl fmt::Display for DemoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RSA encrypted data (length: {} bytes)", self.rsa.output_len)?;
        writeln!(f, "AES encrypted data (length: {} bytes)", self.aes.output_len)?;
        write!(f, "ECC signature created (length: {} bytes)", self.ecc.output_len)
    }
}

/// 经典（可被量子计算攻破的）算法演示
#[derive(Debug, Clone, Default)]
pub struct QuantumVulnerableDemo {
    config: ConfigFile,
}

impl QuantumVulnerableDemo {
    pub fn new(config: ConfigFile) -> Result<Self, Error> {
        config.crypto.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// RSA 密钥生成 + 加密，随后用私钥解密校验
    pub fn run_rsa(&self) -> Result<FlowReport, Error> {
        let crypto = &self.config.crypto;
        let message = self.config.demo.rsa_message.as_bytes();

        let (public_key, private_key) = RsaCryptoSystem::generate_keypair(crypto)?;
        let ciphertext =
            RsaCryptoSystem::encrypt_with_padding(&public_key, message, crypto.rsa_padding)?;
        let decrypted =
            RsaCryptoSystem::decrypt_with_padding(&private_key, &ciphertext, crypto.rsa_padding)?;

        let report = FlowReport {
            algorithm: format!("RSA-{}/{}", crypto.rsa_key_bits, crypto.rsa_padding),
            output_len: ciphertext.len(),
            verified: decrypted == message,
        };
        log_flow(&report);
        Ok(report)
    }

    /// AES 密钥生成 + CBC 加密，随后用同一密钥和密文前缀中的 IV 解密校验
    pub fn run_aes(&self) -> Result<FlowReport, Error> {
        let crypto = &self.config.crypto;
        let message = self.config.demo.aes_message.as_bytes();

        let key = AesCbcSystem::generate_key(crypto)?;
        let ciphertext = AesCbcSystem::encrypt_with_padding(&key, message, crypto.cbc_padding)?;
        let decrypted =
            AesCbcSystem::decrypt_with_padding(&key, &ciphertext, crypto.cbc_padding)?;

        // 零填充无法区分明文末尾的 0x00，比较时一并忽略
        let expected = match crypto.cbc_padding {
            CbcPadding::Zero => trim_trailing_zeros(message),
            CbcPadding::Pkcs7 => message,
        };

        let report = FlowReport {
            algorithm: format!("AES-{}-CBC/{}", key.bits(), crypto.cbc_padding),
            output_len: ciphertext.len(),
            verified: decrypted == expected,
        };
        log_flow(&report);
        Ok(report)
    }

    /// P-256 密钥生成 + ECDSA 签名，随后用公钥验签
    pub fn run_ecc(&self) -> Result<FlowReport, Error> {
        let crypto = &self.config.crypto;
        let message = self.config.demo.ecc_message.as_bytes();

        let (public_key, private_key) = EcdsaCryptoSystem::generate_keypair(crypto)?;
        let signature = EcdsaCryptoSystem::sign(&private_key, message)?;
        let verified = EcdsaCryptoSystem::verify(&public_key, message, &signature).is_ok();

        let report = FlowReport {
            algorithm: "ECDSA-P256/SHA-256".to_string(),
            output_len: signature.as_ref().len(),
            verified,
        };
        log_flow(&report);
        Ok(report)
    }

    /// 顺序执行三个流程
    pub fn run_all(&self) -> Result<DemoReport, Error> {
        info!("running classical cryptography demo");
        let report = DemoReport {
            rsa: self.run_rsa()?,
            aes: self.run_aes()?,
            ecc: self.run_ecc()?,
        };
        if !report.all_verified() {
            warn!("at least one flow failed its self-check");
        }
        Ok(report)
    }
}

fn log_flow(report: &FlowReport) {
    if report.verified {
        info!(algorithm = %report.algorithm, output_len = report.output_len, "flow completed");
    } else {
        warn!(algorithm = %report.algorithm, output_len = report.output_len, "self-check failed");
    }
}

fn trim_trailing_zeros(data: &[u8]) -> &[u8] {
    let end = data.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &data[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::RsaPadding;

    #[test]
    fn test_default_demo_lengths() {
        let demo = QuantumVulnerableDemo::default();
        let report = demo.run_all().unwrap();

        assert_eq!(report.rsa.output_len, 256);
        // 33 字节消息 -> 48 字节密文 + 16 字节 IV
        assert_eq!(report.aes.output_len, 64);
        assert!(report.ecc.output_len <= 72);
        assert!(report.all_verified());
    }

    #[test]
    fn test_report_display() {
        let report = DemoReport {
            rsa: FlowReport {
                algorithm: "RSA".to_string(),
                output_len: 256,
                verified: true,
            },
            aes: FlowReport {
                algorithm: "AES".to_string(),
                output_len: 64,
                verified: true,
            },
            ecc: FlowReport {
                algorithm: "ECDSA".to_string(),
                output_len: 71,
                verified: true,
            },
        };

        let lines: Vec<String> = report.to_string().lines().map(String::from).collect();
        assert_eq!(
            lines,
            vec![
                "RSA encrypted data (length: 256 bytes)",
                "AES encrypted data (length: 64 bytes)",
                "ECC signature created (length: 71 bytes)",
            ]
        );
    }

    #[test]
    fn test_configured_algorithms() {
        let mut config = ConfigFile::default();
        config.crypto.rsa_padding = RsaPadding::OaepSha256;
        config.crypto.aes_key_bits = 256;
        config.crypto.cbc_padding = CbcPadding::Pkcs7;
        config.demo.aes_message = "x".repeat(16);

        let demo = QuantumVulnerableDemo::new(config).unwrap();

        let rsa = demo.run_rsa().unwrap();
        assert_eq!(rsa.algorithm, "RSA-2048/oaep-sha256");
        assert!(rsa.verified);

        let aes = demo.run_aes().unwrap();
        assert_eq!(aes.algorithm, "AES-256-CBC/pkcs7");
        // 16 字节对齐时 PKCS#7 追加一个完整分组
        assert_eq!(aes.output_len, 48);
        assert!(aes.verified);
    }

    #[test]
    fn test_rsa_message_too_long() {
        let mut config = ConfigFile::default();
        config.demo.rsa_message = "a".repeat(300);

        let demo = QuantumVulnerableDemo::new(config).unwrap();
        assert!(demo.run_rsa().is_err());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ConfigFile::default();
        config.crypto.aes_key_bits = 100;
        assert!(matches!(
            QuantumVulnerableDemo::new(config),
            Err(Error::Configuration(_))
        ));

        let mut config = ConfigFile::default();
        config.crypto.rsa_key_bits = 4104;
        assert!(matches!(
            QuantumVulnerableDemo::new(config),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_trim_trailing_zeros() {
        assert_eq!(trim_trailing_zeros(b"ab\0\0"), b"ab");
        assert_eq!(trim_trailing_zeros(b"\0\0"), b"");
        assert_eq!(trim_trailing_zeros(b"a\0b"), b"a\0b");
    }
}
