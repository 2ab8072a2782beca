//!
//! # 通用配置模块
//!
//! 包含加密参数（RSA 位数与填充、AES 位数与填充）和演示程序使用的消息。
//! 配置可以来自默认值、JSON 文件或 `QV_CRYPTO_*` 环境变量。
//!
use crate::common::errors::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "QV_CRYPTO_";

/// RSA 加密填充方案
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RsaPadding {
    /// PKCS#1 v1.5 加密填充
    #[default]
    Pkcs1v15,
    /// OAEP，MGF1 与摘要均为 SHA-256，空标签
    OaepSha256,
}

impl fmt::Display for RsaPadding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RsaPadding::Pkcs1v15 => write!(f, "pkcs1v15"),
            RsaPadding::OaepSha256 => write!(f, "oaep-sha256"),
        }
    }
}

impl FromStr for RsaPadding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pkcs1v15" | "pkcs1" => Ok(RsaPadding::Pkcs1v15),
            "oaep-sha256" | "oaep" => Ok(RsaPadding::OaepSha256),
            other => Err(Error::Configuration(format!(
                "unknown RSA padding '{}'",
                other
            ))),
        }
    }
}

/// AES-CBC 分组填充方案
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CbcPadding {
    /// 零填充：总是补齐到下一个分组边界（至少 1 字节），解密时去除尾部零字节
    #[default]
    Zero,
    /// PKCS#7 填充
    Pkcs7,
}

impl fmt::Display for CbcPadding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CbcPadding::Zero => write!(f, "zero"),
            CbcPadding::Pkcs7 => write!(f, "pkcs7"),
        }
    }
}

impl FromStr for CbcPadding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "zero" => Ok(CbcPadding::Zero),
            "pkcs7" => Ok(CbcPadding::Pkcs7),
            other => Err(Error::Configuration(format!(
                "unknown CBC padding '{}'",
                other
            ))),
        }
    }
}

/// 加密参数配置
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CryptoConfig {
    /// RSA密钥位数
    #[serde(default = "default_rsa_key_bits")]
    pub rsa_key_bits: usize,
    /// RSA 加密填充
    #[serde(default)]
    pub rsa_padding: RsaPadding,
    /// AES 密钥位数 (128/192/256)
    #[serde(default = "default_aes_key_bits")]
    pub aes_key_bits: usize,
    /// AES-CBC 填充
    #[serde(default)]
    pub cbc_padding: CbcPadding,
}

fn default_rsa_key_bits() -> usize {
    2048
}

fn default_aes_key_bits() -> usize {
    128
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            rsa_key_bits: default_rsa_key_bits(),
            rsa_padding: RsaPadding::default(),
            aes_key_bits: default_aes_key_bits(),
            cbc_padding: CbcPadding::default(),
        }
    }
}

impl CryptoConfig {
    /// 最小允许的 RSA 模数位数
    pub const MIN_RSA_KEY_BITS: usize = 1024;

    /// 最大允许的 RSA 模数位数，与 `rsa` crate 公钥的上限一致
    pub const MAX_RSA_KEY_BITS: usize = 4096;

    /// AES 密钥长度（字节）
    pub fn aes_key_len(&self) -> usize {
        self.aes_key_bits / 8
    }

    /// 检查参数是否可用
    pub fn validate(&self) -> Result<(), Error> {
        if self.rsa_key_bits < Self::MIN_RSA_KEY_BITS {
            return Err(Error::Configuration(format!(
                "RSA key size {} is below the minimum of {} bits",
                self.rsa_key_bits,
                Self::MIN_RSA_KEY_BITS
            )));
        }
        if self.rsa_key_bits > Self::MAX_RSA_KEY_BITS {
            return Err(Error::Configuration(format!(
                "RSA key size {} exceeds the maximum of {} bits",
                self.rsa_key_bits,
                Self::MAX_RSA_KEY_BITS
            )));
        }
        if !matches!(self.aes_key_bits, 128 | 192 | 256) {
            return Err(Error::Configuration(format!(
                "AES key size must be 128, 192 or 256 bits, got {}",
                self.aes_key_bits
            )));
        }
        Ok(())
    }
}

/// 演示程序使用的三条消息
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DemoConfig {
    #[serde(default = "default_rsa_message")]
    pub rsa_message: String,
    #[serde(default = "default_aes_message")]
    pub aes_message: String,
    #[serde(default = "default_ecc_message")]
    pub ecc_message: String,
}

fn default_rsa_message() -> String {
    "Secret message for RSA encryption".to_string()
}

fn default_aes_message() -> String {
    "Secret message for AES encryption".to_string()
}

fn default_ecc_message() -> String {
    "Message for ECC signing".to_string()
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            rsa_message: default_rsa_message(),
            aes_message: default_aes_message(),
            ecc_message: default_ecc_message(),
        }
    }
}

/// 完整配置文件
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct ConfigFile {
    /// 加密配置
    #[serde(default)]
    pub crypto: CryptoConfig,
    /// 演示配置
    #[serde(default)]
    pub demo: DemoConfig,
}

impl ConfigFile {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config: ConfigFile = serde_json::from_str(&contents)?;
        config.crypto.validate()?;
        Ok(config)
    }

    /// 保存配置到 JSON 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        Ok(())
    }

    /// 默认值叠加环境变量
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::default();
        config.apply_env()?;
        Ok(config)
    }

    /// 用 `QV_CRYPTO_*` 环境变量覆盖当前配置
    pub fn apply_env(&mut self) -> Result<(), Error> {
        self.apply_vars(|name| std::env::var(format!("{}{}", ENV_PREFIX, name)).ok())
    }

    fn apply_vars<F>(&mut self, lookup: F) -> Result<(), Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("RSA_BITS") {
            self.crypto.rsa_key_bits = parse_bits("RSA_BITS", &value)?;
        }
        if let Some(value) = lookup("RSA_PADDING") {
            self.crypto.rsa_padding = value.parse()?;
        }
        if let Some(value) = lookup("AES_BITS") {
            self.crypto.aes_key_bits = parse_bits("AES_BITS", &value)?;
        }
        if let Some(value) = lookup("CBC_PADDING") {
            self.crypto.cbc_padding = value.parse()?;
        }
        self.crypto.validate()
    }
}

fn parse_bits(name: &str, value: &str) -> Result<usize, Error> {
    value.trim().parse::<usize>().map_err(|e| {
        Error::Configuration(format!("{}{} is not a number: {}", ENV_PREFIX, name, e))
    })
}
