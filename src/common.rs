//! 通用模块，包含配置、错误处理和工具函数

pub mod config;
pub mod errors;
pub mod utils;

pub use self::config::{CbcPadding, ConfigFile, CryptoConfig, DemoConfig, RsaPadding};
pub use self::errors::Error;
pub use self::utils::{ZeroizingVec, from_base64, to_base64};
