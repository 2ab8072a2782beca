//! 经典加密演示程序
//!
//! ```bash
//! # 使用默认配置（叠加 QV_CRYPTO_* 环境变量）
//! classical-crypto
//!
//! # 从 JSON 配置文件读取
//! classical-crypto config.json
//!
//! # 打开调试日志
//! RUST_LOG=classical_crypto=debug classical-crypto
//! ```

use classical_crypto::common::{ConfigFile, Error};
use classical_crypto::demo::QuantumVulnerableDemo;
use tracing_subscriber::EnvFilter;

fn run() -> Result<(), Error> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            let mut config = ConfigFile::from_file(path)?;
            config.apply_env()?;
            config
        }
        None => ConfigFile::from_env()?,
    };

    let report = QuantumVulnerableDemo::new(config)?.run_all()?;
    println!("{}", report);
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "classical_crypto=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
