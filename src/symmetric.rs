//! 对称加密核心模块

pub mod errors;
pub mod systems;
pub mod traits;

pub use self::errors::SymmetricError;
pub use self::traits::SymmetricCryptographicSystem;
