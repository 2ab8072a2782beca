//! 算法系统集合
//!
//! 包含传统算法实现，以及在其上组合出的混合加密方案
pub mod hybrid;
pub mod traditional;
