//! # 解析器模块
//!
//! 提供距离分布分析报告的解析器。
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: gnom_out

pub mod gnom_out;

pub use gnom_out::{parse_gnom_output, ParseOptions};
