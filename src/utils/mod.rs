//! # 工具函数模块
//!
//! 提供美化输出、进度条、颜色解析等工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `batch/` 模块使用
//! - 子模块: output, progress, color

pub mod color;
pub mod output;
pub mod progress;
