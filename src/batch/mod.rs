//! # 批量处理模块
//!
//! 收集目录中的报告文件并逐个处理。
//!
//! ## 功能
//! - 按后缀收集文件（不递归）
//! - 生成图例名称
//! - 顺序处理，任一文件失败即中止
//! - 进度反馈
//!
//! ## 依赖关系
//! - 被各命令模块使用
//! - 使用 `walkdir` 列举目录
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::{FileCollector, ReportFile};
pub use runner::{BatchOptions, BatchRunner, ProcessedFile};
