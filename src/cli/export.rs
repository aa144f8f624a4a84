//! # export 子命令 CLI 定义
//!
//! 将每个报告的 Kratky 序列导出为数据文件。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/export.rs`

use super::input::InputArgs;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 数据导出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum ExportFormat {
    /// CSV with label, s, j_exp, x, y columns
    Csv,
    /// Two-column XY text file with '#' comment header
    Xy,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xy => "xy",
        }
    }
}

/// export 子命令参数
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output directory for the exported files
    #[arg(short, long, default_value = "kratky_data")]
    pub output: PathBuf,

    /// Export format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: ExportFormat,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
