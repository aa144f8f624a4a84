//! # 统一错误处理模块
//!
//! 定义 Kratky 工具的所有错误类型，使用 `thiserror` 派生。
//! 任何一个文件出错都会中止整个批处理，因此每个与文件相关的错误都携带文件路径。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// Kratky 统一错误类型
#[derive(Error, Debug)]
pub enum KratkyError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: String },

    #[error("No files ending in '{suffix}' found in {dir}")]
    NoFilesFound { dir: String, suffix: String },

    // ─────────────────────────────────────────────────────────────
    // 报告文件解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("{path}: missing anchor line '{anchor}'")]
    MissingAnchor { path: String, anchor: String },

    #[error("{path}:{line}: cannot read value after '{marker}'\nReason: {reason}")]
    MalformedValue {
        path: String,
        line: usize,
        marker: String,
        reason: String,
    },

    #[error("{path}:{line}: column '{column}' is not a number in row '{content}'")]
    MalformedRow {
        path: String,
        line: usize,
        column: String,
        content: String,
    },

    #[error("{path}: empty data table (rows {start}..{end})")]
    EmptyTable {
        path: String,
        start: usize,
        end: usize,
    },

    // ─────────────────────────────────────────────────────────────
    // 变换错误
    // ─────────────────────────────────────────────────────────────
    #[error("{path}: non-finite Kratky value at row {row} (I(0) = {i0})")]
    NonFiniteValue { path: String, row: usize, i0: f64 },

    // ─────────────────────────────────────────────────────────────
    // 绘图错误
    // ─────────────────────────────────────────────────────────────
    #[error("Not enough colors: {colors} color(s) for {files} file(s) (use --cycle-colors to reuse them)")]
    ColorCountMismatch { colors: usize, files: usize },

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Plot rendering failed: {0}")]
    PlotError(String),

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, KratkyError>;
