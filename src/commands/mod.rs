//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `kratky/`, `utils/`
//! - 子模块: plot, export, summary

pub mod export;
pub mod plot;
pub mod summary;

use crate::cli::Commands;
use crate::error::Result;

/// 执行命令
pub fn run(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Plot(args) => plot::execute(args),
        Commands::Export(args) => export::execute(args),
        Commands::Summary(args) => summary::execute(args),
    }
}
