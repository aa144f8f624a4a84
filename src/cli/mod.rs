//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `plot`: 叠加 Kratky 散点图
//! - `export`: 导出每个样品的 Kratky 数据
//! - `summary`: 打印每个样品的 Rg / I(0) 汇总表
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: input, plot, export, summary

pub mod export;
pub mod input;
pub mod plot;
pub mod summary;

use clap::{Parser, Subcommand};

/// Kratky - GNOM 报告的无量纲 Kratky 图工具
#[derive(Parser)]
#[command(name = "kratky")]
#[command(version)]
#[command(about = "Overlay dimensionless Kratky plots from GNOM distance-distribution reports", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, default_value_t = false, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Overlay the Kratky plots of all .out reports in a directory
    Plot(plot::PlotArgs),

    /// Export the Kratky series of each report to CSV or XY files
    Export(export::ExportArgs),

    /// Print Rg, I(0) and the Kratky maximum of each report
    Summary(summary::SummaryArgs),
}
