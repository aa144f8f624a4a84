//! # Kratky - GNOM 报告的无量纲 Kratky 图工具
//!
//! 从距离分布分析 (GNOM) 的 .out 报告中提取实空间 Rg、I(0) 与实验散射曲线，
//! 变换为无量纲 Kratky 坐标，并把一个目录中的所有样品叠加绘制到一张图中。
//!
//! ## 子命令
//! - `plot`    - 叠加 Kratky 散点图 (SVG/PNG)
//! - `export`  - 导出每个样品的 Kratky 数据 (CSV/XY)
//! - `summary` - 打印 Rg / I(0) / Kratky 峰位汇总表
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (文件收集与顺序处理)
//!   │     ├── parsers/   (报告解析器)
//!   │     ├── kratky/    (变换、绘图、导出)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod error;
mod kratky;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            utils::output::print_error(&format!("  caused by: {}", cause));
            source = cause.source();
        }
        std::process::exit(1);
    }
}

/// 根据 -v / -q 初始化日志级别
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}
