//! # 美化输出工具
//!
//! 提供统一的终端状态行样式。诊断信息走 `log`，这里只负责给用户看的结果。
//!
//! ## 依赖关系
//! - 被 `main.rs` 和所有 `commands/` 模块使用
//! - 使用 `colored` crate

use colored::Colorize;

/// 标题栏宽度
const RULE_WIDTH: usize = 60;

/// 打印成功消息
pub fn print_success(msg: &str) {
    println!("{} {}", "[OK]".green().bold(), msg);
}

/// 打印错误消息（stderr）
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    println!("{} {}", "[*]".blue().bold(), msg);
}

/// 打印跳过消息
pub fn print_skip(msg: &str) {
    println!("{} {}", "[SKIP]".dimmed(), msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    println!("{} {}", "[DONE]".green().bold(), msg);
}

/// 打印单个样品的提取结果
pub fn print_record(label: &str, rg: f64, i0: f64, points: usize) {
    println!(
        "{} {:<24} Rg = {:>9.3}  I(0) = {:>11.4e}  {} points",
        "[OK]".green().bold(),
        label.cyan(),
        rg,
        i0,
        points
    );
}

/// 打印导出消息: 源报告 -> 数据文件
pub fn print_export(source: &str, target: &str) {
    println!(
        "{} {} {} {}",
        "[OK]".green().bold(),
        source.dimmed(),
        "->".cyan(),
        target
    );
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(RULE_WIDTH);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(RULE_WIDTH).dimmed());
}
