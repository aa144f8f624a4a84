//! # summary 子命令实现
//!
//! 以表格形式打印每个报告的 Rg、I(0)、数据行数、S 范围以及 Kratky 曲线最高点。
//!
//! ## 依赖关系
//! - 使用 `cli/summary.rs` 定义的 SummaryArgs
//! - 使用 `batch/` 模块收集与处理文件
//! - 使用 `tabled` 打印表格

use crate::batch::{BatchRunner, FileCollector, ProcessedFile};
use crate::cli::summary::SummaryArgs;
use crate::error::Result;
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};

/// 汇总表的一行
#[derive(Debug, Clone, Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "File")]
    pub file: String,
    #[tabled(rename = "Rg")]
    pub rg: String,
    #[tabled(rename = "I(0)")]
    pub i0: String,
    #[tabled(rename = "Rows")]
    pub rows: usize,
    #[tabled(rename = "S range")]
    pub s_range: String,
    #[tabled(rename = "Peak sRg")]
    pub peak_x: String,
    #[tabled(rename = "Peak height")]
    pub peak_y: String,
}

/// 执行 summary 命令
pub fn execute(args: SummaryArgs) -> Result<()> {
    output::print_header("GNOM Report Summary");

    let files = FileCollector::new(args.input.dir.clone())
        .sorted(args.input.sort)
        .collect()?;

    if files.is_empty() {
        output::print_warning(&format!(
            "No .out report files found in '{}'",
            args.input.dir.display()
        ));
        return Ok(());
    }

    let processed = BatchRunner::new(args.input.batch_options()).run(&files)?;
    let rows = summarize(&processed);

    println!("{}", Table::new(&rows));
    output::print_done(&format!("{} reports", rows.len()));

    Ok(())
}

/// 生成汇总表
pub fn summarize(processed: &[ProcessedFile]) -> Vec<SummaryRow> {
    processed
        .iter()
        .map(|item| {
            let record = &item.record;
            let peak = item.series.maximum();
            SummaryRow {
                label: record.label.clone(),
                file: Path::new(&record.path)
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| record.path.clone()),
                rg: format!("{:.3}", record.rg),
                i0: format!("{:.4e}", record.i0),
                rows: record.len(),
                s_range: record
                    .s_range()
                    .map(|(lo, hi)| format!("{:.4} - {:.4}", lo, hi))
                    .unwrap_or_else(|| "-".to_string()),
                peak_x: peak
                    .map(|p| format!("{:.3}", p.x))
                    .unwrap_or_else(|| "-".to_string()),
                peak_y: peak
                    .map(|p| format!("{:.3}", p.y))
                    .unwrap_or_else(|| "-".to_string()),
            }
        })
        .collect()
}
