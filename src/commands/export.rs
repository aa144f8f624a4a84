//! # export 子命令实现
//!
//! 将每个报告的 Kratky 序列导出为独立的数据文件
//! `<输出目录>/<文件名>_kratky.<csv|xy>`。
//!
//! 所有文件先全部解析成功再开始写出，任一文件失败则不写出任何数据。
//!
//! ## 依赖关系
//! - 使用 `cli/export.rs` 定义的 ExportArgs
//! - 使用 `batch/` 模块收集与处理文件
//! - 使用 `kratky/export.rs` 写出数据

use crate::batch::{BatchRunner, FileCollector, ProcessedFile};
use crate::cli::export::{ExportArgs, ExportFormat};
use crate::error::{KratkyError, Result};
use crate::kratky::export;
use crate::utils::output;

use std::fs;
use std::path::{Path, PathBuf};

/// 执行 export 命令
pub fn execute(args: ExportArgs) -> Result<()> {
    output::print_header("Kratky Data Export");

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

    output::print_info(&format!("Found {} report files", files.len()));

    let processed = BatchRunner::new(args.input.batch_options()).run(&files)?;

    fs::create_dir_all(&args.output).map_err(|e| KratkyError::FileWriteError {
        path: args.output.display().to_string(),
        source: e,
    })?;

    let mut written = 0;
    for item in &processed {
        let target = export_path(&args.output, Path::new(&item.record.path), args.format);

        if target.exists() && !args.overwrite {
            output::print_skip(&format!("Output exists: {}", target.display()));
            continue;
        }

        write_item(item, &target, args.format)?;
        output::print_export(&item.record.path, &target.display().to_string());
        written += 1;
    }

    output::print_separator();
    output::print_done(&format!(
        "Exported {} of {} reports to '{}'",
        written,
        processed.len(),
        args.output.display()
    ));

    Ok(())
}

/// 输出文件路径: `<dir>/<stem>_kratky.<ext>`
pub fn export_path(dir: &Path, source: &Path, format: ExportFormat) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("report");
    dir.join(format!("{}_kratky.{}", stem, format.extension()))
}

fn write_item(item: &ProcessedFile, target: &Path, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Csv => export::to_csv(&item.record, &item.series, target),
        ExportFormat::Xy => export::to_xy(&item.record, &item.series, target),
    }
}
