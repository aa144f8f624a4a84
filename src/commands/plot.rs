//! # plot 子命令实现
//!
//! 收集目录中的 GNOM 报告，逐个解析并做 Kratky 变换，
//! 最后把所有样品叠加绘制到一张图中。
//!
//! ## 流程
//! 1. 解析颜色（无效颜色在读取任何文件之前报错）
//! 2. 收集 `.out` 文件并生成图例名称
//! 3. 按颜色策略为每个文件分配颜色
//! 4. 顺序解析与变换，任一文件失败即中止，不写出图像
//! 5. 绘图并保存
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的 PlotArgs
//! - 使用 `batch/` 模块收集与处理文件
//! - 使用 `kratky/plot.rs` 绘图
//! - 使用 `utils/color.rs` 解析颜色

use crate::batch::{BatchOptions, BatchRunner, FileCollector, ProcessedFile};
use crate::cli::plot::PlotArgs;
use crate::error::{KratkyError, Result};
use crate::kratky::plot::{self, PlotOptions};
use crate::kratky::KratkySeries;
use crate::utils::color::{self, ColorPolicy};
use crate::utils::output;

use plotters::style::RGBColor;
use std::fs;
use std::path::{Path, PathBuf};

/// 一次绘图运行的完整配置
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// 报告目录
    pub dir: PathBuf,
    /// 输出路径（不含扩展名）
    pub outfile: PathBuf,
    /// 调色板
    pub palette: Vec<RGBColor>,
    /// 颜色不足时的策略
    pub color_policy: ColorPolicy,
    /// 是否按文件名排序
    pub sorted: bool,
    /// 解析与变换选项
    pub batch: BatchOptions,
    /// 绘图选项
    pub plot: PlotOptions,
    /// 是否显示进度条
    pub progress: bool,
}

/// 执行 plot 命令
pub fn execute(args: PlotArgs) -> Result<()> {
    output::print_header("Kratky Plot");

    let palette = color::parse_colors(&args.colors)?;

    let config = PlotConfig {
        dir: args.input.dir.clone(),
        outfile: args.outfile.clone(),
        palette,
        color_policy: if args.cycle_colors {
            ColorPolicy::Cycle
        } else {
            ColorPolicy::Exact
        },
        sorted: args.input.sort,
        batch: args.input.batch_options(),
        plot: PlotOptions {
            width: args.width,
            height: args.height,
            title: args.title.clone(),
            format: args.format.into(),
        },
        progress: true,
    };

    output::print_info(&format!("Scanning '{}' for reports", config.dir.display()));

    let saved = run(&config)?;

    output::print_success(&format!("Kratky plot saved to '{}'", saved.display()));
    Ok(())
}

/// 已解析、已分配颜色、等待绘制的样品
#[derive(Debug)]
pub struct PreparedPlot {
    /// 按收集顺序排列的处理结果
    pub processed: Vec<ProcessedFile>,
    /// 与 `processed` 一一对应的颜色
    pub colors: Vec<RGBColor>,
}

impl PreparedPlot {
    /// 绘图用的 (序列, 颜色) 列表
    pub fn series(&self) -> Vec<(&KratkySeries, RGBColor)> {
        self.processed
            .iter()
            .map(|item| &item.series)
            .zip(self.colors.iter().copied())
            .collect()
    }
}

/// 批处理主流程: 收集 → 解析/变换 → 绘图
///
/// 返回写出的图像路径。出错时不写出任何文件。
pub fn run(config: &PlotConfig) -> Result<PathBuf> {
    let prepared = prepare(config)?;

    let output_path = plot::with_image_extension(&config.outfile, config.plot.format);
    ensure_parent_dir(&output_path)?;
    plot::generate_kratky_plot(&prepared.series(), &output_path, &config.plot)?;

    Ok(output_path)
}

/// 收集文件、分配颜色并逐个解析与变换
///
/// 所有状态都在本次调用内创建，多次调用互不影响。
pub fn prepare(config: &PlotConfig) -> Result<PreparedPlot> {
    let collector = FileCollector::new(config.dir.clone()).sorted(config.sorted);
    let files = collector.collect()?;

    if files.is_empty() {
        return Err(KratkyError::NoFilesFound {
            dir: collector.dir().display().to_string(),
            suffix: collector.suffix().to_string(),
        });
    }

    output::print_info(&format!("Found {} report files", files.len()));

    let colors = color::assign_colors(&config.palette, files.len(), config.color_policy)?;

    let processed = BatchRunner::new(config.batch)
        .show_progress(config.progress)
        .run(&files)?;

    for item in &processed {
        output::print_record(
            &item.series.label,
            item.record.rg,
            item.record.i0,
            item.series.points.len(),
        );
        let skipped = item.series.points.len() - item.series.finite_points().count();
        if skipped > 0 {
            output::print_warning(&format!(
                "{} ({}): {} non-finite point(s) will not be drawn",
                item.series.label, item.series.path, skipped
            ));
        }
    }

    Ok(PreparedPlot { processed, colors })
}

/// 确保输出文件所在目录存在
fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| KratkyError::FileWriteError {
                path: parent.display().to_string(),
                source: e,
            })
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "      S          J EXP       ERROR       J REG       I REG
  0.1000E-01  0.5000E+02  0.1000E+01  0.4990E+02  0.5010E+02
  0.2000E-01  0.4000E+02  0.1000E+01  0.3990E+02  0.4010E+02

  Angular range   :   0.0100 to   0.0200
          Real Space: Rg =   0.3000E+02    I(0) =   0.1000E+03
  Real space Rg:   0.3000E+02 +-  0.1000E+00
  Real space I(0): 0.1000E+03 +-  0.1000E+01
";

    fn config(dir: &Path, outfile: &Path, colors: &[&str], policy: ColorPolicy) -> PlotConfig {
        PlotConfig {
            dir: dir.to_path_buf(),
            outfile: outfile.to_path_buf(),
            palette: color::parse_colors(colors).unwrap(),
            color_policy: policy,
            sorted: true,
            batch: BatchOptions::default(),
            plot: PlotOptions::default(),
            progress: false,
        }
    }

    #[test]
    fn test_prepare_pairs_labels_and_colors() {
        let data = tempfile::tempdir().unwrap();
        fs::write(data.path().join("lyso_ph7_01_gnom.out"), REPORT).unwrap();
        fs::write(data.path().join("bsa_ph7_01_gnom.out"), REPORT).unwrap();
        fs::write(data.path().join("readme.txt"), "not a report").unwrap();

        let out = tempfile::tempdir().unwrap();
        let cfg = config(data.path(), &out.path().join("k"), &["red", "blue"], ColorPolicy::Exact);
        let prepared = prepare(&cfg).unwrap();

        let series = prepared.series();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].0.label, "bsa_ph7_01");
        assert_eq!(series[0].1, RGBColor(255, 0, 0));
        assert_eq!(series[1].0.label, "lyso_ph7_01");
        assert_eq!(series[1].1, RGBColor(0, 0, 255));
        assert!((series[1].0.points[1].y - 0.144).abs() < 1e-9);
    }

    #[test]
    fn test_missing_anchor_writes_nothing() {
        let data = tempfile::tempdir().unwrap();
        fs::write(data.path().join("a_1.out"), REPORT).unwrap();
        fs::write(data.path().join("b_1.out"), REPORT.replace("J EXP", "J-EXP")).unwrap();

        let out = tempfile::tempdir().unwrap();
        let base = out.path().join("kratky");
        let err = run(&config(data.path(), &base, &["red", "blue"], ColorPolicy::Exact)).unwrap_err();

        assert!(matches!(err, KratkyError::MissingAnchor { .. }));
        assert!(!out.path().join("kratky.svg").exists());
    }

    #[test]
    fn test_color_mismatch_writes_nothing() {
        let data = tempfile::tempdir().unwrap();
        for name in ["a_1.out", "b_1.out", "c_1.out"] {
            fs::write(data.path().join(name), REPORT).unwrap();
        }

        let out = tempfile::tempdir().unwrap();
        let base = out.path().join("kratky");
        let err = run(&config(data.path(), &base, &["red", "blue"], ColorPolicy::Exact)).unwrap_err();
        assert!(matches!(err, KratkyError::ColorCountMismatch { colors: 2, files: 3 }));
        assert!(!out.path().join("kratky.svg").exists());

        let prepared = prepare(&config(data.path(), &base, &["red", "blue"], ColorPolicy::Cycle)).unwrap();
        assert_eq!(prepared.colors, vec![RGBColor(255, 0, 0), RGBColor(0, 0, 255), RGBColor(255, 0, 0)]);
    }

    #[test]
    fn test_empty_directory() {
        let data = tempfile::tempdir().unwrap();
        fs::write(data.path().join("notes.txt"), REPORT).unwrap();

        let out = tempfile::tempdir().unwrap();
        let err = run(&config(data.path(), &out.path().join("k"), &["red"], ColorPolicy::Exact))
            .unwrap_err();
        assert!(matches!(err, KratkyError::NoFilesFound { .. }));
        assert!(!out.path().join("k.svg").exists());
    }

    #[test]
    fn test_repeated_runs_are_independent() {
        let data = tempfile::tempdir().unwrap();
        fs::write(data.path().join("a_1.out"), REPORT).unwrap();

        let out = tempfile::tempdir().unwrap();
        let cfg = config(data.path(), &out.path().join("k"), &["red"], ColorPolicy::Exact);
        // 第二次运行仍然只有一个文件，一个颜色足够
        let first = prepare(&cfg).unwrap();
        let second = prepare(&cfg).unwrap();
        assert_eq!(second.processed.len(), 1);
        assert_eq!(first.processed[0].record, second.processed[0].record);
        assert_eq!(first.processed[0].series, second.processed[0].series);
    }
}
