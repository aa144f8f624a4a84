//! # 批量执行器
//!
//! 按收集顺序逐个解析、变换报告文件。
//!
//! ## 功能
//! - 单线程顺序执行，保证输出顺序与收集顺序一致
//! - 进度条显示
//! - 任一文件失败立即中止整批（不产生部分结果）
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `parsers/gnom_out.rs` 解析报告
//! - 使用 `kratky/transform.rs` 计算 Kratky 坐标
//! - 使用 `utils/progress.rs` 创建进度条

use crate::batch::ReportFile;
use crate::error::Result;
use crate::kratky::{DivisionMode, KratkySeries, KratkyTransformer};
use crate::models::ScatteringRecord;
use crate::parsers::{self, ParseOptions};
use crate::utils::progress;

/// 批处理选项
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// 解析选项
    pub parse: ParseOptions,
    /// 非有限值处理方式
    pub division: DivisionMode,
}

/// 单个文件的处理结果
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    /// 解析结果
    pub record: ScatteringRecord,
    /// Kratky 序列
    pub series: KratkySeries,
}

/// 批量执行器
pub struct BatchRunner {
    options: BatchOptions,
    /// 是否显示进度条
    show_progress: bool,
}

impl BatchRunner {
    /// 创建新的批量执行器
    pub fn new(options: BatchOptions) -> Self {
        Self {
            options,
            show_progress: true,
        }
    }

    /// 设置是否显示进度条
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// 处理单个文件
    pub fn process(&self, file: &ReportFile) -> Result<ProcessedFile> {
        let record = parsers::parse_gnom_output(&file.path, &file.label, &self.options.parse)?;
        let series = KratkyTransformer::new(self.options.division).transform(&record)?;
        Ok(ProcessedFile { record, series })
    }

    /// 顺序处理文件列表，遇到第一个错误即返回
    pub fn run(&self, files: &[ReportFile]) -> Result<Vec<ProcessedFile>> {
        let pb = if self.show_progress {
            progress::create_progress_bar(files.len() as u64, "Parsing")
        } else {
            progress::create_hidden_bar()
        };

        let mut results = Vec::with_capacity(files.len());
        for file in files {
            log::debug!("Processing {} as '{}'", file.path.display(), file.label);

            match self.process(file) {
                Ok(processed) => results.push(processed),
                Err(e) => {
                    pb.abandon();
                    return Err(e);
                }
            }

            pb.inc(1);
        }

        pb.finish_and_clear();
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::FileCollector;
    use crate::error::KratkyError;
    use std::fs;

    fn report(rg: f64, i0: f64) -> String {
        format!(
            "      S          J EXP       ERROR       J REG       I REG
  0.1000E-01  0.5000E+02  0.1000E+01  0.4990E+02  0.5010E+02
  0.2000E-01  0.4000E+02  0.1000E+01  0.3990E+02  0.4010E+02

  Angular range   :   0.0100 to   0.0200
          Real Space: Rg = {rg}   I(0) = {i0}
  Real space Rg:   {rg} +-  0.1000E+00
  Real space I(0): {i0} +-  0.1000E+01
"
        )
    }

    #[test]
    fn test_run_preserves_order_and_values() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a_x_1_gnom.out"), report(30.0, 100.0)).unwrap();
        fs::write(dir.path().join("b_x_1_gnom.out"), report(20.0, 50.0)).unwrap();

        let files = FileCollector::new(dir.path()).sorted(true).collect().unwrap();
        let results = BatchRunner::new(BatchOptions::default())
            .show_progress(false)
            .run(&files)
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].series.label, "a_x_1");
        assert_eq!(results[1].series.label, "b_x_1");
        assert_eq!(results[0].record.rg, 30.0);
        assert!((results[0].series.points[0].y - 0.045).abs() < 1e-9);
        assert!((results[1].series.points[1].x - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_run_aborts_on_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a_1.out"), report(30.0, 100.0)).unwrap();
        fs::write(dir.path().join("b_1.out"), "no anchors here\n").unwrap();
        fs::write(dir.path().join("c_1.out"), report(30.0, 100.0)).unwrap();

        let files = FileCollector::new(dir.path()).sorted(true).collect().unwrap();
        let err = BatchRunner::new(BatchOptions::default())
            .show_progress(false)
            .run(&files)
            .unwrap_err();

        match err {
            KratkyError::MissingAnchor { path, .. } => assert!(path.ends_with("b_1.out")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_mode_applies_to_every_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a_1.out"), report(30.0, 0.0)).unwrap();

        let files = FileCollector::new(dir.path()).collect().unwrap();

        let propagated = BatchRunner::new(BatchOptions::default())
            .show_progress(false)
            .run(&files)
            .unwrap();
        assert!(propagated[0].series.points.iter().all(|p| !p.y.is_finite()));

        let strict = BatchOptions {
            division: DivisionMode::Strict,
            ..BatchOptions::default()
        };
        let err = BatchRunner::new(strict)
            .show_progress(false)
            .run(&files)
            .unwrap_err();
        assert!(matches!(err, KratkyError::NonFiniteValue { .. }));
    }
}
