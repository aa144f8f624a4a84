//! # Kratky 坐标变换
//!
//! 将 (S, J EXP) 数据表变换为无量纲 Kratky 坐标：
//!
//! ```text
//! x = S·Rg
//! y = (S·Rg)² · J EXP / I(0)
//! ```
//!
//! 默认按 IEEE-754 语义处理 I(0) = 0 等情况（结果为 inf/NaN，不报错）；
//! 严格模式下遇到第一个非有限值即报错。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs`, `commands/` 调用
//! - 使用 `models/scattering.rs`

use crate::error::{KratkyError, Result};
use crate::models::{KratkyPoint, ScatteringRecord};

/// 除零/非有限值处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DivisionMode {
    /// 按浮点语义传播 inf/NaN
    #[default]
    Propagate,
    /// 出现非有限值时报错
    Strict,
}

/// 一个文件变换后的 Kratky 序列
#[derive(Debug, Clone, PartialEq)]
pub struct KratkySeries {
    /// 图例名称
    pub label: String,
    /// 源文件路径
    pub path: String,
    /// 与数据表行顺序一致的坐标点
    pub points: Vec<KratkyPoint>,
}

impl KratkySeries {
    /// 有限值坐标点（绘图时使用）
    pub fn finite_points(&self) -> impl Iterator<Item = &KratkyPoint> {
        self.points.iter().filter(|p| p.is_finite())
    }

    /// Kratky 曲线最高点
    pub fn maximum(&self) -> Option<KratkyPoint> {
        self.finite_points()
            .copied()
            .fold(None, |best: Option<KratkyPoint>, p| match best {
                Some(b) if b.y >= p.y => Some(b),
                _ => Some(p),
            })
    }
}

/// Kratky 变换器
pub struct KratkyTransformer {
    mode: DivisionMode,
}

impl KratkyTransformer {
    /// 创建新的变换器
    pub fn new(mode: DivisionMode) -> Self {
        Self { mode }
    }

    /// 变换单个记录
    pub fn transform(&self, record: &ScatteringRecord) -> Result<KratkySeries> {
        let points = transform(record);

        if self.mode == DivisionMode::Strict {
            if let Some(row) = points.iter().position(|p| !p.is_finite()) {
                return Err(KratkyError::NonFiniteValue {
                    path: record.path.clone(),
                    row: row + 1,
                    i0: record.i0,
                });
            }
        }

        Ok(KratkySeries {
            label: record.label.clone(),
            path: record.path.clone(),
            points,
        })
    }
}

/// 按行变换，保持行顺序
pub fn transform(record: &ScatteringRecord) -> Vec<KratkyPoint> {
    record
        .table
        .iter()
        .map(|row| {
            let x = row.s * record.rg;
            KratkyPoint {
                x,
                y: x * x * (row.j_exp / record.i0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScatteringPoint;

    const TOL: f64 = 1e-9;

    fn record(i0: f64) -> ScatteringRecord {
        ScatteringRecord::new(
            "sample",
            "sample.out",
            30.0,
            i0,
            vec![
                ScatteringPoint { s: 0.01, j_exp: 50.0 },
                ScatteringPoint { s: 0.02, j_exp: 40.0 },
            ],
        )
    }

    #[test]
    fn test_transform_known_values() {
        let points = transform(&record(100.0));
        assert_eq!(points.len(), 2);
        assert!((points[0].x - 0.3).abs() < TOL);
        assert!((points[0].y - 0.045).abs() < TOL);
        assert!((points[1].x - 0.6).abs() < TOL);
        assert!((points[1].y - 0.144).abs() < TOL);
    }

    #[test]
    fn test_zero_i0_propagates() {
        let series = KratkyTransformer::new(DivisionMode::Propagate)
            .transform(&record(0.0))
            .unwrap();
        assert!(series.points.iter().all(|p| !p.y.is_finite()));
        assert_eq!(series.finite_points().count(), 0);
        assert_eq!(series.maximum(), None);
    }

    #[test]
    fn test_zero_i0_strict() {
        let err = KratkyTransformer::new(DivisionMode::Strict)
            .transform(&record(0.0))
            .unwrap_err();
        match err {
            KratkyError::NonFiniteValue { path, row, .. } => {
                assert_eq!(path, "sample.out");
                assert_eq!(row, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_strict_accepts_finite_series() {
        let series = KratkyTransformer::new(DivisionMode::Strict)
            .transform(&record(100.0))
            .unwrap();
        assert_eq!(series.label, "sample");
        assert_eq!(series.points, transform(&record(100.0)));
    }

    #[test]
    fn test_maximum() {
        let series = KratkyTransformer::new(DivisionMode::default())
            .transform(&record(100.0))
            .unwrap();
        let max = series.maximum().unwrap();
        assert!((max.x - 0.6).abs() < TOL);
    }
}
