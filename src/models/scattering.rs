//! # 小角散射数据模型
//!
//! 存储从单个 GNOM 报告中提取的 Rg、I(0) 与 (S, J EXP) 数据表，
//! 以及变换后的 Kratky 坐标点。
//!
//! ## 依赖关系
//! - 被 `parsers/gnom_out.rs` 构造
//! - 被 `kratky/transform.rs`, `kratky/export.rs`, `commands/` 使用

use serde::{Deserialize, Serialize};

/// 实验散射曲线上的一个点
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatteringPoint {
    /// 散射矢量模 S
    pub s: f64,
    /// 实验强度 J EXP
    pub j_exp: f64,
}

/// 单个报告文件的提取结果
///
/// 每次批处理运行时为每个文件创建一次，之后不再修改。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatteringRecord {
    /// 图例名称
    pub label: String,

    /// 源文件路径
    pub path: String,

    /// 实空间回转半径 Rg
    pub rg: f64,

    /// 实空间零角强度 I(0)
    pub i0: f64,

    /// (S, J EXP) 数据表，保持文件中的行顺序
    pub table: Vec<ScatteringPoint>,
}

impl ScatteringRecord {
    pub fn new(
        label: impl Into<String>,
        path: impl Into<String>,
        rg: f64,
        i0: f64,
        table: Vec<ScatteringPoint>,
    ) -> Self {
        ScatteringRecord {
            label: label.into(),
            path: path.into(),
            rg,
            i0,
            table,
        }
    }

    /// 数据行数
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// S 的取值范围 (首行, 末行)
    pub fn s_range(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        Some((self.table[0].s, self.table[self.len() - 1].s))
    }
}

/// 无量纲 Kratky 坐标: x = S·Rg, y = (S·Rg)²·J/I(0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KratkyPoint {
    pub x: f64,
    pub y: f64,
}

impl KratkyPoint {
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
