//! # Kratky 分析模块
//!
//! 提供 Kratky 坐标变换、绘图与数据导出功能。
//!
//! ## 子模块
//! - `transform`: (S, J EXP) → 无量纲 Kratky 坐标
//! - `plot`: 多样品叠加散点图
//! - `export`: 数据导出
//!
//! ## 依赖关系
//! - 被 `batch/` 和 `commands/` 使用
//! - 使用 `models/scattering.rs`

pub mod export;
pub mod plot;
pub mod transform;

pub use transform::{DivisionMode, KratkySeries, KratkyTransformer};
