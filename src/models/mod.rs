//! # 数据模型模块
//!
//! 定义 GNOM 报告提取结果和 Kratky 坐标的数据模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `kratky/` 和 `commands/` 使用
//! - 子模块: scattering

pub mod scattering;

pub use scattering::{KratkyPoint, ScatteringPoint, ScatteringRecord};
