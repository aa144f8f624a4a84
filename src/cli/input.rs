//! # 公共输入参数
//!
//! 所有子命令共享的报告目录与解析参数。
//!
//! ## 依赖关系
//! - 被 `cli/plot.rs`, `cli/export.rs`, `cli/summary.rs` 展开 (flatten)
//! - 转换为 `batch::BatchOptions`

use crate::batch::BatchOptions;
use crate::kratky::DivisionMode;
use crate::parsers::ParseOptions;

use clap::Args;
use std::path::PathBuf;

/// 报告目录与解析参数
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Directory containing GNOM .out report files
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Sort reports by file name instead of directory listing order
    #[arg(long, default_value_t = false)]
    pub sort: bool,

    /// Match the table anchors ('S  J EXP  ERROR', 'Real Space') case-insensitively
    #[arg(long, default_value_t = false)]
    pub ignore_case: bool,

    /// Fail on non-finite Kratky values (e.g. I(0) = 0) instead of propagating inf/NaN
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

impl InputArgs {
    /// 转换为批处理选项
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            parse: ParseOptions {
                case_sensitive: !self.ignore_case,
            },
            division: if self.strict {
                DivisionMode::Strict
            } else {
                DivisionMode::Propagate
            },
        }
    }
}
