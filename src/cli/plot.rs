//! # plot 子命令 CLI 定义
//!
//! 将目录中所有报告的 Kratky 曲线叠加到一张图中。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/plot.rs`

use super::input::InputArgs;
use crate::kratky::plot::ImageFormat;
use crate::utils::color::DEFAULT_PALETTE;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// 图像输出格式
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum PlotFormat {
    /// SVG vector image
    #[default]
    Svg,
    /// PNG bitmap image
    Png,
}

impl From<PlotFormat> for ImageFormat {
    fn from(format: PlotFormat) -> Self {
        match format {
            PlotFormat::Svg => ImageFormat::Svg,
            PlotFormat::Png => ImageFormat::Png,
        }
    }
}

/// plot 子命令参数
#[derive(Args, Debug)]
pub struct PlotArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output file path without extension
    #[arg(short, long, default_value = "kratky_plot")]
    pub outfile: PathBuf,

    /// Marker colors, one per report (named colors or hex strings such as '#377eb8')
    #[arg(short, long, num_args = 1.., default_values = DEFAULT_PALETTE)]
    pub colors: Vec<String>,

    /// Reuse colors when there are more reports than colors
    #[arg(long, default_value_t = false)]
    pub cycle_colors: bool,

    /// Image format (the extension is appended to --outfile)
    #[arg(short, long, value_enum, default_value = "svg")]
    pub format: PlotFormat,

    /// Figure width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Figure height in pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Title for the plot
    #[arg(long)]
    pub title: Option<String>,
}
