//! # 颜色解析与分配
//!
//! 将命令行颜色记号（`#rrggbb`、`#rgb` 或常用颜色名）解析为 `plotters` 颜色，
//! 并按策略为每个文件分配颜色。
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 使用
//! - 使用 `plotters` 的 RGBColor

use crate::error::{KratkyError, Result};

use plotters::style::RGBColor;

/// 默认调色板 (ColorBrewer Set1)
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33",
];

/// 颜色不足时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorPolicy {
    /// 颜色数必须不少于文件数
    #[default]
    Exact,
    /// 循环使用颜色
    Cycle,
}

/// 解析单个颜色记号
pub fn parse_color(token: &str) -> Result<RGBColor> {
    let token = token.trim();
    let invalid = || KratkyError::InvalidColor(token.to_string());

    if let Some(hex) = token.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(invalid);
    }

    let rgb = match token.to_lowercase().as_str() {
        "r" | "red" => (255, 0, 0),
        "g" | "green" => (0, 128, 0),
        "b" | "blue" => (0, 0, 255),
        "c" | "cyan" => (0, 255, 255),
        "m" | "magenta" => (255, 0, 255),
        "y" | "yellow" => (255, 255, 0),
        "k" | "black" => (0, 0, 0),
        "w" | "white" => (255, 255, 255),
        "orange" => (255, 165, 0),
        "purple" => (128, 0, 128),
        "brown" => (165, 42, 42),
        "pink" => (255, 192, 203),
        "gray" | "grey" => (128, 128, 128),
        "olive" => (128, 128, 0),
        "navy" => (0, 0, 128),
        "teal" => (0, 128, 128),
        _ => return Err(invalid()),
    };

    Ok(RGBColor(rgb.0, rgb.1, rgb.2))
}

/// 解析颜色列表
pub fn parse_colors<S: AsRef<str>>(tokens: &[S]) -> Result<Vec<RGBColor>> {
    tokens.iter().map(|t| parse_color(t.as_ref())).collect()
}

/// 为 `count` 个序列分配颜色
pub fn assign_colors(palette: &[RGBColor], count: usize, policy: ColorPolicy) -> Result<Vec<RGBColor>> {
    if count == 0 {
        return Ok(Vec::new());
    }

    match policy {
        ColorPolicy::Exact if palette.len() < count => Err(KratkyError::ColorCountMismatch {
            colors: palette.len(),
            files: count,
        }),
        ColorPolicy::Cycle if palette.is_empty() => Err(KratkyError::ColorCountMismatch {
            colors: 0,
            files: count,
        }),
        _ => Ok(palette.iter().copied().cycle().take(count).collect()),
    }
}

fn parse_hex(hex: &str) -> Option<RGBColor> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match hex.len() {
        6 => Some(RGBColor(
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(RGBColor(digit(0)?, digit(1)?, digit(2)?))
        }
        _ => None,
    }
}
