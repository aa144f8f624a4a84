//! # Kratky 图表生成
//!
//! 使用 `plotters` 库将多个样品的无量纲 Kratky 曲线叠加在同一坐标系中。
//!
//! ## 功能
//! - 每个样品一组散点（不连线），按颜色区分
//! - 图例: 名称 → 颜色
//! - 固定的青色虚线参考线，在 (1.7, 1.1) 处构成 "L" 形
//! - 支持 SVG 和 PNG 输出
//!
//! ## 依赖关系
//! - 被 `commands/plot.rs` 调用
//! - 使用 `kratky/transform.rs` 的 KratkySeries
//! - 使用 `plotters` 渲染图表

use crate::error::{KratkyError, Result};
use crate::kratky::KratkySeries;

use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use std::fs;
use std::path::{Path, PathBuf};

/// 参考线交点横坐标（球状粒子峰位 √3）
pub const GUIDE_X: f64 = 1.7;

/// 参考线交点纵坐标（球状粒子峰高 3/e）
pub const GUIDE_Y: f64 = 1.1;

/// 散点半径（像素）
const MARKER_SIZE: i32 = 4;

/// 图像输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Svg,
    Png,
}

impl ImageFormat {
    /// 文件扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Svg => "svg",
            ImageFormat::Png => "png",
        }
    }
}

/// 绘图选项
#[derive(Debug, Clone)]
pub struct PlotOptions {
    /// 图像宽度（像素）
    pub width: u32,
    /// 图像高度（像素）
    pub height: u32,
    /// 标题
    pub title: Option<String>,
    /// 输出格式
    pub format: ImageFormat,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            title: None,
            format: ImageFormat::Svg,
        }
    }
}

/// 为输出路径追加图像扩展名（不替换已有的点号部分）
pub fn with_image_extension(base: &Path, format: ImageFormat) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

/// 生成 Kratky 叠加散点图
pub fn generate_kratky_plot(
    series: &[(&KratkySeries, RGBColor)],
    output_path: &Path,
    options: &PlotOptions,
) -> Result<()> {
    match options.format {
        ImageFormat::Svg => {
            // 先渲染到内存，全部成功后才写出文件
            let mut svg = String::new();
            {
                let root = SVGBackend::with_string(&mut svg, (options.width, options.height))
                    .into_drawing_area();
                draw_kratky_chart(&root, series, options.title.as_deref())?;
                root.present()
                    .map_err(|e| KratkyError::PlotError(e.to_string()))?;
            }
            fs::write(output_path, svg).map_err(|e| KratkyError::FileWriteError {
                path: output_path.display().to_string(),
                source: e,
            })?;
        }
        ImageFormat::Png => {
            let drawn = {
                let root = BitMapBackend::new(output_path, (options.width, options.height))
                    .into_drawing_area();
                let result = draw_kratky_chart(&root, series, options.title.as_deref())
                    .and_then(|_| {
                        root.present()
                            .map_err(|e| KratkyError::PlotError(e.to_string()))
                    });
                result
            };
            // 位图后端在 drop 时会写出文件
            discard_on_error(output_path, drawn)?;
        }
    }

    Ok(())
}

/// 绘制失败时删除可能已写出的不完整图像
fn discard_on_error(output_path: &Path, drawn: Result<()>) -> Result<()> {
    if drawn.is_err() && output_path.exists() {
        if let Err(e) = fs::remove_file(output_path) {
            log::warn!(
                "Failed to remove incomplete image {}: {}",
                output_path.display(),
                e
            );
        }
    }
    drawn
}

/// 计算坐标轴范围 ((x_min, x_max), (y_min, y_max))
///
/// 只考虑有限值，并保证参考线完整可见。
pub fn axis_ranges(series: &[(&KratkySeries, RGBColor)]) -> ((f64, f64), (f64, f64)) {
    let finite = || series.iter().flat_map(|(s, _)| s.finite_points());

    let x_max = finite().map(|p| p.x).fold(GUIDE_X, f64::max);
    let y_max = finite().map(|p| p.y).fold(GUIDE_Y, f64::max);
    let y_min = finite().map(|p| p.y).fold(0.0, f64::min);

    ((0.0, x_max * 1.05), (y_min * 1.1, y_max * 1.1))
}

/// 绘制 Kratky 图表的核心逻辑
fn draw_kratky_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    series: &[(&KratkySeries, RGBColor)],
    title: Option<&str>,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)
        .map_err(|e| KratkyError::PlotError(format!("{:?}", e)))?;

    let ((x_min, x_max), (y_min, y_max)) = axis_ranges(series);

    let mut builder = ChartBuilder::on(root);
    builder
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60);
    if let Some(title) = title {
        builder.caption(title, ("sans-serif", 28).into_font());
    }

    let mut chart = builder
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| KratkyError::PlotError(format!("{:?}", e)))?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("sRg")
        .y_desc("(sRg)²·I(s)/I(0)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| KratkyError::PlotError(format!("{:?}", e)))?;

    for (s, color) in series {
        let color = *color;
        chart
            .draw_series(
                s.finite_points()
                    .map(|p| Circle::new((p.x, p.y), MARKER_SIZE, color.filled())),
            )
            .map_err(|e| KratkyError::PlotError(format!("{:?}", e)))?
            .label(s.label.clone())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled()));
    }

    // 参考线: 水平 (0, 1.1) → (1.7, 1.1)，竖直 (1.7, 0) → (1.7, 1.1)
    let guide_style = CYAN.stroke_width(2);
    chart
        .draw_series(DashedLineSeries::new(
            vec![(0.0, GUIDE_Y), (GUIDE_X, GUIDE_Y)],
            10,
            6,
            guide_style,
        ))
        .map_err(|e| KratkyError::PlotError(format!("{:?}", e)))?;
    chart
        .draw_series(DashedLineSeries::new(
            vec![(GUIDE_X, 0.0), (GUIDE_X, GUIDE_Y)],
            10,
            6,
            guide_style,
        ))
        .map_err(|e| KratkyError::PlotError(format!("{:?}", e)))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 14))
        .draw()
        .map_err(|e| KratkyError::PlotError(format!("{:?}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::KratkyPoint;

    fn series(points: Vec<(f64, f64)>) -> KratkySeries {
        KratkySeries {
            label: "s".to_string(),
            path: "s.out".to_string(),
            points: points.into_iter().map(|(x, y)| KratkyPoint { x, y }).collect(),
        }
    }

    #[test]
    fn test_with_image_extension() {
        assert_eq!(
            with_image_extension(Path::new("plots/run.v2"), ImageFormat::Svg),
            PathBuf::from("plots/run.v2.svg")
        );
        assert_eq!(
            with_image_extension(Path::new("kratky"), ImageFormat::Png),
            PathBuf::from("kratky.png")
        );
    }

    #[test]
    fn test_failed_render_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("kratky.png");
        std::fs::write(&output, b"partial").unwrap();

        let err = discard_on_error(&output, Err(KratkyError::PlotError("boom".into()))).unwrap_err();
        assert!(matches!(err, KratkyError::PlotError(_)));
        assert!(!output.exists());
    }

    #[test]
    fn test_successful_render_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("kratky.png");
        std::fs::write(&output, b"image").unwrap();

        discard_on_error(&output, Ok(())).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn test_axis_ranges_include_guides() {
        let s = series(vec![(0.3, 0.045), (0.6, 0.144)]);
        let ((x_min, x_max), (y_min, y_max)) = axis_ranges(&[(&s, RED)]);
        assert_eq!(x_min, 0.0);
        assert!((x_max - GUIDE_X * 1.05).abs() < 1e-12);
        assert_eq!(y_min, 0.0);
        assert!((y_max - GUIDE_Y * 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_axis_ranges_skip_non_finite() {
        let s = series(vec![(4.0, 2.0), (5.0, f64::INFINITY), (f64::NAN, 1.0), (3.0, -0.5)]);
        let ((_, x_max), (y_min, y_max)) = axis_ranges(&[(&s, RED)]);
        assert!((x_max - 4.0 * 1.05).abs() < 1e-12);
        assert!((y_max - 2.0 * 1.1).abs() < 1e-12);
        assert!((y_min + 0.5 * 1.1).abs() < 1e-12);
    }
}
