//! # GNOM .out 报告解析器
//!
//! 解析距离分布分析 (GNOM) 的输出报告 .out，提取实空间 Rg、I(0)
//! 以及 (S, J EXP) 实验散射数据表。
//!
//! ## 定位方式
//! 报告格式松散，不使用固定行号，而是按内容锚点定位：
//! - 标量行: 第一个包含 `Real space Rg` / `Real space I(0)` 的行，取第 4 个空白分隔字段
//! - 数据表: 表头行 `S  J EXP  ERROR` 之后一行开始，到 `Real Space` 行之前两行结束（不含）
//!
//! ## 行号空间
//! 锚点搜索在去掉空行的视图上进行，但视图中保留每行在原文件中的行号，
//! 因此 `TableBounds` 中的所有下标都是原文件行号（从 0 开始）。
//! 数据行随后从原文件的 [start, end) 区间中读取。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs`, `commands/` 使用
//! - 使用 `models/scattering.rs`
//! - 使用 `regex` 匹配表格锚点

use crate::error::{KratkyError, Result};
use crate::models::{ScatteringPoint, ScatteringRecord};

use regex::{Regex, RegexBuilder};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Rg 标量行标记
pub const RG_MARKER: &str = "Real space Rg";

/// I(0) 标量行标记
pub const I0_MARKER: &str = "Real space I(0)";

/// 标量值所在的空白分隔字段下标
const SCALAR_TOKEN_INDEX: usize = 3;

/// 表头锚点
const TABLE_HEADER_PATTERN: &str = r"S\s*J EXP\s*\(?ERROR\)?";

/// 表尾锚点
const TABLE_END_PATTERN: &str = r"Real\s*Space";

/// 表尾锚点与最后一行数据之间的行距
const TABLE_END_OFFSET: usize = 2;

/// 数据表的五列，只保留前两列
pub const TABLE_COLUMNS: [&str; 5] = ["S", "J EXP", "ERROR", "J REG", "I REG"];

/// 推断列宽时最多检查的行数
const INFER_ROWS: usize = 100;

/// 解析选项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// 表格锚点是否区分大小写
    pub case_sensitive: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
        }
    }
}

/// 数据表在原文件中的位置（均为原文件行号）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableBounds {
    /// 表头行
    pub header: usize,
    /// `Real Space` 行
    pub boundary: usize,
    /// 第一行数据
    pub start: usize,
    /// 数据结束位置（不含）
    pub end: usize,
}

/// 解析 GNOM .out 文件
pub fn parse_gnom_output(path: &Path, label: &str, options: &ParseOptions) -> Result<ScatteringRecord> {
    let path_str = path.display().to_string();

    let rg = read_scalar_from_file(path, RG_MARKER)?;
    let i0 = read_scalar_from_file(path, I0_MARKER)?;

    let content = fs::read_to_string(path).map_err(|e| KratkyError::FileReadError {
        path: path_str.clone(),
        source: e,
    })?;
    let table = parse_table(&content, &path_str, options)?;

    log::debug!(
        "{}: Rg = {}, I(0) = {}, {} rows",
        path_str,
        rg,
        i0,
        table.len()
    );

    Ok(ScatteringRecord::new(label, path_str, rg, i0, table))
}

/// 逐行读取文件，返回第一个包含 `marker` 的行中的标量值
pub fn read_scalar_from_file(path: &Path, marker: &str) -> Result<f64> {
    let file = File::open(path).map_err(|e| KratkyError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    read_scalar(BufReader::new(file), &path.display().to_string(), marker)
}

/// 在行流中查找第一个包含 `marker` 的行并读取第 4 个字段
///
/// 找到后立即返回，不读取剩余内容。
pub fn read_scalar<R: BufRead>(reader: R, path: &str, marker: &str) -> Result<f64> {
    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| KratkyError::FileReadError {
            path: path.to_string(),
            source: e,
        })?;

        if !line.contains(marker) {
            continue;
        }

        let malformed = |reason: String| KratkyError::MalformedValue {
            path: path.to_string(),
            line: idx + 1,
            marker: marker.to_string(),
            reason,
        };

        let token = line
            .split_whitespace()
            .nth(SCALAR_TOKEN_INDEX)
            .ok_or_else(|| malformed(format!("expected at least {} fields", SCALAR_TOKEN_INDEX + 1)))?;

        return token
            .parse::<f64>()
            .map_err(|e| malformed(format!("'{}': {}", token, e)));
    }

    Err(KratkyError::MissingAnchor {
        path: path.to_string(),
        anchor: marker.to_string(),
    })
}

/// 定位数据表
pub fn locate_table(content: &str, path: &str, options: &ParseOptions) -> Result<TableBounds> {
    let header_re = build_anchor(TABLE_HEADER_PATTERN, options)?;
    let end_re = build_anchor(TABLE_END_PATTERN, options)?;

    // 去掉空行的视图，保留原文件行号
    let non_blank: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();

    let find = |re: &Regex, anchor: &str| -> Result<usize> {
        non_blank
            .iter()
            .find(|(_, line)| re.is_match(line))
            .map(|(idx, _)| *idx)
            .ok_or_else(|| KratkyError::MissingAnchor {
                path: path.to_string(),
                anchor: anchor.to_string(),
            })
    };

    let boundary = find(&end_re, "Real Space")?;
    let header = find(&header_re, "S  J EXP  ERROR")?;

    Ok(TableBounds {
        header,
        boundary,
        start: header + 1,
        end: boundary.saturating_sub(TABLE_END_OFFSET),
    })
}

/// 解析 (S, J EXP) 数据表
pub fn parse_table(content: &str, path: &str, options: &ParseOptions) -> Result<Vec<ScatteringPoint>> {
    let bounds = locate_table(content, path, options)?;

    let empty = || KratkyError::EmptyTable {
        path: path.to_string(),
        start: bounds.start,
        end: bounds.end,
    };

    if bounds.start >= bounds.end {
        return Err(empty());
    }

    // 原文件行号空间中的 [start, end)，跳过空行
    let rows: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .skip(bounds.start)
        .take(bounds.end - bounds.start)
        .filter(|(_, line)| !line.trim().is_empty())
        .collect();

    if rows.is_empty() {
        return Err(empty());
    }

    log::debug!(
        "{}: header at line {}, boundary at line {}, {} data rows",
        path,
        bounds.header + 1,
        bounds.boundary + 1,
        rows.len()
    );

    let spans = infer_column_spans(rows.iter().take(INFER_ROWS).map(|(_, line)| *line));
    let fixed_width = spans.len() == TABLE_COLUMNS.len();
    if !fixed_width {
        log::debug!(
            "{}: inferred {} columns instead of {}, splitting rows on whitespace",
            path,
            spans.len(),
            TABLE_COLUMNS.len()
        );
    }

    rows.iter()
        .map(|(idx, line)| {
            let (s, j_exp) = if fixed_width {
                (
                    fixed_field(line, spans[0]).map(str::trim),
                    fixed_field(line, spans[1]).map(str::trim),
                )
            } else {
                // 空白分隔时每行必须恰好五个字段，否则无法确定列的归属
                let fields: Vec<&str> = line.split_whitespace().collect();
                if fields.len() != TABLE_COLUMNS.len() {
                    let column = fields.len().min(TABLE_COLUMNS.len() - 1);
                    return Err(malformed_row(path, *idx, column, line));
                }
                (Some(fields[0]), Some(fields[1]))
            };

            Ok(ScatteringPoint {
                s: parse_cell(s, 0, *idx, line, path)?,
                j_exp: parse_cell(j_exp, 1, *idx, line, path)?,
            })
        })
        .collect()
}

/// 推断定宽列的 [start, end) 字符区间
///
/// 任一行在该位置有非空白字符即视为列内容，连续的列内容构成一列。
pub fn infer_column_spans<'a, I>(rows: I) -> Vec<(usize, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut occupied: Vec<bool> = Vec::new();

    for row in rows {
        for (pos, ch) in row.char_indices() {
            if pos >= occupied.len() {
                occupied.resize(pos + 1, false);
            }
            if !ch.is_whitespace() {
                occupied[pos] = true;
            }
        }
    }

    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    for (pos, &filled) in occupied.iter().enumerate() {
        match (filled, start) {
            (true, None) => start = Some(pos),
            (false, Some(s)) => {
                spans.push((s, pos));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        spans.push((s, occupied.len()));
    }

    spans
}

/// 取出定宽字段；行过短时为空字段
fn fixed_field(line: &str, (start, end): (usize, usize)) -> Option<&str> {
    let len = line.len();
    line.get(start.min(len)..end.min(len))
}

/// 将单元格转换为浮点数
///
/// 定宽模式下的空单元格记为 NaN，非数字内容报错。
fn parse_cell(cell: Option<&str>, column: usize, idx: usize, line: &str, path: &str) -> Result<f64> {
    match cell {
        Some("") => Ok(f64::NAN),
        Some(text) => text
            .parse::<f64>()
            .map_err(|_| malformed_row(path, idx, column, line)),
        None => Err(malformed_row(path, idx, column, line)),
    }
}

fn malformed_row(path: &str, idx: usize, column: usize, line: &str) -> KratkyError {
    KratkyError::MalformedRow {
        path: path.to_string(),
        line: idx + 1,
        column: TABLE_COLUMNS[column].to_string(),
        content: line.trim().to_string(),
    }
}

fn build_anchor(pattern: &str, options: &ParseOptions) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(!options.case_sensitive)
        .build()
        .map_err(|e| KratkyError::InvalidArgument(format!("anchor pattern '{}': {}", pattern, e)))
}
