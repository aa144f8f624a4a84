//! # Kratky 数据导出
//!
//! 导出单个样品的 Kratky 序列到 CSV 和 XY 格式。
//!
//! ## 支持格式
//! - CSV: label, s, j_exp, x, y（每行对应数据表中的一行）
//! - XY: 两列 x y，`#` 开头的注释行记录样品信息
//!
//! ## 依赖关系
//! - 被 `commands/export.rs` 调用
//! - 使用 `models/scattering.rs`, `kratky/transform.rs`
//! - 使用 `csv` 库写入 CSV 文件

use crate::error::{KratkyError, Result};
use crate::kratky::KratkySeries;
use crate::models::ScatteringRecord;

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// CSV 输出行
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    label: &'a str,
    s: f64,
    j_exp: f64,
    x: f64,
    y: f64,
}

/// 导出为 CSV 格式
pub fn to_csv(record: &ScatteringRecord, series: &KratkySeries, output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for (row, point) in record.table.iter().zip(&series.points) {
        wtr.serialize(CsvRow {
            label: &series.label,
            s: row.s,
            j_exp: row.j_exp,
            x: point.x,
            y: point.y,
        })?;
    }

    wtr.flush().map_err(|e| KratkyError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}

/// 导出为 XY 格式
pub fn to_xy(record: &ScatteringRecord, series: &KratkySeries, output_path: &Path) -> Result<()> {
    let write_err = |e: std::io::Error| KratkyError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    };

    let file = File::create(output_path).map_err(write_err)?;
    let mut out = BufWriter::new(file);

    writeln!(out, "# Kratky plot: {}", series.label).map_err(write_err)?;
    writeln!(out, "# Source: {}", record.path).map_err(write_err)?;
    writeln!(out, "# Rg = {}, I(0) = {}", record.rg, record.i0).map_err(write_err)?;
    writeln!(out, "# Columns: sRg, (sRg)^2*I(s)/I(0)").map_err(write_err)?;

    for point in &series.points {
        writeln!(out, "{:.6}\t{:.6}", point.x, point.y).map_err(write_err)?;
    }

    out.flush().map_err(write_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kratky::transform::transform;
    use crate::models::ScatteringPoint;

    fn sample() -> (ScatteringRecord, KratkySeries) {
        let record = ScatteringRecord::new(
            "lyso_ph7_01",
            "lyso_ph7_01_gnom.out",
            30.0,
            100.0,
            vec![
                ScatteringPoint { s: 0.01, j_exp: 50.0 },
                ScatteringPoint { s: 0.02, j_exp: 40.0 },
            ],
        );
        let series = KratkySeries {
            label: record.label.clone(),
            path: record.path.clone(),
            points: transform(&record),
        };
        (record, series)
    }

    #[test]
    fn test_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.csv");
        let (record, series) = sample();

        to_csv(&record, &series, &output).unwrap();

        let mut rdr = csv::Reader::from_path(&output).unwrap();
        let headers = rdr.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["label", "s", "j_exp", "x", "y"]);

        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "lyso_ph7_01");
        let y: f64 = rows[1][4].parse().unwrap();
        assert!((y - 0.144).abs() < 1e-9);
    }

    #[test]
    fn test_to_xy() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.xy");
        let (record, series) = sample();

        to_xy(&record, &series, &output).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        let data: Vec<&str> = content.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(data, vec!["0.300000\t0.045000", "0.600000\t0.144000"]);
    }
}
