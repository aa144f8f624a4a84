//! # 报告文件收集器
//!
//! 收集目录下（不递归）以指定后缀结尾的报告文件，并为每个文件生成图例名称。
//!
//! ## 功能
//! - 后缀过滤（默认 `.out`）
//! - 默认保持目录列举顺序，可选按文件名排序
//! - 图例名称: 文件名（去掉后缀）按 `_` 分割后的前三段
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `walkdir` 列举目录

use crate::error::{KratkyError, Result};

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 默认报告文件后缀
pub const REPORT_SUFFIX: &str = ".out";

/// 图例名称保留的字段数
const LABEL_TOKENS: usize = 3;

/// 收集到的报告文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFile {
    /// 文件路径
    pub path: PathBuf,
    /// 图例名称
    pub label: String,
}

/// 文件收集器
pub struct FileCollector {
    /// 输入目录
    dir: PathBuf,
    /// 文件名后缀
    suffix: String,
    /// 是否按文件名排序
    sorted: bool,
}

impl FileCollector {
    /// 创建新的文件收集器
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            suffix: REPORT_SUFFIX.to_string(),
            sorted: false,
        }
    }

    /// 设置是否按文件名排序
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// 收集所有匹配的报告文件
    pub fn collect(&self) -> Result<Vec<ReportFile>> {
        if !self.dir.is_dir() {
            return Err(KratkyError::DirectoryNotFound {
                path: self.dir.display().to_string(),
            });
        }

        // 符号链接按其目标判断是否为文件
        let mut walker = WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);
        if self.sorted {
            walker = walker.sort_by_file_name();
        }

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry.map_err(|e| KratkyError::FileReadError {
                path: self.dir.display().to_string(),
                source: e.into(),
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let name = match entry.file_name().to_str() {
                Some(name) => name,
                None => continue,
            };

            if !name.ends_with(&self.suffix) {
                continue;
            }

            files.push(ReportFile {
                label: derive_label(name, &self.suffix),
                path: entry.into_path(),
            });
        }

        log::debug!(
            "Collected {} '{}' files from {}",
            files.len(),
            self.suffix,
            self.dir.display()
        );

        Ok(files)
    }
}

/// 从文件名生成图例名称
///
/// 不足三段时使用全部字段，同名图例不去重。
pub fn derive_label(file_name: &str, suffix: &str) -> String {
    let stem = file_name.strip_suffix(suffix).unwrap_or(file_name);
    stem.split('_')
        .take(LABEL_TOKENS)
        .collect::<Vec<_>>()
        .join("_")
}
