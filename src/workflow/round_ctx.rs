//! 轮次上下文
//!
//! 封装"我正在处理哪个目录的第几轮"这一信息，以及每轮文件的命名约定

use crate::error::{AppError, AppResult};
use regex::Regex;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tokio::fs;

fn result_file_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^result_round(\d+)\.csv$").unwrap())
}

/// 轮次上下文
#[derive(Debug, Clone)]
pub struct RoundCtx {
    /// 工作目录（每个关系一个）
    pub directory: PathBuf,

    /// 轮次编号（从 1 开始）
    pub round: usize,
}

impl RoundCtx {
    pub fn new(directory: impl Into<PathBuf>, round: usize) -> Self {
        Self {
            directory: directory.into(),
            round,
        }
    }

    /// 本轮批次文件: `query_round{N}.csv`
    pub fn query_path(&self) -> PathBuf {
        self.directory.join(format!("query_round{}.csv", self.round))
    }

    /// 本轮结果文件: `result_round{N}.csv`
    pub fn result_path(&self) -> PathBuf {
        self.directory.join(format!("result_round{}.csv", self.round))
    }

    /// 列出目录中已有的结果文件轮次（升序）
    pub async fn discover_result_rounds(directory: &Path) -> AppResult<Vec<usize>> {
        let mut rounds = Vec::new();
        let mut entries = fs::read_dir(directory)
            .await
            .map_err(|e| AppError::file_read_failed(directory.display().to_string(), e))?;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(round) = parse_result_round(&name) {
                rounds.push(round);
            }
        }

        rounds.sort_unstable();
        Ok(rounds)
    }
}

/// 从文件名中解析结果文件轮次
pub fn parse_result_round(file_name: &str) -> Option<usize> {
    result_file_pattern()
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// 从 1 开始连续的轮次前缀；后面出现断档的轮次被忽略
pub fn contiguous_prefix(rounds: &[usize]) -> Vec<usize> {
    rounds
        .iter()
        .copied()
        .zip(1usize..)
        .take_while(|(round, expected)| round == expected)
        .map(|(round, _)| round)
        .collect()
}

impl Display for RoundCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[目录 {} 第 {} 轮]", self.directory.display(), self.round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_paths() {
        let ctx = RoundCtx::new("data/on", 2);
        assert_eq!(ctx.query_path(), PathBuf::from("data/on/query_round2.csv"));
        assert_eq!(ctx.result_path(), PathBuf::from("data/on/result_round2.csv"));
    }

    #[test]
    fn test_parse_result_round() {
        assert_eq!(parse_result_round("result_round1.csv"), Some(1));
        assert_eq!(parse_result_round("result_round12.csv"), Some(12));
        assert_eq!(parse_result_round("query_round1.csv"), None);
        assert_eq!(parse_result_round("result_round1.csv.bak"), None);
        assert_eq!(parse_result_round("result_roundx.csv"), None);
    }

    #[test]
    fn test_contiguous_prefix() {
        assert_eq!(contiguous_prefix(&[1, 2, 3]), vec![1, 2, 3]);
        assert_eq!(contiguous_prefix(&[1, 2, 4]), vec![1, 2]);
        assert!(contiguous_prefix(&[2, 3]).is_empty());
        assert!(contiguous_prefix(&[]).is_empty());
    }

    #[tokio::test]
    async fn test_discover_result_rounds() {
        let dir = tempdir().unwrap();
        for name in ["result_round2.csv", "result_round1.csv", "query_round1.csv", "notes.txt"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        let rounds = RoundCtx::discover_result_rounds(dir.path()).await.unwrap();
        assert_eq!(rounds, vec![1, 2]);
    }
}
