use crate::error::{AppError, AppResult, FileError};
use std::path::Path;
use tokio::fs;

/// 解析列表文本：每行一个标识，去掉首尾空白，跳过空行
pub fn parse_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

/// 从文件加载条目或金标准列表
pub async fn load_list(path: &Path) -> AppResult<Vec<String>> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        return Err(FileError::NotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

    let list = parse_list(&content);
    tracing::info!(
        "正在加载: {} ({} 条)",
        path.file_name().unwrap_or_default().to_string_lossy(),
        list.len()
    );

    Ok(list)
}
