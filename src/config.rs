use crate::error::{AppError, AppResult, ConfigError, FileError};
use crate::models::HitLayout;
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
///
/// 一个配置对应一个关系（一个工作目录），所有轮次文件都写在 `directory` 下。
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 工作目录（每个关系/类别一个）
    pub directory: String,
    /// 待标注条目列表文件（每行一个）
    pub items_file: String,
    /// 金标准列表文件（每行一个）
    pub gold_file: String,
    /// 每个 hit 的列数（含金标准列）
    pub queries_per_hit: usize,
    /// 每个条目需要收集的答案数
    pub workers_per_hit: usize,
    /// 金标准所在列（从 1 开始）
    pub gold_standard_position: usize,
    /// 批次表头前缀，表头为 `{prefix}1..{prefix}N`
    pub column_prefix: String,
    /// 是否允许覆盖已存在的批次文件
    pub overwrite: bool,
    /// 最终标签输出文件（位于工作目录下）
    pub labels_file: String,
    /// 运行日志文件（位于工作目录下）
    pub log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 随机种子，未设置时使用系统随机源
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            directory: "data".to_string(),
            items_file: "video_urls.txt".to_string(),
            gold_file: "gold_urls.txt".to_string(),
            queries_per_hit: 10,
            workers_per_hit: 5,
            gold_standard_position: 7,
            column_prefix: "relation".to_string(),
            overwrite: false,
            labels_file: "labels.json".to_string(),
            log_file: "run_log.txt".to_string(),
            verbose_logging: false,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            directory: std::env::var("CROWD_DIRECTORY").unwrap_or(default.directory),
            items_file: std::env::var("CROWD_ITEMS_FILE").unwrap_or(default.items_file),
            gold_file: std::env::var("CROWD_GOLD_FILE").unwrap_or(default.gold_file),
            queries_per_hit: std::env::var("QUERIES_PER_HIT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.queries_per_hit),
            workers_per_hit: std::env::var("WORKERS_PER_HIT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.workers_per_hit),
            gold_standard_position: std::env::var("GOLD_STANDARD_POSITION").ok().and_then(|v| v.parse().ok()).unwrap_or(default.gold_standard_position),
            column_prefix: std::env::var("COLUMN_PREFIX").unwrap_or(default.column_prefix),
            overwrite: std::env::var("OVERWRITE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.overwrite),
            labels_file: std::env::var("LABELS_FILE").unwrap_or(default.labels_file),
            log_file: std::env::var("LOG_FILE").unwrap_or(default.log_file),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            seed: std::env::var("CROWD_SEED").ok().and_then(|v| v.parse().ok()),
        }
    }

    /// 从 TOML 文件加载配置，缺失字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::file_read_failed(path.display().to_string(), e))?;

        toml::from_str(&content).map_err(|e| {
            AppError::File(FileError::TomlParseFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })
        })
    }

    /// 检查 hit 形状参数
    ///
    /// 配置错误必须在写出任何文件之前报告。
    pub fn validate(&self) -> AppResult<()> {
        self.layout()?;
        if self.workers_per_hit == 0 {
            return Err(ConfigError::ZeroWorkersPerHit.into());
        }
        Ok(())
    }

    /// 由配置得到 hit 布局
    pub fn layout(&self) -> AppResult<HitLayout> {
        HitLayout::new(
            self.queries_per_hit,
            self.gold_standard_position,
            self.column_prefix.clone(),
        )
    }
}
