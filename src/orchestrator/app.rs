//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 本模块负责一次操作员动作的完整执行和文件管理。
//!
//! ## 核心功能
//!
//! 1. **应用初始化**：校验配置、创建工作目录、写日志头、加载条目和金标准
//! 2. **生成**：写出第一轮 `query_round1.csv`
//! 3. **回放**：按顺序解析已有的 `result_round{N}.csv`，重建计票，必要时写出下一轮批次
//! 4. **汇总**：回放后输出最终标签文件和统计信息
//!
//! ## 设计特点
//!
//! - **文件所有者**：只有本模块读写文件，`BatchCoordinator` 保持纯内存
//! - **可重入**：每次运行都从磁盘回放，进程之间不需要保存状态

use crate::config::Config;
use crate::error::FileError;
use crate::models::loaders::{load_list, read_result_table, write_batch};
use crate::models::{Batch, LabelReport};
use crate::orchestrator::coordinator::BatchCoordinator;
use crate::services::ReviewWriter;
use crate::utils::logging;
use crate::workflow::{contiguous_prefix, RoundCtx};
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tokio::fs;
use tracing::{info, warn};

/// 操作员动作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// 生成第一轮批次
    Generate,
    /// 解析已有结果并生成下一轮批次
    Parse,
    /// 解析已有结果并输出最终标签
    Finalize,
}

impl FromStr for Action {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "generate" => Ok(Action::Generate),
            "parse" => Ok(Action::Parse),
            "finalize" => Ok(Action::Finalize),
            other => anyhow::bail!("未知动作: {} (可选: generate / parse / finalize)", other),
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Action::Generate => "generate",
            Action::Parse => "parse",
            Action::Finalize => "finalize",
        };
        write!(f, "{}", name)
    }
}

/// 回放统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    /// 已解析的轮次
    pub rounds_parsed: Vec<usize>,
    /// 各轮拒绝的提交总数
    pub rejected_total: usize,
    /// 最后一轮没有被拒绝的提交
    pub converged: bool,
    /// 最后写出（或保留）的下一轮批次文件
    pub next_batch: Option<PathBuf>,
}

/// 应用主结构
pub struct App {
    config: Config,
    directory: PathBuf,
    coordinator: BatchCoordinator,
    review_writer: ReviewWriter,
    rng: StdRng,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config, action: Action) -> Result<Self> {
        // 配置错误在写出任何文件之前终止
        config.validate()?;
        let layout = config.layout()?;

        let directory = PathBuf::from(&config.directory);
        fs::create_dir_all(&directory)
            .await
            .with_context(|| format!("无法创建工作目录: {}", directory.display()))?;

        logging::init_log_file(&directory.join(&config.log_file), &action.to_string())?;
        logging::log_startup(&config, &action.to_string());

        let items = load_list(Path::new(&config.items_file))
            .await
            .with_context(|| format!("无法加载条目列表: {}", config.items_file))?;
        let gold_standards = load_list(Path::new(&config.gold_file))
            .await
            .with_context(|| format!("无法加载金标准列表: {}", config.gold_file))?;

        let coordinator = BatchCoordinator::new(
            layout.clone(),
            config.workers_per_hit,
            items,
            gold_standards,
        )?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            review_writer: ReviewWriter::new(directory.clone(), layout),
            config,
            directory,
            coordinator,
            rng,
        })
    }

    pub fn coordinator(&self) -> &BatchCoordinator {
        &self.coordinator
    }

    /// 执行一个动作
    pub async fn run(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Generate => {
                self.generate().await?;
            }
            Action::Parse => {
                self.replay().await?;
            }
            Action::Finalize => {
                self.finalize().await?;
            }
        }
        Ok(())
    }

    /// 生成第一轮批次文件
    pub async fn generate(&mut self) -> Result<PathBuf> {
        info!("\n📁 正在生成第一轮查询...");
        let ctx = RoundCtx::new(&self.directory, self.coordinator.round());
        let path = ctx.query_path();

        if !self.config.overwrite && fs::try_exists(&path).await.unwrap_or(false) {
            return Err(FileError::AlreadyExists {
                path: path.display().to_string(),
            }
            .into());
        }

        let batch = self.coordinator.generate_initial_batch(&mut self.rng)?;
        write_batch(&path, &batch)
            .await
            .with_context(|| format!("无法写入批次文件 {}", ctx))?;

        info!("✓ 写入 {} 个 hit: {}", batch.len(), path.display());
        self.log_line(&format!("第 {} 轮: 写入 {} 个 hit", batch.round, batch.len()))?;
        Ok(path)
    }

    /// 按顺序回放所有已有的结果文件
    pub async fn replay(&mut self) -> Result<ReplaySummary> {
        let discovered = RoundCtx::discover_result_rounds(&self.directory).await?;
        let rounds = contiguous_prefix(&discovered);
        if rounds.len() < discovered.len() {
            warn!(
                "⚠️ 结果文件轮次不连续 {:?}, 只回放 {:?}",
                discovered, rounds
            );
        }

        let mut summary = ReplaySummary::default();
        if rounds.is_empty() {
            warn!("⚠️ 没有找到 result_round1.csv, 没有可解析的结果");
            return Ok(summary);
        }

        for round in rounds {
            if round != self.coordinator.round() {
                warn!(
                    "⚠️ 第 {} 轮结果之前没有生成新的批次 (当前第 {} 轮), 停止回放",
                    round,
                    self.coordinator.round()
                );
                break;
            }

            let ctx = RoundCtx::new(&self.directory, round);
            info!("\n{} 正在解析众包结果...", ctx);

            let table = read_result_table(&ctx.result_path(), self.coordinator.layout())
                .await
                .with_context(|| format!("无法读取结果文件 {}", ctx.result_path().display()))?;

            let outcome = self.coordinator.parse_round(&table)?;
            self.review_writer.write(&table, &outcome).await?;

            logging::log_round_complete(&outcome, table.len());
            self.log_line(&logging::round_summary(&outcome, table.len()))?;

            summary.rounds_parsed.push(round);
            summary.rejected_total += outcome.rejected.len();
            summary.converged = !outcome.has_rejections();

            if let Some(batch) = self.coordinator.advance(&outcome, &table)? {
                summary.next_batch = Some(self.write_next_batch(&batch).await?);
            }
        }

        if summary.converged {
            info!("✓ 最后一轮没有被拒绝的提交, 不需要新的批次");
        }

        Ok(summary)
    }

    /// 回放后输出最终标签
    pub async fn finalize(&mut self) -> Result<LabelReport> {
        self.replay().await?;

        info!("\n📊 正在汇总所有轮次的结果...");
        let report = self.coordinator.finalize();

        let labels_path = self.directory.join(&self.config.labels_file);
        let json = serde_json::to_vec_pretty(&report)?;
        fs::write(&labels_path, json)
            .await
            .with_context(|| format!("无法写入标签文件: {}", labels_path.display()))?;

        logging::print_final_stats(&report, &labels_path);
        self.log_line(&format!("完成率: {:.4}", report.completion_rate))?;
        Ok(report)
    }

    /// 写出下一轮批次；文件已存在且未开启 overwrite 时保留原文件
    async fn write_next_batch(&self, batch: &Batch) -> Result<PathBuf> {
        let path = RoundCtx::new(&self.directory, batch.round).query_path();

        if !self.config.overwrite && fs::try_exists(&path).await.unwrap_or(false) {
            info!("保留已有批次文件: {}", path.display());
            return Ok(path);
        }

        write_batch(&path, batch).await?;
        info!("✓ 为被拒绝的提交写入 {} 个 hit: {}", batch.len(), path.display());
        self.log_line(&format!("第 {} 轮: 写入 {} 个 hit", batch.round, batch.len()))?;
        Ok(path)
    }

    fn log_line(&self, line: &str) -> Result<()> {
        logging::append_log_line(&self.directory.join(&self.config.log_file), line)
    }
}
