//! 审核文件写入服务 - 业务能力层
//!
//! 只负责"写 review_round{N}.csv"能力：每条提交标记 Approve / Reject

use crate::error::{AppError, AppResult};
use crate::models::{HitLayout, ResultTable};
use crate::services::result_filter::RoundOutcome;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

const REVIEW_HEADER: [&str; 6] = [
    "row",
    "assignment_id",
    "worker_id",
    "decision",
    "gold_item",
    "gold_answer",
];

/// 审核文件写入服务
pub struct ReviewWriter {
    directory: PathBuf,
    layout: HitLayout,
}

impl ReviewWriter {
    pub fn new(directory: impl Into<PathBuf>, layout: HitLayout) -> Self {
        Self {
            directory: directory.into(),
            layout,
        }
    }

    pub fn path_for(&self, round: usize) -> PathBuf {
        self.directory.join(format!("review_round{}.csv", round))
    }

    /// 生成审核表内容
    pub fn render(&self, table: &ResultTable, outcome: &RoundOutcome) -> AppResult<Vec<u8>> {
        table.check_shape(&self.layout)?;

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(REVIEW_HEADER)?;

        for (index, row) in table.rows.iter().enumerate() {
            let (gold_item, _, raw_answer) = row.gold_slot(index, &self.layout)?;
            let decision = if outcome.is_rejected(index) {
                "Reject"
            } else {
                "Approve"
            };
            writer.write_record([
                index.to_string().as_str(),
                row.assignment_id.as_deref().unwrap_or(""),
                row.worker_id.as_deref().unwrap_or(""),
                decision,
                gold_item,
                raw_answer,
            ])?;
        }

        writer.flush()?;
        writer.into_inner().map_err(|e| AppError::from(e.into_error()))
    }

    /// 写入一轮的审核文件，返回文件路径
    pub async fn write(&self, table: &ResultTable, outcome: &RoundOutcome) -> AppResult<PathBuf> {
        let path = self.path_for(outcome.round);
        let bytes = self.render(table, outcome)?;
        write_bytes(&path, bytes).await?;

        debug!(
            "写入审核文件: {} (拒绝 {}/{})",
            path.display(),
            outcome.rejected.len(),
            table.len()
        );
        Ok(path)
    }
}

async fn write_bytes(path: &Path, bytes: Vec<u8>) -> AppResult<()> {
    fs::write(path, bytes)
        .await
        .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))
}
