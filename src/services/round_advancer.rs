//! 轮次推进服务 - 业务能力层
//!
//! 把被拒绝的 hit 原样重新提交：条目和金标准都保持不变

use crate::error::{AppResult, TableError};
use crate::models::{Batch, Hit, HitLayout, ResultTable};
use tracing::info;

/// 轮次推进服务
pub struct RoundAdvancer {
    layout: HitLayout,
}

impl RoundAdvancer {
    pub fn new(layout: HitLayout) -> Self {
        Self { layout }
    }

    /// 为被拒绝的行生成下一轮批次
    ///
    /// 没有被拒绝的行时返回 `None`。新批次的每一行都逐字复制自上一轮结果表中
    /// 对应行展示的条目。
    pub fn advance(
        &self,
        rejected: &[usize],
        previous: &ResultTable,
        next_round: usize,
    ) -> AppResult<Option<Batch>> {
        if rejected.is_empty() {
            return Ok(None);
        }

        let hits = rejected
            .iter()
            .map(|&index| {
                previous
                    .rows
                    .get(index)
                    .map(|row| Hit::new(row.relations.clone()))
                    .ok_or_else(|| {
                        TableError::RowOutOfRange {
                            index,
                            len: previous.len(),
                        }
                        .into()
                    })
            })
            .collect::<AppResult<Vec<_>>>()?;

        info!(
            "📝 第 {} 轮: 为被拒绝的提交重新生成 {} 个 hit",
            next_round,
            hits.len()
        );

        let batch = Batch::new(next_round, &self.layout, hits);
        batch.check_shape(&self.layout)?;
        Ok(Some(batch))
    }
}
