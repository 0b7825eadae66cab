//! 结果过滤服务 - 业务能力层
//!
//! 根据金标准拒绝不可信的提交，并把其余提交计入计票表

use crate::error::AppResult;
use crate::models::{Answer, HitLayout, ResultTable, TallyStore};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// 一轮结果的过滤结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundOutcome {
    /// 轮次编号
    pub round: usize,
    /// 被拒绝的行号（从 0 开始，递增）
    pub rejected: Vec<usize>,
    /// 金标准列中不是金标准条目的行号
    pub anomalies: Vec<usize>,
    /// 计入计票表的票数
    pub votes_recorded: usize,
    /// 结果中出现但不在条目列表中的条目（去重，按首次出现顺序）
    pub unknown_items: Vec<String>,
}

impl RoundOutcome {
    pub fn is_rejected(&self, row: usize) -> bool {
        self.rejected.binary_search(&row).is_ok()
    }

    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}

/// 结果过滤服务
pub struct ResultFilter {
    layout: HitLayout,
    gold_standards: HashSet<String>,
}

impl ResultFilter {
    pub fn new(layout: HitLayout, gold_standards: &[String]) -> Self {
        Self {
            layout,
            gold_standards: gold_standards.iter().cloned().collect(),
        }
    }

    pub fn is_gold(&self, item: &str) -> bool {
        self.gold_standards.contains(item)
    }

    /// 过滤一轮结果并累加计票
    ///
    /// 金标准列为已知金标准且答案为 False 的行被拒绝；其余行除金标准列外的每一列
    /// 都计入对应条目的计票。计票表跨轮次累加。
    ///
    /// 任何一行宽度不等于 hit 宽度时直接报错，计票表保持不变。
    pub fn parse_round(
        &self,
        table: &ResultTable,
        round: usize,
        tallies: &mut TallyStore,
    ) -> AppResult<RoundOutcome> {
        table.check_shape(&self.layout)?;

        let mut outcome = RoundOutcome {
            round,
            ..Default::default()
        };
        let gold_index = self.layout.gold_index();

        for (row_index, row) in table.rows.iter().enumerate() {
            let (gold_item, gold_answer, raw_answer) = row.gold_slot(row_index, &self.layout)?;

            if self.is_gold(gold_item) {
                if gold_answer == Answer::Negative {
                    info!(
                        "[第 {} 轮] ✗ 拒绝 hit {}: {} --- {}",
                        round, row_index, gold_item, raw_answer
                    );
                    outcome.rejected.push(row_index);
                    continue;
                }
            } else {
                warn!(
                    "[第 {} 轮] ⚠️ hit {} 的金标准列不是金标准条目: {}",
                    round, row_index, gold_item
                );
                outcome.anomalies.push(row_index);
            }

            for (column, (item, answer)) in row.relations.iter().zip(&row.answers).enumerate() {
                if column == gold_index {
                    continue;
                }
                if tallies.record(item, *answer) {
                    outcome.votes_recorded += 1;
                } else if !outcome.unknown_items.contains(item) {
                    warn!("[第 {} 轮] ⚠️ 结果中出现未知条目, 已忽略: {}", round, item);
                    outcome.unknown_items.push(item.clone());
                }
            }
        }

        debug!(
            "[第 {} 轮] 计入 {} 票, 异常行 {} 个",
            round,
            outcome.votes_recorded,
            outcome.anomalies.len()
        );
        info!("[第 {} 轮] 共拒绝 {} 个 hit", round, outcome.rejected.len());

        Ok(outcome)
    }
}
