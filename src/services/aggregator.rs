//! 汇总服务 - 业务能力层
//!
//! 把累计的计票收敛为每个条目的最终标签，只读计票表

use crate::models::{FinalLabel, LabelCounts, LabelEntry, LabelReport, TallyStore};

/// 汇总服务
pub struct Aggregator {
    workers_per_hit: u32,
}

impl Aggregator {
    pub fn new(workers_per_hit: usize) -> Self {
        Self {
            workers_per_hit: u32::try_from(workers_per_hit).unwrap_or(u32::MAX),
        }
    }

    /// 计算最终标签和完成率
    ///
    /// 票数不足 `workers_per_hit` 的条目标记为 `Incomplete`，其余取多数票。
    /// 完成率 = 已得出结论的条目数 / 不同条目数（无条目时为 0）。
    pub fn finalize(&self, tallies: &TallyStore) -> LabelReport {
        let mut counts = LabelCounts::default();
        let labels: Vec<LabelEntry> = tallies
            .iter()
            .map(|(item, tally)| {
                let label = if tally.total() < self.workers_per_hit {
                    FinalLabel::Incomplete
                } else {
                    tally.majority()
                };
                counts.add(label);
                LabelEntry {
                    item: item.to_string(),
                    label,
                    tally: *tally,
                }
            })
            .collect();

        let completion_rate = if labels.is_empty() {
            0.0
        } else {
            counts.resolved() as f64 / labels.len() as f64
        };

        LabelReport {
            completion_rate,
            counts,
            labels,
        }
    }
}
