//! 最终标签与统计报告

use crate::models::tally::VoteTally;
use serde::Serialize;

/// 条目的最终标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FinalLabel {
    True,
    False,
    /// 多数工人回答既非 True 也非 False
    Unclear,
    /// 收集到的答案数不足 workers_per_hit
    Incomplete,
}

/// 单个条目的标注结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelEntry {
    pub item: String,
    pub label: FinalLabel,
    pub tally: VoteTally,
}

/// 各标签数量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LabelCounts {
    pub trues: usize,
    pub falses: usize,
    pub unclear: usize,
    pub incomplete: usize,
}

impl LabelCounts {
    pub fn add(&mut self, label: FinalLabel) {
        match label {
            FinalLabel::True => self.trues += 1,
            FinalLabel::False => self.falses += 1,
            FinalLabel::Unclear => self.unclear += 1,
            FinalLabel::Incomplete => self.incomplete += 1,
        }
    }

    /// 已得出结论的条目数
    pub fn resolved(&self) -> usize {
        self.trues + self.falses + self.unclear
    }
}

/// 汇总结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelReport {
    pub completion_rate: f64,
    pub counts: LabelCounts,
    pub labels: Vec<LabelEntry>,
}

impl LabelReport {
    pub fn label_of(&self, item: &str) -> Option<FinalLabel> {
        self.labels
            .iter()
            .find(|entry| entry.item == item)
            .map(|entry| entry.label)
    }
}
