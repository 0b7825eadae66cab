//! 计票
//!
//! 每个条目维护 {True, False, Unclear} 三个计数，跨轮次累加，从不清零。

use crate::models::answer::Answer;
use crate::models::label::FinalLabel;
use serde::Serialize;
use std::collections::HashMap;

/// 单个条目的计票
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VoteTally {
    counts: [u32; 3],
}

impl VoteTally {
    pub fn from_counts(counts: [u32; 3]) -> Self {
        Self { counts }
    }

    pub fn record(&mut self, answer: Answer) {
        self.counts[answer.bucket()] += 1;
    }

    pub fn counts(&self) -> [u32; 3] {
        self.counts
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// 票数最多的答案
    ///
    /// 平票时取第一个最大值，即 True > False > Unclear。
    pub fn majority(&self) -> FinalLabel {
        let mut best = 0;
        for bucket in 1..self.counts.len() {
            if self.counts[bucket] > self.counts[best] {
                best = bucket;
            }
        }
        match best {
            0 => FinalLabel::True,
            1 => FinalLabel::False,
            _ => FinalLabel::Unclear,
        }
    }
}

/// 全部条目的计票，保持条目输入顺序
#[derive(Debug, Clone, Default)]
pub struct TallyStore {
    order: Vec<String>,
    tallies: HashMap<String, VoteTally>,
}

impl TallyStore {
    /// 为每个不同的条目建立空计票，重复条目只保留第一次出现的位置
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Self::default();
        for item in items {
            let item = item.into();
            if !store.tallies.contains_key(&item) {
                store.tallies.insert(item.clone(), VoteTally::default());
                store.order.push(item);
            }
        }
        store
    }

    /// 记录一票；条目不在计票表中时返回 false
    pub fn record(&mut self, item: &str, answer: Answer) -> bool {
        match self.tallies.get_mut(item) {
            Some(tally) => {
                tally.record(answer);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, item: &str) -> Option<&VoteTally> {
        self.tallies.get(item)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.tallies.contains_key(item)
    }

    /// 不同条目数
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 按输入顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VoteTally)> + '_ {
        self.order
            .iter()
            .filter_map(move |item| self.tallies.get(item).map(|t| (item.as_str(), t)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_majority_tie_break() {
        assert_eq!(VoteTally::from_counts([3, 2, 0]).majority(), FinalLabel::True);
        assert_eq!(VoteTally::from_counts([1, 4, 0]).majority(), FinalLabel::False);
        assert_eq!(VoteTally::from_counts([1, 1, 3]).majority(), FinalLabel::Unclear);
        assert_eq!(VoteTally::from_counts([2, 2, 1]).majority(), FinalLabel::True);
        assert_eq!(VoteTally::from_counts([0, 2, 2]).majority(), FinalLabel::False);
        assert_eq!(VoteTally::from_counts([0, 0, 0]).majority(), FinalLabel::True);
    }

    #[test]
    fn test_store_dedupes_and_keeps_order() {
        let store = TallyStore::new(["v2", "v1", "v2", "v3"]);
        assert_eq!(store.len(), 3);
        let order: Vec<&str> = store.iter().map(|(item, _)| item).collect();
        assert_eq!(order, vec!["v2", "v1", "v3"]);
    }

    #[test]
    fn test_record_unknown_item() {
        let mut store = TallyStore::new(["v1"]);
        assert!(store.record("v1", Answer::Negative));
        assert!(!store.record("ghost", Answer::Affirmative));
        assert_eq!(store.get("v1").unwrap().counts(), [0, 1, 0]);
        assert!(store.get("ghost").is_none());
    }
}
