//! 批次生成服务 - 业务能力层
//!
//! 只负责"生成第一轮批次"能力：补齐、洗牌、插入金标准

use crate::error::{AppResult, DataError};
use crate::models::{Batch, Hit, HitLayout};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

/// 使条目数能被 `items_per_hit` 整除所需的最少补齐数
pub fn padding_needed(item_count: usize, items_per_hit: usize) -> usize {
    (items_per_hit - item_count % items_per_hit) % items_per_hit
}

/// 批次生成服务
pub struct BatchGenerator {
    layout: HitLayout,
}

impl BatchGenerator {
    pub fn new(layout: HitLayout) -> Self {
        Self { layout }
    }

    /// 生成一轮批次
    ///
    /// 1. 从已有条目中有放回地随机抽取，补齐到 `items_per_hit` 的整数倍
    /// 2. 整体洗牌
    /// 3. 按顺序逐行填入条目，金标准列单独从金标准池有放回抽取，不消耗条目
    pub fn generate<R: Rng>(
        &self,
        items: &[String],
        gold_standards: &[String],
        round: usize,
        rng: &mut R,
    ) -> AppResult<Batch> {
        if items.is_empty() {
            return Err(DataError::EmptyItems.into());
        }
        if gold_standards.is_empty() {
            return Err(DataError::EmptyGoldPool.into());
        }

        let per_hit = self.layout.items_per_hit();
        let padding = padding_needed(items.len(), per_hit);

        let mut queue = items.to_vec();
        for _ in 0..padding {
            queue.push(items[rng.gen_range(0..items.len())].clone());
        }
        queue.shuffle(rng);

        info!(
            "📦 第 {} 轮: {} 个条目 + {} 个补齐, 共 {} 个 hit",
            round,
            items.len(),
            padding,
            queue.len() / per_hit
        );

        let gold_index = self.layout.gold_index();
        let hits = queue
            .chunks(per_hit)
            .map(|chunk| {
                let mut remaining = chunk.iter();
                let slots = (0..self.layout.slots_per_row())
                    .filter_map(|column| {
                        if column == gold_index {
                            Some(gold_standards[rng.gen_range(0..gold_standards.len())].clone())
                        } else {
                            remaining.next().cloned()
                        }
                    })
                    .collect();
                Hit::new(slots)
            })
            .collect();

        let batch = Batch::new(round, &self.layout, hits);
        batch.check_shape(&self.layout)?;
        Ok(batch)
    }
}
