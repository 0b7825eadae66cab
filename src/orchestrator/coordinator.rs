//! 批次协调器 - 编排层
//!
//! ## 职责
//!
//! 持有一个关系的全部状态，按轮次推进：
//!
//! ```text
//! generate_initial_batch → (工人作答) → parse_round → advance → ... → finalize
//! ```
//!
//! - 条目列表与金标准池在构造时给定，之后不再改变
//! - 计票表由协调器独占，跨轮次累加
//! - 轮次计数只在产生新批次时递增，因此每个轮次号都对应一份批次
//!
//! 本模块不做任何文件读写，文件由 `App` 负责。

use crate::error::{AppResult, DataError};
use crate::models::{Batch, HitLayout, LabelReport, ResultTable, TallyStore};
use crate::services::{Aggregator, BatchGenerator, ResultFilter, RoundAdvancer, RoundOutcome};
use rand::Rng;

/// 批次协调器
pub struct BatchCoordinator {
    layout: HitLayout,
    items: Vec<String>,
    gold_standards: Vec<String>,
    tallies: TallyStore,
    round: usize,
    generator: BatchGenerator,
    filter: ResultFilter,
    advancer: RoundAdvancer,
    aggregator: Aggregator,
}

impl BatchCoordinator {
    pub fn new(
        layout: HitLayout,
        workers_per_hit: usize,
        items: Vec<String>,
        gold_standards: Vec<String>,
    ) -> AppResult<Self> {
        if items.is_empty() {
            return Err(DataError::EmptyItems.into());
        }
        if gold_standards.is_empty() {
            return Err(DataError::EmptyGoldPool.into());
        }

        Ok(Self {
            tallies: TallyStore::new(items.iter().cloned()),
            round: 1,
            generator: BatchGenerator::new(layout.clone()),
            filter: ResultFilter::new(layout.clone(), &gold_standards),
            advancer: RoundAdvancer::new(layout.clone()),
            aggregator: Aggregator::new(workers_per_hit),
            layout,
            items,
            gold_standards,
        })
    }

    /// 当前轮次
    pub fn round(&self) -> usize {
        self.round
    }

    pub fn layout(&self) -> &HitLayout {
        &self.layout
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn tallies(&self) -> &TallyStore {
        &self.tallies
    }

    /// 生成当前轮次的初始批次
    pub fn generate_initial_batch<R: Rng>(&self, rng: &mut R) -> AppResult<Batch> {
        self.generator
            .generate(&self.items, &self.gold_standards, self.round, rng)
    }

    /// 过滤当前轮次的结果并累加计票
    pub fn parse_round(&mut self, table: &ResultTable) -> AppResult<RoundOutcome> {
        self.filter.parse_round(table, self.round, &mut self.tallies)
    }

    /// 有被拒绝的提交时进入下一轮，返回下一轮批次
    pub fn advance(
        &mut self,
        outcome: &RoundOutcome,
        previous: &ResultTable,
    ) -> AppResult<Option<Batch>> {
        let next = self
            .advancer
            .advance(&outcome.rejected, previous, self.round + 1)?;
        if next.is_some() {
            self.round += 1;
        }
        Ok(next)
    }

    /// 汇总最终标签与完成率，不修改计票
    pub fn finalize(&self) -> LabelReport {
        self.aggregator.finalize(&self.tallies)
    }
}
