//! 结果表：一轮中工人提交的所有答案

use crate::error::{AppResult, TableError};
use crate::models::answer::Answer;
use crate::models::batch::{Batch, HitLayout};

/// 一条提交记录（一个工人完成的一个 hit）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    /// 每列展示的条目（`Input.{prefix}{i}`）
    pub relations: Vec<String>,
    /// 每列的答案（`Answer.value{i}`）
    pub answers: Vec<Answer>,
    /// 原始答案文本（仅用于日志和审核文件）
    pub raw_answers: Vec<String>,
    pub assignment_id: Option<String>,
    pub worker_id: Option<String>,
}

impl ResultRow {
    /// 检查三组列的宽度都等于 hit 宽度
    ///
    /// `row` 只用于错误信息。
    pub fn check_width(&self, row: usize, layout: &HitLayout) -> AppResult<()> {
        let expected = layout.slots_per_row();
        for found in [self.relations.len(), self.answers.len(), self.raw_answers.len()] {
            if found != expected {
                return Err(TableError::ColumnCountMismatch {
                    row,
                    found,
                    expected,
                }
                .into());
            }
        }
        Ok(())
    }

    /// 金标准列中的条目及答案原文
    pub fn gold_slot(&self, row: usize, layout: &HitLayout) -> AppResult<(&str, Answer, &str)> {
        let index = layout.gold_index();
        match (
            self.relations.get(index),
            self.answers.get(index),
            self.raw_answers.get(index),
        ) {
            (Some(item), Some(answer), Some(raw)) => Ok((item.as_str(), *answer, raw.as_str())),
            _ => Err(TableError::ColumnCountMismatch {
                row,
                found: self.relations.len().min(self.answers.len()).min(self.raw_answers.len()),
                expected: layout.slots_per_row(),
            }
            .into()),
        }
    }
}

/// 一轮的结果表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    pub rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn new(rows: Vec<ResultRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 检查每一行的宽度，任何一行不符即报错
    pub fn check_shape(&self, layout: &HitLayout) -> AppResult<()> {
        self.rows
            .iter()
            .enumerate()
            .try_for_each(|(row, result)| result.check_width(row, layout))
    }

    /// 把批次本身当作一份没有任何答案的结果表
    pub fn unanswered(batch: &Batch) -> Self {
        let rows = batch
            .hits
            .iter()
            .map(|hit| ResultRow {
                relations: hit.slots.clone(),
                answers: vec![Answer::Unclear; hit.slots.len()],
                raw_answers: vec![String::new(); hit.slots.len()],
                assignment_id: None,
                worker_id: None,
            })
            .collect();
        Self { rows }
    }
}
