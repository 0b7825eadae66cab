//! 批次（一轮查询）与 hit 布局

use crate::error::{AppResult, ConfigError, TableError};

/// hit 的列布局
///
/// 每行固定 `slots_per_row` 列，第 `gold_position` 列（从 1 开始）放金标准，
/// 其余列放待标注条目。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitLayout {
    slots_per_row: usize,
    gold_position: usize,
    column_prefix: String,
}

impl HitLayout {
    pub fn new(
        slots_per_row: usize,
        gold_position: usize,
        column_prefix: impl Into<String>,
    ) -> AppResult<Self> {
        if slots_per_row < 2 {
            return Err(ConfigError::TooFewSlots {
                slots: slots_per_row,
            }
            .into());
        }
        if gold_position == 0 || gold_position > slots_per_row {
            return Err(ConfigError::GoldPositionOutOfRange {
                position: gold_position,
                slots: slots_per_row,
            }
            .into());
        }
        Ok(Self {
            slots_per_row,
            gold_position,
            column_prefix: column_prefix.into(),
        })
    }

    pub fn slots_per_row(&self) -> usize {
        self.slots_per_row
    }

    /// 金标准列（从 1 开始）
    pub fn gold_position(&self) -> usize {
        self.gold_position
    }

    /// 金标准列（从 0 开始）
    pub fn gold_index(&self) -> usize {
        self.gold_position - 1
    }

    /// 每行实际承载的待标注条目数
    pub fn items_per_hit(&self) -> usize {
        self.slots_per_row - 1
    }

    /// 批次文件表头: `{prefix}1 .. {prefix}N`
    pub fn header(&self) -> Vec<String> {
        (1..=self.slots_per_row)
            .map(|i| format!("{}{}", self.column_prefix, i))
            .collect()
    }

    /// 结果文件中第 `position` 列展示的条目（从 1 开始）
    pub fn input_column(&self, position: usize) -> String {
        format!("Input.{}{}", self.column_prefix, position)
    }

    /// 结果文件中第 `position` 列的答案（从 1 开始）
    pub fn answer_column(&self, position: usize) -> String {
        format!("Answer.value{}", position)
    }
}

/// 一个 hit：发给一个工人的一行任务
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub slots: Vec<String>,
}

impl Hit {
    pub fn new(slots: Vec<String>) -> Self {
        Self { slots }
    }

    /// 金标准列中的条目
    pub fn gold(&self, layout: &HitLayout) -> Option<&str> {
        self.slots.get(layout.gold_index()).map(String::as_str)
    }

    /// 非金标准列中的条目（按列顺序）
    pub fn items<'a>(&'a self, layout: &HitLayout) -> impl Iterator<Item = &'a str> + 'a {
        let gold_index = layout.gold_index();
        self.slots
            .iter()
            .enumerate()
            .filter(move |(i, _)| *i != gold_index)
            .map(|(_, s)| s.as_str())
    }
}

/// 一轮的批次文件内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// 轮次编号（从 1 开始）
    pub round: usize,
    pub header: Vec<String>,
    pub hits: Vec<Hit>,
}

impl Batch {
    pub fn new(round: usize, layout: &HitLayout, hits: Vec<Hit>) -> Self {
        Self {
            round,
            header: layout.header(),
            hits,
        }
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// 检查每行列数是否等于 hit 宽度
    pub fn check_shape(&self, layout: &HitLayout) -> AppResult<()> {
        for (row, hit) in self.hits.iter().enumerate() {
            if hit.slots.len() != layout.slots_per_row() {
                return Err(TableError::ColumnCountMismatch {
                    row,
                    found: hit.slots.len(),
                    expected: layout.slots_per_row(),
                }
                .into());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn layout() -> HitLayout {
        HitLayout::new(3, 2, "relation").unwrap()
    }

    #[test]
    fn test_layout_rejects_bad_gold_position() {
        assert!(matches!(
            HitLayout::new(3, 4, "relation"),
            Err(AppError::Config(ConfigError::GoldPositionOutOfRange { .. }))
        ));
        assert!(HitLayout::new(3, 0, "relation").is_err());
        assert!(matches!(
            HitLayout::new(1, 1, "relation"),
            Err(AppError::Config(ConfigError::TooFewSlots { slots: 1 }))
        ));
    }

    #[test]
    fn test_header_and_columns() {
        let layout = layout();
        assert_eq!(layout.header(), vec!["relation1", "relation2", "relation3"]);
        assert_eq!(layout.input_column(2), "Input.relation2");
        assert_eq!(layout.answer_column(3), "Answer.value3");
        assert_eq!(layout.items_per_hit(), 2);
    }

    #[test]
    fn test_hit_gold_and_items() {
        let layout = layout();
        let hit = Hit::new(vec!["v1".into(), "g1".into(), "v2".into()]);
        assert_eq!(hit.gold(&layout), Some("g1"));
        assert_eq!(hit.items(&layout).collect::<Vec<_>>(), vec!["v1", "v2"]);
    }

    #[test]
    fn test_check_shape() {
        let layout = layout();
        let batch = Batch::new(
            1,
            &layout,
            vec![
                Hit::new(vec!["v1".into(), "g1".into(), "v2".into()]),
                Hit::new(vec!["v3".into(), "g1".into()]),
            ],
        );
        assert!(matches!(
            batch.check_shape(&layout),
            Err(AppError::Table(TableError::ColumnCountMismatch { row: 1, found: 2, expected: 3 }))
        ));
    }
}
