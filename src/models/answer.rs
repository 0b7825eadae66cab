//! 工人答案
//!
//! 结果文件中的答案文本只在边界处解码一次，内部逻辑不再比较原始字符串。

use std::fmt::Display;

/// 三态答案
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Answer {
    /// "True"
    Affirmative,
    /// "False"
    Negative,
    /// 其他任何值（包括空值）
    Unclear,
}

impl Answer {
    /// 按字面值解码，大小写敏感
    pub fn decode(raw: &str) -> Self {
        match raw {
            "True" => Answer::Affirmative,
            "False" => Answer::Negative,
            _ => Answer::Unclear,
        }
    }

    /// 计票桶下标: True → 0, False → 1, 其他 → 2
    pub fn bucket(self) -> usize {
        match self {
            Answer::Affirmative => 0,
            Answer::Negative => 1,
            Answer::Unclear => 2,
        }
    }
}

impl Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Answer::Affirmative => "True",
            Answer::Negative => "False",
            Answer::Unclear => "Unclear",
        };
        write!(f, "{}", text)
    }
}
