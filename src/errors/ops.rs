use std::fmt::{self, Display};

/// 比较运算符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    GreaterOrEqual,
}
impl Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator_name = match self {
            ComparisonOperator::GreaterOrEqual => "≥",
        };
        write!(f, "{}", operator_name)
    }
}

/// 信号的两种模态：带符号（随边方向翻转而变号）与无符号（不随之改变）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Modality {
    Signed,
    Unsigned,
}

impl Modality {
    pub const fn from_signed(signed: bool) -> Self {
        if signed { Self::Signed } else { Self::Unsigned }
    }
}

impl Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Modality::Signed => "带符号",
            Modality::Unsigned => "无符号",
        };
        write!(f, "{}", name)
    }
}
