/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 整个库共用的错误类型：图拓扑错误、配置错误、形状错误、持久化错误
 */

use thiserror::Error;
mod ops;
pub use self::ops::*;

#[derive(Error, Debug)]
pub enum EignError {
    // ========== 图拓扑（invalid-graph）==========
    #[error("第{edge}条边的端点{node}越界：节点编号须在[0, {num_nodes})内")]
    NodeOutOfRange {
        edge: usize,
        node: usize,
        num_nodes: usize,
    },
    #[error("第{edge}条边是自环（端点均为{node}），磁性关联矩阵不支持自环")]
    SelfLoop { edge: usize, node: usize },
    #[error("边列表格式错误：{0}")]
    MalformedEdgeList(String),
    #[error("图中没有任何边，而当前配置不允许空边集")]
    NoEdges,

    // ========== 配置（configuration）==========
    #[error("{value_name}须{operator}{threshold}")]
    ValueMustSatisfyComparison {
        value_name: String,
        operator: ComparisonOperator,
        threshold: usize,
    },
    #[error(
        "第{block}个块的输出通道数与第{}个块的输入通道数不一致：{modality}模态输出{out_channels}，输入{in_channels}",
        .block + 1
    )]
    ChannelMismatch {
        block: usize,
        modality: Modality,
        out_channels: usize,
        in_channels: usize,
    },
    #[error("配置无效：{0}")]
    InvalidConfig(String),

    // ========== 前向计算 ==========
    #[error("{context}的形状不一致：期望{expected:?}，实际{got:?}")]
    ShapeMismatch {
        context: String,
        expected: Vec<usize>,
        got: Vec<usize>,
    },

    // ========== 持久化 ==========
    #[error("参数`{0}`在状态字典中不存在")]
    MissingParameter(String),
    #[error("读写文件失败：{0}")]
    Io(#[from] std::io::Error),
    #[error("序列化失败：{0}")]
    Serialization(String),
}

impl From<bincode::Error> for EignError {
    fn from(err: bincode::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for EignError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
