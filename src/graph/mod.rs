/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 有向图拓扑：节点数 + 有向/无向边列表
 *
 * 无向边同样带有一个“参考方向”（source → target），它决定带符号模态中
 * 该边信号的正负号，但不带磁性相位。
 */

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::errors::EignError;

#[cfg(test)]
mod tests;

/// 一条边。`directed`为真时，边的方向会以相位的形式编码进磁性关联矩阵
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub directed: bool,
}

impl Edge {
    pub const fn directed(source: usize, target: usize) -> Self {
        Self {
            source,
            target,
            directed: true,
        }
    }

    pub const fn undirected(source: usize, target: usize) -> Self {
        Self {
            source,
            target,
            directed: false,
        }
    }

    /// 交换两个端点（有向边即反向，无向边即翻转参考方向）
    pub const fn flipped(&self) -> Self {
        Self {
            source: self.target,
            target: self.source,
            directed: self.directed,
        }
    }
}

/// 经过校验的图：所有端点都在`[0, num_nodes)`内且没有自环。
/// 构造后不可变
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectedGraph {
    num_nodes: usize,
    edges: Vec<Edge>,
}

impl DirectedGraph {
    pub fn new(num_nodes: usize, edges: Vec<Edge>) -> Result<Self, EignError> {
        for (idx, edge) in edges.iter().enumerate() {
            for node in [edge.source, edge.target] {
                if node >= num_nodes {
                    return Err(EignError::NodeOutOfRange {
                        edge: idx,
                        node,
                        num_nodes,
                    });
                }
            }
            if edge.source == edge.target {
                return Err(EignError::SelfLoop {
                    edge: idx,
                    node: edge.source,
                });
            }
        }
        Ok(Self { num_nodes, edges })
    }

    /// 从形如`[2, E]`的边索引构造，第0行为起点、第1行为终点。
    /// `is_directed`为`None`时所有边都视为有向边
    pub fn from_edge_index(
        num_nodes: usize,
        edge_index: &Array2<usize>,
        is_directed: Option<&[bool]>,
    ) -> Result<Self, EignError> {
        if edge_index.nrows() != 2 {
            return Err(EignError::MalformedEdgeList(format!(
                "边索引的形状须为[2, E]，实际为{:?}",
                edge_index.shape()
            )));
        }
        let num_edges = edge_index.ncols();
        if let Some(mask) = is_directed {
            if mask.len() != num_edges {
                return Err(EignError::MalformedEdgeList(format!(
                    "方向掩码长度{}与边数{}不一致",
                    mask.len(),
                    num_edges
                )));
            }
        }

        let edges = (0..num_edges)
            .map(|e| Edge {
                source: edge_index[[0, e]],
                target: edge_index[[1, e]],
                directed: is_directed.map_or(true, |mask| mask[e]),
            })
            .collect();
        Self::new(num_nodes, edges)
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// 所有节点的度（出边 + 入边，重边分别计数），一次遍历算完
    pub fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0; self.num_nodes];
        for edge in &self.edges {
            degrees[edge.source] += 1;
            degrees[edge.target] += 1;
        }
        degrees
    }

    /// 所有边反向后的图
    pub fn reversed(&self) -> Self {
        Self {
            num_nodes: self.num_nodes,
            edges: self.edges.iter().map(Edge::flipped).collect(),
        }
    }

    /// 仅翻转第`edge`条边的方向
    pub fn flip_orientation(&self, edge: usize) -> Result<Self, EignError> {
        if edge >= self.edges.len() {
            return Err(EignError::MalformedEdgeList(format!(
                "边编号{}越界，图中只有{}条边",
                edge,
                self.edges.len()
            )));
        }
        let mut edges = self.edges.clone();
        edges[edge] = edges[edge].flipped();
        Ok(Self {
            num_nodes: self.num_nodes,
            edges,
        })
    }
}
