/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 磁性边拉普拉斯算子（Magnetic Edge Laplacian）
 *
 * 对边 e = (u, v)，有向边的相位 θ = πq，无向边 θ = 0：
 * - 无符号关联矩阵：B[u,e] = e^{iθ}，  B[v,e] = e^{-iθ}
 * - 带符号关联矩阵：B[u,e] = -e^{iθ}， B[v,e] = e^{-iθ}
 *
 * 节点空间的拉普拉斯为 B·Bᴴ（N×N），边空间的拉普拉斯为 B_outᴴ·B_in（E×E）。
 * 算子按图构建一次，之后只读，可在任意多次前向传播之间共享。
 */

mod incidence;

use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};

use self::incidence::IncidenceColumn;
use crate::errors::EignError;
use crate::graph::DirectedGraph;
use crate::tensor::{C32, conj_transpose};

#[cfg(test)]
mod tests;

/// 拉普拉斯的归一化方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Normalization {
    /// 不归一化：`B·Bᴴ`
    #[default]
    None,
    /// 对称归一化：关联矩阵的第n行乘以`deg(n)^-1/2`（孤立节点为0），
    /// 即节点空间`D^-1/2·B·Bᴴ·D^-1/2`、边空间`Bᴴ·D^-1·B`
    Symmetric,
}

/// 信号所在的空间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignalDomain {
    /// 边信号，形状`[E, C]`，拉普拉斯为`B_outᴴ·B_in`
    #[default]
    Edge,
    /// 节点信号，形状`[N, C]`，拉普拉斯为`B_out·B_inᴴ`
    Node,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaplacianConfig {
    /// 磁性相位参数q，有向边的相位为πq
    pub q: f32,
    pub normalization: Normalization,
    /// 是否允许没有边的图（此时B为N×0，L为全零）
    pub allow_edgeless: bool,
}

impl Default for LaplacianConfig {
    fn default() -> Self {
        Self {
            q: 0.25,
            normalization: Normalization::None,
            allow_edgeless: true,
        }
    }
}

impl LaplacianConfig {
    pub fn with_q(q: f32) -> Self {
        Self {
            q,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<(), EignError> {
        if !self.q.is_finite() {
            return Err(EignError::InvalidConfig(format!(
                "相位参数q须为有限值，实际为{}",
                self.q
            )));
        }
        Ok(())
    }
}

/// 磁性边拉普拉斯算子，内部以稀疏的关联矩阵列保存
#[derive(Debug, Clone)]
pub struct MagneticEdgeLaplacian {
    num_nodes: usize,
    columns: Vec<IncidenceColumn>,
    config: LaplacianConfig,
}

impl MagneticEdgeLaplacian {
    pub fn new(graph: &DirectedGraph, config: &LaplacianConfig) -> Result<Self, EignError> {
        config.validate()?;
        if graph.num_edges() == 0 && !config.allow_edgeless {
            return Err(EignError::NoEdges);
        }

        let scales: Vec<f32> = match config.normalization {
            Normalization::None => vec![1.0; graph.num_nodes()],
            Normalization::Symmetric => graph
                .degrees()
                .into_iter()
                .map(|d| if d == 0 { 0.0 } else { (d as f32).sqrt().recip() })
                .collect(),
        };
        let columns = graph
            .edges()
            .iter()
            .map(|e| IncidenceColumn::new(e, config.q, scales[e.source], scales[e.target]))
            .collect();

        tracing::debug!(
            num_nodes = graph.num_nodes(),
            num_edges = graph.num_edges(),
            q = config.q,
            normalization = ?config.normalization,
            "构建磁性边拉普拉斯算子"
        );

        Ok(Self {
            num_nodes: graph.num_nodes(),
            columns,
            config: *config,
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_edges(&self) -> usize {
        self.columns.len()
    }

    pub fn config(&self) -> &LaplacianConfig {
        &self.config
    }

    /// 在`domain`上的信号行数
    pub fn signal_len(&self, domain: SignalDomain) -> usize {
        match domain {
            SignalDomain::Edge => self.num_edges(),
            SignalDomain::Node => self.num_nodes,
        }
    }

    /// 稠密的磁性关联矩阵，形状`[N, E]`
    pub fn incidence(&self, signed: bool) -> Array2<C32> {
        let mut b = Array2::zeros((self.num_nodes, self.num_edges()));
        for (e, col) in self.columns.iter().enumerate() {
            let [bu, bv] = col.entries(signed);
            b[[col.source, e]] = bu;
            b[[col.target, e]] = bv;
        }
        b
    }

    /// 节点空间拉普拉斯`B·Bᴴ`，形状`[N, N]`。
    /// 逐边累加，(i,j)与(j,i)两处总是以相同顺序累加互为共轭的量，所以结果严格Hermitian
    pub fn node_laplacian(&self, signed: bool) -> Array2<C32> {
        let mut l = Array2::zeros((self.num_nodes, self.num_nodes));
        for col in &self.columns {
            let [bu, bv] = col.entries(signed);
            let (u, v) = (col.source, col.target);
            l[[u, u]] += C32::new(bu.norm_sqr(), 0.0);
            l[[v, v]] += C32::new(bv.norm_sqr(), 0.0);
            l[[u, v]] += bu * bv.conj();
            l[[v, u]] += bv * bu.conj();
        }
        l
    }

    /// 边空间拉普拉斯`B_outᴴ·B_in`，形状`[E, E]`。
    /// 输入、输出模态相同时为Hermitian半正定矩阵
    pub fn edge_laplacian(&self, signed_in: bool, signed_out: bool) -> Array2<C32> {
        conj_transpose(&self.incidence(signed_out)).dot(&self.incidence(signed_in))
    }

    /// 对`x`施加一次拉普拉斯：`project(signed_out, lift(signed_in, x))`
    pub fn apply(
        &self,
        domain: SignalDomain,
        signed_in: bool,
        signed_out: bool,
        x: &Array2<C32>,
    ) -> Result<Array2<C32>, EignError> {
        let hidden = self.lift(domain, signed_in, x)?;
        self.project(domain, signed_out, &hidden)
    }

    /// 拉普拉斯的前半部分：边信号 → 节点（`B·x`），节点信号 → 边（`Bᴴ·x`）
    pub fn lift(
        &self,
        domain: SignalDomain,
        signed: bool,
        x: &Array2<C32>,
    ) -> Result<Array2<C32>, EignError> {
        self.check_rows(x, self.signal_len(domain), "lift的输入")?;
        Ok(match domain {
            SignalDomain::Edge => self.mul_incidence(signed, x),
            SignalDomain::Node => self.mul_incidence_h(signed, x),
        })
    }

    /// 拉普拉斯的后半部分：节点 → 边信号（`Bᴴ·h`），边 → 节点信号（`B·h`）
    pub fn project(
        &self,
        domain: SignalDomain,
        signed: bool,
        h: &Array2<C32>,
    ) -> Result<Array2<C32>, EignError> {
        match domain {
            SignalDomain::Edge => {
                self.check_rows(h, self.num_nodes, "project的输入")?;
                Ok(self.mul_incidence_h(signed, h))
            }
            SignalDomain::Node => {
                self.check_rows(h, self.num_edges(), "project的输入")?;
                Ok(self.mul_incidence(signed, h))
            }
        }
    }

    // `B·x`：[E, C] → [N, C]
    fn mul_incidence(&self, signed: bool, x: &Array2<C32>) -> Array2<C32> {
        let mut out = Array2::zeros((self.num_nodes, x.ncols()));
        for (e, col) in self.columns.iter().enumerate() {
            let [bu, bv] = col.entries(signed);
            out.row_mut(col.source).scaled_add(bu, &x.row(e));
            out.row_mut(col.target).scaled_add(bv, &x.row(e));
        }
        out
    }

    // `Bᴴ·h`：[N, C] → [E, C]
    fn mul_incidence_h(&self, signed: bool, h: &Array2<C32>) -> Array2<C32> {
        let mut out = Array2::zeros((self.num_edges(), h.ncols()));
        for (e, col) in self.columns.iter().enumerate() {
            let [bu, bv] = col.entries(signed);
            let (cu, cv) = (bu.conj(), bv.conj());
            Zip::from(out.row_mut(e))
                .and(h.row(col.source))
                .and(h.row(col.target))
                .for_each(|y, &a, &b| *y = cu * a + cv * b);
        }
        out
    }

    fn check_rows(&self, x: &Array2<C32>, rows: usize, context: &str) -> Result<(), EignError> {
        if x.nrows() != rows {
            return Err(EignError::ShapeMismatch {
                context: context.to_string(),
                expected: vec![rows, x.ncols()],
                got: x.shape().to_vec(),
            });
        }
        Ok(())
    }
}
