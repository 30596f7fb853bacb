use std::f32::consts::PI;

use num_traits::One;

use crate::graph::Edge;
use crate::tensor::C32;

/// 磁性关联矩阵中的一列。每条边只在起点、终点两行上有非零元素，
/// 因此只保存这两个位置及其（带符号/无符号）取值
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct IncidenceColumn {
    pub source: usize,
    pub target: usize,
    /// 带符号模态：`[-e^{iθ}, e^{-iθ}]`
    pub signed: [C32; 2],
    /// 无符号模态：`[e^{iθ}, e^{-iθ}]`
    pub unsigned: [C32; 2],
}

impl IncidenceColumn {
    /// `source_scale`、`target_scale`是归一化时两端节点的`deg^-1/2`，不归一化时为1
    pub fn new(edge: &Edge, q: f32, source_scale: f32, target_scale: f32) -> Self {
        let phase = edge_phase(edge, q);
        let at_source = phase * source_scale;
        let at_target = phase.conj() * target_scale;
        Self {
            source: edge.source,
            target: edge.target,
            signed: [-at_source, at_target],
            unsigned: [at_source, at_target],
        }
    }

    #[inline]
    pub fn entries(&self, signed: bool) -> [C32; 2] {
        if signed { self.signed } else { self.unsigned }
    }
}

/// 有向边的相位为`e^{iπq}`，无向边不带相位
pub(super) fn edge_phase(edge: &Edge, q: f32) -> C32 {
    if edge.directed {
        C32::from_polar(1.0, PI * q)
    } else {
        C32::one()
    }
}
