/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 以磁性边拉普拉斯为图移位算子的卷积层
 *
 * 卷积种类是一个封闭集合，用 enum_dispatch 分发：
 * - `MagneticEdgeLaplacianConv`：out = σ(L^k·X·W + b)
 * - `MagneticEdgeLaplacianWithNodeTransformationConv`：在关联矩阵两半之间插入节点级线性变换
 */

mod magnetic_edge_laplacian;
mod node_transformation;

pub use magnetic_edge_laplacian::MagneticEdgeLaplacianConv;
pub use node_transformation::MagneticEdgeLaplacianWithNodeTransformationConv;

use enum_dispatch::enum_dispatch;
use ndarray::Array2;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::{Activation, Init, Module, Parameter};
use crate::errors::{ComparisonOperator, EignError};
use crate::laplacian::{MagneticEdgeLaplacian, SignalDomain};
use crate::tensor::C32;

/// 卷积层的公共配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvOptions {
    /// 拉普拉斯作用次数k
    pub hops: usize,
    pub bias: bool,
    pub activation: Activation,
    pub domain: SignalDomain,
    /// 权重的初始化方式（偏置总是零初始化）
    pub init: Init,
}

impl Default for ConvOptions {
    fn default() -> Self {
        Self {
            hops: 1,
            bias: true,
            activation: Activation::Identity,
            domain: SignalDomain::Edge,
            init: Init::Xavier,
        }
    }
}

#[enum_dispatch]
pub trait Convolution {
    fn in_channels(&self) -> usize;

    fn out_channels(&self) -> usize;

    /// 输入是否为带符号模态
    fn signed_in(&self) -> bool;

    /// 输出是否为带符号模态
    fn signed_out(&self) -> bool;

    fn domain(&self) -> SignalDomain;

    /// 前向传播：`x`形状为`[signal_len, in_channels]`，输出`[signal_len, out_channels]`。
    /// 拉普拉斯算子只读
    fn forward(
        &self,
        laplacian: &MagneticEdgeLaplacian,
        x: &Array2<C32>,
    ) -> Result<Array2<C32>, EignError>;
}

#[enum_dispatch(Convolution)]
#[derive(Debug, Clone)]
pub enum EdgeConv {
    MagneticEdgeLaplacianConv,
    MagneticEdgeLaplacianWithNodeTransformationConv,
}

impl Module for EdgeConv {
    fn parameters(&self) -> Vec<&Parameter> {
        match self {
            Self::MagneticEdgeLaplacianConv(conv) => conv.parameters(),
            Self::MagneticEdgeLaplacianWithNodeTransformationConv(conv) => conv.parameters(),
        }
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        match self {
            Self::MagneticEdgeLaplacianConv(conv) => conv.parameters_mut(),
            Self::MagneticEdgeLaplacianWithNodeTransformationConv(conv) => conv.parameters_mut(),
        }
    }
}

/// 卷积种类，块通过它创建自己的卷积
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConvolutionKind {
    #[default]
    MagneticEdgeLaplacian,
    MagneticEdgeLaplacianWithNodeTransformation,
}

impl ConvolutionKind {
    pub fn initialize_convolution(
        &self,
        in_channels: usize,
        out_channels: usize,
        signed_in: bool,
        signed_out: bool,
        options: &ConvOptions,
        rng: &mut StdRng,
        name: &str,
    ) -> Result<EdgeConv, EignError> {
        Ok(match self {
            Self::MagneticEdgeLaplacian => MagneticEdgeLaplacianConv::new(
                in_channels,
                out_channels,
                signed_in,
                signed_out,
                options,
                rng,
                name,
            )?
            .into(),
            Self::MagneticEdgeLaplacianWithNodeTransformation => {
                MagneticEdgeLaplacianWithNodeTransformationConv::new(
                    in_channels,
                    out_channels,
                    signed_in,
                    signed_out,
                    options,
                    rng,
                    name,
                )?
                .into()
            }
        })
    }

    /// 偏置是否可以用在带符号输出上而不破坏方向等变性。
    /// 节点域里节点变换卷积的偏置落在边上，对带符号模态不安全
    pub fn supports_signed_bias(&self, domain: SignalDomain) -> bool {
        matches!(self, Self::MagneticEdgeLaplacianWithNodeTransformation)
            && domain == SignalDomain::Edge
    }
}

// ==================== 两种卷积共用的校验 ====================

fn check_channels(in_channels: usize, out_channels: usize) -> Result<(), EignError> {
    for (value_name, value) in [("in_channels", in_channels), ("out_channels", out_channels)] {
        if value < 1 {
            return Err(EignError::ValueMustSatisfyComparison {
                value_name: value_name.to_string(),
                operator: ComparisonOperator::GreaterOrEqual,
                threshold: 1,
            });
        }
    }
    Ok(())
}

// 节点域中`B_out·B_inᴴ`在模态不同时会随无向边参考方向的翻转而变号
fn check_domain(
    options: &ConvOptions,
    signed_in: bool,
    signed_out: bool,
    name: &str,
) -> Result<(), EignError> {
    if options.domain == SignalDomain::Node && signed_in != signed_out {
        return Err(EignError::InvalidConfig(format!(
            "卷积`{name}`：节点域不支持带符号与无符号模态之间的转换"
        )));
    }
    Ok(())
}

fn check_input(
    laplacian: &MagneticEdgeLaplacian,
    domain: SignalDomain,
    in_channels: usize,
    x: &Array2<C32>,
    name: &str,
) -> Result<(), EignError> {
    let expected = [laplacian.signal_len(domain), in_channels];
    if x.shape() != &expected[..] {
        return Err(EignError::ShapeMismatch {
            context: format!("卷积`{name}`的输入"),
            expected: expected.to_vec(),
            got: x.shape().to_vec(),
        });
    }
    Ok(())
}
