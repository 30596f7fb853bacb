use ndarray::Array2;
use rand::rngs::StdRng;

use super::{ConvOptions, Convolution, check_channels, check_domain, check_input};
use crate::errors::{ComparisonOperator, EignError};
use crate::laplacian::{MagneticEdgeLaplacian, SignalDomain};
use crate::nn::{Activation, Init, Module, Parameter};
use crate::tensor::{C32, mat_mul_real, to_complex};

/// 带节点变换的磁性边拉普拉斯卷积
///
/// 拉普拉斯`L = B_outᴴ·B_in`被拆成两半，中间插入一个节点级的线性变换：
/// `out = σ(B_outᴴ · ((B_in · X · W) · W_node + b_node))`，重复k次。
/// 节点信号不随边方向翻转而变化，所以偏置放在节点上对两种输出模态都是安全的。
/// 节点域信号则反过来在边上做变换，此时偏置只能用于无符号模态，且输入输出模态必须相同。
#[derive(Debug, Clone)]
pub struct MagneticEdgeLaplacianWithNodeTransformationConv {
    /// 权重参数 [in_channels, out_channels]
    weight: Parameter,
    /// 节点变换权重 [out_channels, out_channels]
    node_weight: Parameter,
    /// 节点变换偏置 [1, out_channels]（可选）
    node_bias: Option<Parameter>,
    in_channels: usize,
    out_channels: usize,
    signed_in: bool,
    signed_out: bool,
    hops: usize,
    activation: Activation,
    domain: SignalDomain,
    name: String,
}

impl MagneticEdgeLaplacianWithNodeTransformationConv {
    pub fn new(
        in_channels: usize,
        out_channels: usize,
        signed_in: bool,
        signed_out: bool,
        options: &ConvOptions,
        rng: &mut StdRng,
        name: &str,
    ) -> Result<Self, EignError> {
        check_channels(in_channels, out_channels)?;
        if options.hops < 1 {
            return Err(EignError::ValueMustSatisfyComparison {
                value_name: "hops".to_string(),
                operator: ComparisonOperator::GreaterOrEqual,
                threshold: 1,
            });
        }
        check_domain(options, signed_in, signed_out, name)?;
        if options.domain == SignalDomain::Node && options.bias && signed_in {
            return Err(EignError::InvalidConfig(format!(
                "卷积`{name}`：节点域中偏置加在边上，带符号模态不能使用偏置"
            )));
        }

        let weight = Parameter::init(
            &format!("{name}_W"),
            (in_channels, out_channels),
            options.init,
            rng,
        );
        let node_weight = Parameter::init(
            &format!("{name}_node_W"),
            (out_channels, out_channels),
            options.init,
            rng,
        );
        let node_bias = options.bias.then(|| {
            Parameter::init(
                &format!("{name}_node_b"),
                (1, out_channels),
                Init::Zeros,
                rng,
            )
        });

        Ok(Self {
            weight,
            node_weight,
            node_bias,
            in_channels,
            out_channels,
            signed_in,
            signed_out,
            hops: options.hops,
            activation: options.activation,
            domain: options.domain,
            name: name.to_string(),
        })
    }

    pub fn hops(&self) -> usize {
        self.hops
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight(&self) -> &Parameter {
        &self.weight
    }

    pub fn weight_mut(&mut self) -> &mut Parameter {
        &mut self.weight
    }

    pub fn node_weight(&self) -> &Parameter {
        &self.node_weight
    }

    pub fn node_weight_mut(&mut self) -> &mut Parameter {
        &mut self.node_weight
    }

    pub fn node_bias(&self) -> Option<&Parameter> {
        self.node_bias.as_ref()
    }
}

impl Convolution for MagneticEdgeLaplacianWithNodeTransformationConv {
    fn in_channels(&self) -> usize {
        self.in_channels
    }

    fn out_channels(&self) -> usize {
        self.out_channels
    }

    fn signed_in(&self) -> bool {
        self.signed_in
    }

    fn signed_out(&self) -> bool {
        self.signed_out
    }

    fn domain(&self) -> SignalDomain {
        self.domain
    }

    fn forward(
        &self,
        laplacian: &MagneticEdgeLaplacian,
        x: &Array2<C32>,
    ) -> Result<Array2<C32>, EignError> {
        check_input(laplacian, self.domain, self.in_channels, x, &self.name)?;

        let mut h = mat_mul_real(x, self.weight.value(), &self.name)?;
        for hop in 0..self.hops {
            let signed_in = if hop == 0 { self.signed_in } else { self.signed_out };
            let lifted = laplacian.lift(self.domain, signed_in, &h)?;
            let mut transformed = mat_mul_real(&lifted, self.node_weight.value(), &self.name)?;
            if let Some(ref bias) = self.node_bias {
                transformed += &to_complex(bias.value());
            }
            h = laplacian.project(self.domain, self.signed_out, &transformed)?;
        }

        tracing::trace!(conv = %self.name, shape = ?h.shape(), "卷积前向（节点变换）");
        Ok(self.activation.apply(&h))
    }
}

impl Module for MagneticEdgeLaplacianWithNodeTransformationConv {
    fn parameters(&self) -> Vec<&Parameter> {
        let mut params = vec![&self.weight, &self.node_weight];
        if let Some(ref bias) = self.node_bias {
            params.push(bias);
        }
        params
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        let mut params = vec![&mut self.weight, &mut self.node_weight];
        if let Some(ref mut bias) = self.node_bias {
            params.push(bias);
        }
        params
    }
}
