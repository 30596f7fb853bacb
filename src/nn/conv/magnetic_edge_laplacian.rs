use ndarray::Array2;
use rand::rngs::StdRng;

use super::{ConvOptions, Convolution, check_channels, check_domain, check_input};
use crate::errors::EignError;
use crate::laplacian::{MagneticEdgeLaplacian, SignalDomain};
use crate::nn::{Activation, Init, Module, Parameter};
use crate::tensor::{C32, mat_mul_real, to_complex};

/// 磁性边拉普拉斯卷积：`out = σ(L^k · X · W + b)`
///
/// 第一次作用拉普拉斯时从`signed_in`模态映射到`signed_out`模态，之后都在`signed_out`模态内。
///
/// # 输入/输出形状
/// - 输入：[signal_len, in_channels]
/// - 输出：[signal_len, out_channels]
#[derive(Debug, Clone)]
pub struct MagneticEdgeLaplacianConv {
    /// 权重参数 [in_channels, out_channels]
    weight: Parameter,
    /// 偏置参数 [1, out_channels]（可选，仅无符号输出）
    bias: Option<Parameter>,
    in_channels: usize,
    out_channels: usize,
    signed_in: bool,
    signed_out: bool,
    hops: usize,
    activation: Activation,
    domain: SignalDomain,
    name: String,
}

impl MagneticEdgeLaplacianConv {
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
        check_domain(options, signed_in, signed_out, name)?;
        if options.hops == 0 && signed_in != signed_out {
            return Err(EignError::InvalidConfig(format!(
                "卷积`{name}`：k=0时无法在带符号与无符号模态之间转换"
            )));
        }
        if options.bias && signed_out {
            return Err(EignError::InvalidConfig(format!(
                "卷积`{name}`：带符号输出不能使用偏置，否则破坏方向等变性"
            )));
        }

        let weight = Parameter::init(
            &format!("{name}_W"),
            (in_channels, out_channels),
            options.init,
            rng,
        );
        let bias = options
            .bias
            .then(|| Parameter::init(&format!("{name}_b"), (1, out_channels), Init::Zeros, rng));

        Ok(Self {
            weight,
            bias,
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

    pub fn bias(&self) -> Option<&Parameter> {
        self.bias.as_ref()
    }
}

impl Convolution for MagneticEdgeLaplacianConv {
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

        // 先乘权重：L·(X·W) = (L·X)·W
        let mut h = mat_mul_real(x, self.weight.value(), &self.name)?;
        for hop in 0..self.hops {
            let signed_in = if hop == 0 { self.signed_in } else { self.signed_out };
            h = laplacian.apply(self.domain, signed_in, self.signed_out, &h)?;
        }
        if let Some(ref bias) = self.bias {
            h += &to_complex(bias.value());
        }

        tracing::trace!(conv = %self.name, shape = ?h.shape(), "卷积前向");
        Ok(self.activation.apply(&h))
    }
}

impl Module for MagneticEdgeLaplacianConv {
    fn parameters(&self) -> Vec<&Parameter> {
        let mut params = vec![&self.weight];
        if let Some(ref bias) = self.bias {
            params.push(bias);
        }
        params
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        let mut params = vec![&mut self.weight];
        if let Some(ref mut bias) = self.bias {
            params.push(bias);
        }
        params
    }
}
