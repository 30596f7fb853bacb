/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : EIGN 块：同时建模带符号（方向等变）与无符号（方向不变）两种模态
 *
 * 块最多持有四个卷积：带符号→带符号、无符号→无符号，
 * 以及开启融合（fusion）时的带符号→无符号、无符号→带符号。
 * 具体用哪种卷积由`ConvolutionKind`决定，块本身的前向传播与卷积种类无关。
 */

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::conv::{ConvOptions, Convolution, ConvolutionKind, EdgeConv};
use super::{Activation, EdgeSignal, Module, Parameter};
use crate::errors::{EignError, Modality};
use crate::laplacian::{MagneticEdgeLaplacian, SignalDomain};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockConfig {
    pub in_channels_signed: usize,
    pub out_channels_signed: usize,
    pub in_channels_unsigned: usize,
    pub out_channels_unsigned: usize,
    /// 是否在两种模态之间交换信息
    pub use_fusion: bool,
    /// 块内卷积的配置；其中的激活函数会被忽略，块在求和之后统一激活
    pub conv: ConvOptions,
    /// 必须是奇函数
    pub signed_activation: Activation,
    pub unsigned_activation: Activation,
}

impl Default for BlockConfig {
    fn default() -> Self {
        Self {
            in_channels_signed: 0,
            out_channels_signed: 0,
            in_channels_unsigned: 0,
            out_channels_unsigned: 0,
            use_fusion: true,
            conv: ConvOptions::default(),
            signed_activation: Activation::Tanh,
            unsigned_activation: Activation::ReLU,
        }
    }
}

impl BlockConfig {
    pub fn channels(
        in_channels_signed: usize,
        out_channels_signed: usize,
        in_channels_unsigned: usize,
        out_channels_unsigned: usize,
    ) -> Self {
        Self {
            in_channels_signed,
            out_channels_signed,
            in_channels_unsigned,
            out_channels_unsigned,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct EIGNBlock {
    kind: ConvolutionKind,
    config: BlockConfig,
    signed_conv: Option<EdgeConv>,
    unsigned_conv: Option<EdgeConv>,
    signed_to_unsigned_conv: Option<EdgeConv>,
    unsigned_to_signed_conv: Option<EdgeConv>,
    name: String,
}

impl EIGNBlock {
    pub fn new(
        kind: ConvolutionKind,
        config: &BlockConfig,
        rng: &mut StdRng,
        name: &str,
    ) -> Result<Self, EignError> {
        if !config.signed_activation.is_odd() {
            return Err(EignError::InvalidConfig(format!(
                "块`{name}`：带符号模态的激活函数须为奇函数，实际为{:?}",
                config.signed_activation
            )));
        }
        if config.use_fusion && config.conv.domain == SignalDomain::Node {
            return Err(EignError::InvalidConfig(format!(
                "块`{name}`：节点域不支持模态融合"
            )));
        }
        for (modality, in_self, in_other, out) in [
            (
                Modality::Signed,
                config.in_channels_signed,
                config.in_channels_unsigned,
                config.out_channels_signed,
            ),
            (
                Modality::Unsigned,
                config.in_channels_unsigned,
                config.in_channels_signed,
                config.out_channels_unsigned,
            ),
        ] {
            let reachable = in_self > 0 || (config.use_fusion && in_other > 0);
            if out > 0 && !reachable {
                return Err(EignError::InvalidConfig(format!(
                    "块`{name}`：{modality}模态有{out}个输出通道，但没有任何输入能到达它"
                )));
            }
        }

        let mut block = Self {
            kind,
            config: *config,
            signed_conv: None,
            unsigned_conv: None,
            signed_to_unsigned_conv: None,
            unsigned_to_signed_conv: None,
            name: name.to_string(),
        };
        block.signed_conv = block.initialize_convolution(true, true, rng, "signed")?;
        block.unsigned_conv = block.initialize_convolution(false, false, rng, "unsigned")?;
        if config.use_fusion {
            block.signed_to_unsigned_conv =
                block.initialize_convolution(true, false, rng, "signed_to_unsigned")?;
            block.unsigned_to_signed_conv =
                block.initialize_convolution(false, true, rng, "unsigned_to_signed")?;
        }

        tracing::debug!(
            block = %block.name,
            kind = ?kind,
            signed = ?(config.in_channels_signed, config.out_channels_signed),
            unsigned = ?(config.in_channels_unsigned, config.out_channels_unsigned),
            fusion = config.use_fusion,
            "构建EIGN块"
        );
        Ok(block)
    }

    /// 仅使用`MagneticEdgeLaplacianConv`的块
    pub fn magnetic_edge_laplacian(
        config: &BlockConfig,
        rng: &mut StdRng,
        name: &str,
    ) -> Result<Self, EignError> {
        Self::new(ConvolutionKind::MagneticEdgeLaplacian, config, rng, name)
    }

    /// 使用`MagneticEdgeLaplacianWithNodeTransformationConv`的块
    pub fn magnetic_edge_laplacian_with_node_transformation(
        config: &BlockConfig,
        rng: &mut StdRng,
        name: &str,
    ) -> Result<Self, EignError> {
        Self::new(
            ConvolutionKind::MagneticEdgeLaplacianWithNodeTransformation,
            config,
            rng,
            name,
        )
    }

    // 输入或输出通道为0的方向不需要卷积
    fn initialize_convolution(
        &self,
        signed_in: bool,
        signed_out: bool,
        rng: &mut StdRng,
        suffix: &str,
    ) -> Result<Option<EdgeConv>, EignError> {
        let in_channels = self.in_channels(Modality::from_signed(signed_in));
        let out_channels = self.out_channels(Modality::from_signed(signed_out));
        if in_channels == 0 || out_channels == 0 {
            return Ok(None);
        }
        let options = ConvOptions {
            activation: Activation::Identity,
            bias: self.config.conv.bias && (!signed_out || self.kind.supports_signed_bias(self.domain())),
            ..self.config.conv
        };
        self.kind
            .initialize_convolution(
                in_channels,
                out_channels,
                signed_in,
                signed_out,
                &options,
                rng,
                &format!("{}.{suffix}", self.name),
            )
            .map(Some)
    }

    pub fn kind(&self) -> ConvolutionKind {
        self.kind
    }

    pub fn config(&self) -> &BlockConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> SignalDomain {
        self.config.conv.domain
    }

    pub fn in_channels(&self, modality: Modality) -> usize {
        match modality {
            Modality::Signed => self.config.in_channels_signed,
            Modality::Unsigned => self.config.in_channels_unsigned,
        }
    }

    pub fn out_channels(&self, modality: Modality) -> usize {
        match modality {
            Modality::Signed => self.config.out_channels_signed,
            Modality::Unsigned => self.config.out_channels_unsigned,
        }
    }

    /// 块内实际创建的卷积
    pub fn convolutions(&self) -> impl Iterator<Item = &EdgeConv> {
        [
            &self.signed_conv,
            &self.unsigned_conv,
            &self.signed_to_unsigned_conv,
            &self.unsigned_to_signed_conv,
        ]
        .into_iter()
        .flatten()
    }

    /// 前向传播：
    /// - `signed'   = σ_s(conv_ss(x_s) + conv_us(x_u))`
    /// - `unsigned' = σ_u(conv_uu(x_u) + conv_su(x_s))`
    pub fn forward(
        &self,
        laplacian: &MagneticEdgeLaplacian,
        x: &EdgeSignal,
    ) -> Result<EdgeSignal, EignError> {
        let rows = laplacian.signal_len(self.domain());
        let expected = [
            (Modality::Signed, x.signed_channels()),
            (Modality::Unsigned, x.unsigned_channels()),
        ];
        for (modality, got) in expected {
            if got != self.in_channels(modality) || x.rows() != rows {
                return Err(EignError::ShapeMismatch {
                    context: format!("块`{}`的{modality}输入", self.name),
                    expected: vec![rows, self.in_channels(modality)],
                    got: vec![x.rows(), got],
                });
            }
        }

        let mut out = EdgeSignal::zeros(
            rows,
            self.config.out_channels_signed,
            self.config.out_channels_unsigned,
        );
        for conv in self.convolutions() {
            let input = if conv.signed_in() { &x.signed } else { &x.unsigned };
            let y = conv.forward(laplacian, input)?;
            if conv.signed_out() {
                out.signed += &y;
            } else {
                out.unsigned += &y;
            }
        }

        Ok(EdgeSignal {
            signed: self.config.signed_activation.apply(&out.signed),
            unsigned: self.config.unsigned_activation.apply(&out.unsigned),
        })
    }
}

impl Module for EIGNBlock {
    fn parameters(&self) -> Vec<&Parameter> {
        self.convolutions().flat_map(|c| c.parameters()).collect()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        [
            &mut self.signed_conv,
            &mut self.unsigned_conv,
            &mut self.signed_to_unsigned_conv,
            &mut self.unsigned_to_signed_conv,
        ]
        .into_iter()
        .flatten()
        .flat_map(|c| c.parameters_mut())
        .collect()
    }
}
