/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : EIGN 模型：若干 EIGN 块的堆叠
 */

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::block::{BlockConfig, EIGNBlock};
use super::conv::{ConvOptions, ConvolutionKind};
use super::{Activation, EdgeSignal, Module, Parameter, StateDict};
use crate::errors::{ComparisonOperator, EignError, Modality};
use crate::laplacian::{MagneticEdgeLaplacian, SignalDomain};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EIGNConfig {
    pub in_channels_signed: usize,
    pub in_channels_unsigned: usize,
    pub hidden_channels_signed: usize,
    pub hidden_channels_unsigned: usize,
    pub out_channels_signed: usize,
    pub out_channels_unsigned: usize,
    pub num_blocks: usize,
    pub kind: ConvolutionKind,
    pub use_fusion: bool,
    pub conv: ConvOptions,
    /// 隐藏层的激活函数；最后一个块不激活
    pub signed_activation: Activation,
    pub unsigned_activation: Activation,
    /// 参数初始化的随机种子
    pub seed: u64,
}

impl Default for EIGNConfig {
    fn default() -> Self {
        Self {
            in_channels_signed: 1,
            in_channels_unsigned: 1,
            hidden_channels_signed: 16,
            hidden_channels_unsigned: 16,
            out_channels_signed: 1,
            out_channels_unsigned: 1,
            num_blocks: 2,
            kind: ConvolutionKind::MagneticEdgeLaplacian,
            use_fusion: true,
            conv: ConvOptions::default(),
            signed_activation: Activation::Tanh,
            unsigned_activation: Activation::ReLU,
            seed: 42,
        }
    }
}

impl EIGNConfig {
    pub fn to_json(&self) -> Result<String, EignError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, EignError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Debug, Clone)]
pub struct EIGN {
    blocks: Vec<EIGNBlock>,
}

impl EIGN {
    pub fn new(config: &EIGNConfig) -> Result<Self, EignError> {
        check_num_blocks(config.num_blocks)?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let last = config.num_blocks - 1;
        let blocks = (0..config.num_blocks)
            .map(|i| {
                let (in_s, in_u) = if i == 0 {
                    (config.in_channels_signed, config.in_channels_unsigned)
                } else {
                    (config.hidden_channels_signed, config.hidden_channels_unsigned)
                };
                let (out_s, out_u, act_s, act_u) = if i == last {
                    (
                        config.out_channels_signed,
                        config.out_channels_unsigned,
                        Activation::Identity,
                        Activation::Identity,
                    )
                } else {
                    (
                        config.hidden_channels_signed,
                        config.hidden_channels_unsigned,
                        config.signed_activation,
                        config.unsigned_activation,
                    )
                };
                let block_config = BlockConfig {
                    in_channels_signed: in_s,
                    out_channels_signed: out_s,
                    in_channels_unsigned: in_u,
                    out_channels_unsigned: out_u,
                    use_fusion: config.use_fusion,
                    conv: config.conv,
                    signed_activation: act_s,
                    unsigned_activation: act_u,
                };
                EIGNBlock::new(config.kind, &block_config, &mut rng, &format!("block{i}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_blocks(blocks)
    }

    /// 由现成的块组装模型，检查相邻块的通道数是否衔接
    pub fn from_blocks(blocks: Vec<EIGNBlock>) -> Result<Self, EignError> {
        check_num_blocks(blocks.len())?;

        for (i, pair) in blocks.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            for modality in [Modality::Signed, Modality::Unsigned] {
                let out_channels = prev.out_channels(modality);
                let in_channels = next.in_channels(modality);
                if out_channels != in_channels {
                    return Err(EignError::ChannelMismatch {
                        block: i,
                        modality,
                        out_channels,
                        in_channels,
                    });
                }
            }
            if prev.domain() != next.domain() {
                return Err(EignError::InvalidConfig(format!(
                    "第{}个块与第{}个块的信号域不一致：{:?} vs {:?}",
                    i,
                    i + 1,
                    prev.domain(),
                    next.domain()
                )));
            }
        }

        tracing::debug!(num_blocks = blocks.len(), "构建EIGN模型");
        Ok(Self { blocks })
    }

    pub fn blocks(&self) -> &[EIGNBlock] {
        &self.blocks
    }

    pub fn domain(&self) -> SignalDomain {
        self.blocks[0].domain()
    }

    pub fn in_channels(&self, modality: Modality) -> usize {
        self.blocks[0].in_channels(modality)
    }

    pub fn out_channels(&self, modality: Modality) -> usize {
        self.blocks[self.blocks.len() - 1].out_channels(modality)
    }

    pub fn state_dict(&self) -> StateDict {
        StateDict::from_module(self)
    }

    /// 加载失败时模型参数保持不变
    pub fn load_state_dict(&mut self, state: &StateDict) -> Result<(), EignError> {
        state.load_into(self)
    }

    /// 依次通过所有块，最后一个块的输出即为预测
    pub fn forward(
        &self,
        laplacian: &MagneticEdgeLaplacian,
        x: &EdgeSignal,
    ) -> Result<EdgeSignal, EignError> {
        let mut h = self.blocks[0].forward(laplacian, x)?;
        for block in &self.blocks[1..] {
            h = block.forward(laplacian, &h)?;
        }
        tracing::trace!(
            rows = h.rows(),
            signed = h.signed_channels(),
            unsigned = h.unsigned_channels(),
            "EIGN前向"
        );
        Ok(h)
    }
}

impl Module for EIGN {
    fn parameters(&self) -> Vec<&Parameter> {
        self.blocks.iter().flat_map(|b| b.parameters()).collect()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Parameter> {
        self.blocks
            .iter_mut()
            .flat_map(|b| b.parameters_mut())
            .collect()
    }
}

fn check_num_blocks(num_blocks: usize) -> Result<(), EignError> {
    if num_blocks < 1 {
        return Err(EignError::ValueMustSatisfyComparison {
            value_name: "块数".to_string(),
            operator: ComparisonOperator::GreaterOrEqual,
            threshold: 1,
        });
    }
    Ok(())
}
