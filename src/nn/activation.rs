use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::tensor::C32;

/// 逐元素激活函数。作用于复数时实部、虚部分别激活
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Activation {
    #[default]
    Identity,
    ReLU,
    LeakyReLU(f32),
    Tanh,
    Sigmoid,
}

impl Activation {
    pub fn apply_scalar(&self, x: f32) -> f32 {
        match self {
            Self::Identity => x,
            Self::ReLU => x.max(0.0),
            Self::LeakyReLU(slope) => {
                if x > 0.0 {
                    x
                } else {
                    slope * x
                }
            }
            Self::Tanh => x.tanh(),
            Self::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }

    pub fn apply(&self, x: &Array2<C32>) -> Array2<C32> {
        if *self == Self::Identity {
            return x.clone();
        }
        x.mapv(|v| C32::new(self.apply_scalar(v.re), self.apply_scalar(v.im)))
    }

    /// 奇函数`f(-x) = -f(x)`才能用于带符号模态，否则翻转边方向时输出不再随之变号
    pub fn is_odd(&self) -> bool {
        matches!(self, Self::Identity | Self::Tanh)
    }
}
