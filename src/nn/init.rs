/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 可学习参数及其初始化方式
 */

use ndarray::Array2;
use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::errors::EignError;

// ==================== Init 枚举 ====================

/// 参数初始化方式
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Init {
    /// 常数初始化
    Constant(f32),
    /// 全零
    Zeros,
    /// 全一
    Ones,
    /// 单位矩阵（非方阵时为主对角线上的1）
    Eye,
    /// 正态分布
    Normal { mean: f32, std: f32 },
    /// Kaiming/He 初始化（适用于 `ReLU`）
    Kaiming,
    /// Xavier/Glorot 初始化（适用于 Tanh）
    #[default]
    Xavier,
}

impl Init {
    /// 生成初始化后的矩阵（使用指定的 RNG）
    pub fn generate_with_rng(&self, shape: (usize, usize), rng: &mut StdRng) -> Array2<f32> {
        let (fan_in, fan_out) = shape;
        match self {
            Self::Constant(v) => Array2::from_elem(shape, *v),
            Self::Zeros => Array2::zeros(shape),
            Self::Ones => Array2::ones(shape),
            Self::Eye => Array2::from_shape_fn(shape, |(i, j)| if i == j { 1.0 } else { 0.0 }),
            Self::Normal { mean, std } => normal_with_rng(*mean, *std, shape, rng),
            Self::Kaiming => {
                let std = (2.0 / fan_in.max(1) as f32).sqrt();
                normal_with_rng(0.0, std, shape, rng)
            }
            Self::Xavier => {
                let std = (2.0 / (fan_in + fan_out).max(1) as f32).sqrt();
                normal_with_rng(0.0, std, shape, rng)
            }
        }
    }
}

/// Box-Muller 变换生成正态分布样本
fn normal_with_rng(mean: f32, std_dev: f32, shape: (usize, usize), rng: &mut StdRng) -> Array2<f32> {
    let data_len = shape.0 * shape.1;
    let mut data = Vec::with_capacity(data_len);

    while data.len() < data_len {
        let u1: f32 = rng.r#gen();
        let u2: f32 = rng.r#gen();
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = 2.0 * std::f32::consts::PI * u2;
        let z0 = mean + std_dev * r * theta.cos();
        let z1 = mean + std_dev * r * theta.sin();

        if z0.is_finite() {
            data.push(z0);
        }
        if data.len() < data_len && z1.is_finite() {
            data.push(z1);
        }
    }

    Array2::from_shape_vec(shape, data).unwrap_or_else(|_| Array2::zeros(shape))
}

// ==================== Parameter ====================

/// 带名字的可学习参数
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    value: Array2<f32>,
}

impl Parameter {
    pub fn new(name: &str, value: Array2<f32>) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }

    pub fn init(name: &str, shape: (usize, usize), init: Init, rng: &mut StdRng) -> Self {
        Self::new(name, init.generate_with_rng(shape, rng))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Array2<f32> {
        &self.value
    }

    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    /// 覆盖参数值，形状必须一致
    pub fn set_value(&mut self, value: &Array2<f32>) -> Result<(), EignError> {
        if value.shape() != self.value.shape() {
            return Err(EignError::ShapeMismatch {
                context: format!("参数`{}`", self.name),
                expected: self.value.shape().to_vec(),
                got: value.shape().to_vec(),
            });
        }
        self.value.assign(value);
        Ok(())
    }
}
