use ndarray::{Array2, Axis, concatenate};

use crate::errors::EignError;
use crate::tensor::{C32, concat_real_imag, to_complex};

/// 拆成两种模态的特征信号：带符号部分随边方向翻转而变号，无符号部分保持不变。
/// 两部分行数相同（边域为E，节点域为N），通道数可以为0
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSignal {
    pub signed: Array2<C32>,
    pub unsigned: Array2<C32>,
}

impl EdgeSignal {
    pub fn new(signed: Array2<C32>, unsigned: Array2<C32>) -> Result<Self, EignError> {
        if signed.nrows() != unsigned.nrows() {
            return Err(EignError::ShapeMismatch {
                context: "带符号与无符号信号的行数".to_string(),
                expected: vec![signed.nrows(), unsigned.ncols()],
                got: unsigned.shape().to_vec(),
            });
        }
        Ok(Self { signed, unsigned })
    }

    /// 由实数特征构造
    pub fn from_real(signed: &Array2<f32>, unsigned: &Array2<f32>) -> Result<Self, EignError> {
        Self::new(to_complex(signed), to_complex(unsigned))
    }

    pub fn zeros(rows: usize, signed_channels: usize, unsigned_channels: usize) -> Self {
        Self {
            signed: Array2::zeros((rows, signed_channels)),
            unsigned: Array2::zeros((rows, unsigned_channels)),
        }
    }

    pub fn rows(&self) -> usize {
        self.signed.nrows()
    }

    pub fn signed_channels(&self) -> usize {
        self.signed.ncols()
    }

    pub fn unsigned_channels(&self) -> usize {
        self.unsigned.ncols()
    }

    /// 实数读出：`[rows, 2·(C_s + C_u)]`，依次为带符号实部、虚部、无符号实部、虚部
    pub fn concat_real_imag(&self) -> Array2<f32> {
        let signed = concat_real_imag(&self.signed);
        let unsigned = concat_real_imag(&self.unsigned);
        concatenate(Axis(1), &[signed.view(), unsigned.view()])
            .unwrap_or_else(|_| Array2::zeros((self.rows(), 0)))
    }
}
