/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 复数张量的辅助函数。
 *                 实数张量直接使用`Array2<f32>`，复数张量使用`Array2<C32>`
 */

use approx::AbsDiffEq;
use ndarray::{Array2, s};
use num_complex::Complex;
use num_traits::Zero;

use crate::errors::EignError;

#[cfg(test)]
mod tests;

/// 单精度复数
pub type C32 = Complex<f32>;

/// 实数张量转为虚部为0的复数张量
pub fn to_complex(real: &Array2<f32>) -> Array2<C32> {
    real.mapv(|v| C32::new(v, 0.0))
}

/// 共轭转置（Hermitian转置）
pub fn conj_transpose(matrix: &Array2<C32>) -> Array2<C32> {
    matrix.t().mapv(|v| v.conj())
}

pub fn real_part(matrix: &Array2<C32>) -> Array2<f32> {
    matrix.mapv(|v| v.re)
}

pub fn imag_part(matrix: &Array2<C32>) -> Array2<f32> {
    matrix.mapv(|v| v.im)
}

/// 沿通道维把实部和虚部拼接起来：`[rows, c]` → `[rows, 2c]`
pub fn concat_real_imag(matrix: &Array2<C32>) -> Array2<f32> {
    let (rows, cols) = matrix.dim();
    let mut out = Array2::zeros((rows, 2 * cols));
    out.slice_mut(s![.., ..cols]).assign(&real_part(matrix));
    out.slice_mut(s![.., cols..]).assign(&imag_part(matrix));
    out
}

/// 复数张量右乘实数权重：`[rows, in] @ [in, out]`
pub fn mat_mul_real(
    lhs: &Array2<C32>,
    rhs: &Array2<f32>,
    context: &str,
) -> Result<Array2<C32>, EignError> {
    if lhs.ncols() != rhs.nrows() {
        return Err(EignError::ShapeMismatch {
            context: format!("{context}（矩阵乘法）"),
            expected: vec![lhs.nrows(), rhs.nrows()],
            got: lhs.shape().to_vec(),
        });
    }
    Ok(lhs.dot(&to_complex(rhs)))
}

/// 严格判断是否为Hermitian矩阵：`M == Mᴴ`，逐元素比较，不带容差
pub fn is_hermitian(matrix: &Array2<C32>) -> bool {
    matrix.is_square() && *matrix == conj_transpose(matrix)
}

/// 在容差内逐元素比较两个复数张量（实部、虚部分别比较）
pub fn abs_diff_eq(lhs: &Array2<C32>, rhs: &Array2<C32>, epsilon: f32) -> bool {
    lhs.shape() == rhs.shape()
        && lhs
            .iter()
            .zip(rhs.iter())
            .all(|(a, b)| a.re.abs_diff_eq(&b.re, epsilon) && a.im.abs_diff_eq(&b.im, epsilon))
}

/// 二次型`xᴴ M x`（对Hermitian矩阵其结果为实数，这里返回实部）
pub fn quadratic_form(matrix: &Array2<C32>, x: &[C32]) -> f32 {
    let mut acc = C32::zero();
    for (i, row) in matrix.outer_iter().enumerate() {
        let mx: C32 = row.iter().zip(x).map(|(m, xj)| m * xj).sum();
        acc += x[i].conj() * mx;
    }
    acc.re
}
