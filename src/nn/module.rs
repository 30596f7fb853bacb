/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : Module trait 定义
 */

use super::Parameter;

/// 模块 trait
///
/// # 设计原则
/// - `forward()` **不是** trait 方法（卷积、块、模型的输入各不相同）
/// - `new()` **不是** trait 方法（参数各异）
/// - `parameters()` 签名一致，放入 trait
pub trait Module {
    /// 获取所有可学习参数
    fn parameters(&self) -> Vec<&Parameter>;

    /// 获取所有可学习参数的可变引用（加载参数时使用）
    fn parameters_mut(&mut self) -> Vec<&mut Parameter>;

    /// 获取参数张量的个数
    fn num_params(&self) -> usize {
        self.parameters().len()
    }

    /// 获取参数中标量的总个数
    fn num_scalars(&self) -> usize {
        self.parameters().iter().map(|p| p.value().len()).sum()
    }
}
