/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 负责神经网络（neural network）的构建：卷积 → 块 → 模型
 */

mod activation;
pub mod block;
pub mod conv;
mod init;
pub mod model;
mod module;
mod signal;
mod state;

pub use activation::Activation;
pub use block::{BlockConfig, EIGNBlock};
pub use conv::{
    ConvOptions, Convolution, ConvolutionKind, EdgeConv, MagneticEdgeLaplacianConv,
    MagneticEdgeLaplacianWithNodeTransformationConv,
};
pub use init::{Init, Parameter};
pub use model::{EIGN, EIGNConfig};
pub use module::Module;
pub use signal::EdgeSignal;
pub use state::StateDict;
