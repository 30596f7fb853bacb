//! # EIGN
//!
//! `eign`用纯rust实现以磁性边拉普拉斯算子（Magnetic Edge Laplacian）为图移位算子的图神经网络组件，
//! 用于有向图、带符号边信号的建模：
//!
//! - [`graph`]：有向图拓扑（节点数 + 有向/无向边）
//! - [`laplacian`]：磁性关联矩阵与磁性边拉普拉斯算子，每个图只构建一次，之后只读共享
//! - [`nn`]：卷积层、EIGN块与EIGN模型
//!
//! ```ignore
//! use eign::graph::{DirectedGraph, Edge};
//! use eign::laplacian::{LaplacianConfig, MagneticEdgeLaplacian};
//! use eign::nn::{EIGN, EIGNConfig, EdgeSignal};
//!
//! let graph = DirectedGraph::new(3, vec![Edge::directed(0, 1), Edge::undirected(1, 2)])?;
//! let laplacian = MagneticEdgeLaplacian::new(&graph, &LaplacianConfig::default())?;
//! let model = EIGN::new(&EIGNConfig::default())?;
//! let x = EdgeSignal::zeros(graph.num_edges(), 1, 1);
//! let y = model.forward(&laplacian, &x)?;
//! ```

pub mod errors;
pub mod graph;
pub mod laplacian;
pub mod nn;
pub mod tensor;
