use std::f32::consts::PI;

use approx::assert_abs_diff_eq;
use ndarray::{Array2, array};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::errors::EignError;
use crate::graph::{DirectedGraph, Edge};
use crate::laplacian::{LaplacianConfig, MagneticEdgeLaplacian, Normalization, SignalDomain};
use crate::tensor::{C32, abs_diff_eq, conj_transpose, is_hermitian, quadratic_form, to_complex};

fn path_graph() -> DirectedGraph {
    DirectedGraph::new(3, vec![Edge::directed(0, 1), Edge::directed(1, 2)]).unwrap()
}

fn mixed_graph() -> DirectedGraph {
    DirectedGraph::new(
        5,
        vec![
            Edge::directed(0, 1),
            Edge::undirected(1, 2),
            Edge::directed(2, 0),
            Edge::directed(3, 2),
            Edge::undirected(3, 4),
            Edge::directed(4, 1),
            Edge::directed(0, 1),
        ],
    )
    .unwrap()
}

fn random_signal(rng: &mut StdRng, rows: usize, cols: usize) -> Array2<C32> {
    Array2::from_shape_fn((rows, cols), |_| {
        C32::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
    })
}

#[test]
fn test_incidence_worked_example() {
    let laplacian = MagneticEdgeLaplacian::new(&path_graph(), &LaplacianConfig::with_q(0.25)).unwrap();
    let b = laplacian.incidence(false);
    assert_eq!(b.shape(), &[3, 2]);

    let phase = C32::from_polar(1.0, PI * 0.25);
    assert_abs_diff_eq!(b[[0, 0]].re, phase.re, epsilon = 1e-6);
    assert_abs_diff_eq!(b[[0, 0]].im, phase.im, epsilon = 1e-6);
    assert_abs_diff_eq!(b[[1, 0]].re, phase.re, epsilon = 1e-6);
    assert_abs_diff_eq!(b[[1, 0]].im, -phase.im, epsilon = 1e-6);
    assert_eq!(b[[2, 0]], C32::new(0.0, 0.0));
    assert_abs_diff_eq!(b[[1, 1]].im, phase.im, epsilon = 1e-6);
    assert_abs_diff_eq!(b[[2, 1]].im, -phase.im, epsilon = 1e-6);

    // 带符号模态只在起点处多一个负号
    let signed = laplacian.incidence(true);
    assert_eq!(signed[[0, 0]], -b[[0, 0]]);
    assert_eq!(signed[[1, 0]], b[[1, 0]]);

    let l = laplacian.node_laplacian(false);
    assert!(is_hermitian(&l));
    // 对角线为节点度
    assert_abs_diff_eq!(l[[0, 0]].re, 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(l[[1, 1]].re, 2.0, epsilon = 1e-6);
    // 非对角线为 e^{iθ}·conj(e^{-iθ}) = e^{2iθ} = i（q = 0.25）
    assert_abs_diff_eq!(l[[0, 1]].re, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(l[[0, 1]].im, 1.0, epsilon = 1e-6);
}

#[test]
fn test_node_laplacian_matches_dense_product() {
    let laplacian = MagneticEdgeLaplacian::new(&mixed_graph(), &LaplacianConfig::with_q(0.3)).unwrap();
    for signed in [false, true] {
        let b = laplacian.incidence(signed);
        let dense = b.dot(&conj_transpose(&b));
        assert!(abs_diff_eq(&laplacian.node_laplacian(signed), &dense, 1e-5));
    }
}

#[test]
fn test_node_laplacian_hermitian_and_psd() {
    let mut rng = StdRng::seed_from_u64(7);
    for normalization in [Normalization::None, Normalization::Symmetric] {
        let config = LaplacianConfig {
            q: 0.17,
            normalization,
            allow_edgeless: true,
        };
        let laplacian = MagneticEdgeLaplacian::new(&mixed_graph(), &config).unwrap();
        for signed in [false, true] {
            let l = laplacian.node_laplacian(signed);
            assert!(is_hermitian(&l));
            for _ in 0..50 {
                let x = random_signal(&mut rng, 5, 1);
                let x: Vec<C32> = x.iter().copied().collect();
                assert!(quadratic_form(&l, &x) >= -1e-5);
            }
        }
    }
}

#[test]
fn test_edge_laplacian_hermitian_and_psd() {
    let mut rng = StdRng::seed_from_u64(11);
    let laplacian = MagneticEdgeLaplacian::new(&mixed_graph(), &LaplacianConfig::with_q(0.4)).unwrap();
    for signed in [false, true] {
        let l = laplacian.edge_laplacian(signed, signed);
        assert_eq!(l.shape(), &[7, 7]);
        assert!(abs_diff_eq(&l, &conj_transpose(&l), 1e-6));
        for _ in 0..50 {
            let x: Vec<C32> = random_signal(&mut rng, 7, 1).iter().copied().collect();
            assert!(quadratic_form(&l, &x) >= -1e-5);
        }
    }
}

#[test]
fn test_edgeless_graph() {
    let graph = DirectedGraph::new(4, vec![]).unwrap();
    let laplacian = MagneticEdgeLaplacian::new(&graph, &LaplacianConfig::default()).unwrap();
    assert_eq!(laplacian.incidence(false).shape(), &[4, 0]);
    let l = laplacian.node_laplacian(false);
    assert_eq!(l, Array2::<C32>::zeros((4, 4)));

    let strict = LaplacianConfig {
        allow_edgeless: false,
        ..Default::default()
    };
    assert!(matches!(
        MagneticEdgeLaplacian::new(&graph, &strict),
        Err(EignError::NoEdges)
    ));
}

#[test]
fn test_non_finite_q_rejected() {
    for q in [f32::NAN, f32::INFINITY] {
        assert!(matches!(
            MagneticEdgeLaplacian::new(&path_graph(), &LaplacianConfig::with_q(q)),
            Err(EignError::InvalidConfig(_))
        ));
    }
}

#[test]
fn test_reversal_conjugates_incidence() {
    let config = LaplacianConfig::with_q(0.2);
    let graph = mixed_graph();
    let forward = MagneticEdgeLaplacian::new(&graph, &config).unwrap();
    let backward = MagneticEdgeLaplacian::new(&graph.reversed(), &config).unwrap();

    // 无符号模态：反向即逐列共轭
    let b = forward.incidence(false);
    let b_rev = backward.incidence(false);
    assert!(abs_diff_eq(&b_rev, &b.mapv(|v| v.conj()), 1e-6));

    // 度（对角线）不变；整个拉普拉斯变为其共轭（即转置）
    let l = forward.node_laplacian(false);
    let l_rev = backward.node_laplacian(false);
    for n in 0..5 {
        assert_eq!(l[[n, n]], l_rev[[n, n]]);
    }
    assert!(abs_diff_eq(&l_rev, &l.mapv(|v| v.conj()), 1e-6));
}

#[test]
fn test_orientation_flip_of_undirected_edge_keeps_laplacian() {
    // 第1条边是无向边：翻转参考方向只会使带符号列变号，B·Bᴴ不变
    let config = LaplacianConfig::with_q(0.3);
    let graph = mixed_graph();
    let flipped = graph.flip_orientation(1).unwrap();
    let a = MagneticEdgeLaplacian::new(&graph, &config).unwrap();
    let b = MagneticEdgeLaplacian::new(&flipped, &config).unwrap();

    let col = a.incidence(true).column(1).to_owned();
    let col_flipped = b.incidence(true).column(1).to_owned();
    assert_eq!(col_flipped, col.mapv(|v| -v));

    for signed in [false, true] {
        assert!(abs_diff_eq(
            &a.node_laplacian(signed),
            &b.node_laplacian(signed),
            1e-6
        ));
    }
}

#[test]
fn test_zero_phase_gives_classic_laplacians() {
    let laplacian = MagneticEdgeLaplacian::new(&path_graph(), &LaplacianConfig::with_q(0.0)).unwrap();
    let signed = to_complex(&array![[1.0, -1.0, 0.0], [-1.0, 2.0, -1.0], [0.0, -1.0, 1.0]]);
    let unsigned = to_complex(&array![[1.0, 1.0, 0.0], [1.0, 2.0, 1.0], [0.0, 1.0, 1.0]]);
    assert!(abs_diff_eq(&laplacian.node_laplacian(true), &signed, 1e-6));
    assert!(abs_diff_eq(&laplacian.node_laplacian(false), &unsigned, 1e-6));
}

#[test]
fn test_symmetric_normalization() {
    let graph = DirectedGraph::new(4, vec![Edge::directed(0, 1), Edge::directed(1, 2)]).unwrap();
    let config = LaplacianConfig {
        q: 0.1,
        normalization: Normalization::Symmetric,
        allow_edgeless: true,
    };
    let laplacian = MagneticEdgeLaplacian::new(&graph, &config).unwrap();
    let l = laplacian.node_laplacian(true);
    // 有边的节点对角线为1，孤立节点为0
    for n in 0..3 {
        assert_abs_diff_eq!(l[[n, n]].re, 1.0, epsilon = 1e-6);
    }
    assert_eq!(l[[3, 3]], C32::new(0.0, 0.0));
    // |L[0,1]| = 1/sqrt(1·2)
    assert_abs_diff_eq!(l[[0, 1]].norm(), 0.5f32.sqrt(), epsilon = 1e-6);
}

#[test]
fn test_apply_matches_dense_laplacians() {
    let mut rng = StdRng::seed_from_u64(3);
    let laplacian = MagneticEdgeLaplacian::new(&mixed_graph(), &LaplacianConfig::with_q(0.25)).unwrap();
    let x_edge = random_signal(&mut rng, 7, 3);
    let x_node = random_signal(&mut rng, 5, 3);
    for signed_in in [false, true] {
        for signed_out in [false, true] {
            let dense = laplacian.edge_laplacian(signed_in, signed_out);
            let y = laplacian
                .apply(SignalDomain::Edge, signed_in, signed_out, &x_edge)
                .unwrap();
            assert!(abs_diff_eq(&y, &dense.dot(&x_edge), 1e-5));

            let dense = laplacian
                .incidence(signed_out)
                .dot(&conj_transpose(&laplacian.incidence(signed_in)));
            let y = laplacian
                .apply(SignalDomain::Node, signed_in, signed_out, &x_node)
                .unwrap();
            assert!(abs_diff_eq(&y, &dense.dot(&x_node), 1e-5));
        }
    }
}

#[test]
fn test_apply_rejects_wrong_rows() {
    let laplacian = MagneticEdgeLaplacian::new(&path_graph(), &LaplacianConfig::default()).unwrap();
    let x = Array2::<C32>::zeros((3, 2));
    // 边域需要2行
    assert!(matches!(
        laplacian.apply(SignalDomain::Edge, true, true, &x),
        Err(EignError::ShapeMismatch { .. })
    ));
    assert!(laplacian.apply(SignalDomain::Node, true, true, &x).is_ok());
}
