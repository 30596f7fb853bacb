use ndarray::array;

use crate::errors::EignError;
use crate::graph::{DirectedGraph, Edge};

#[test]
fn test_new_valid_graph() {
    let graph = DirectedGraph::new(3, vec![Edge::directed(0, 1), Edge::undirected(1, 2)]).unwrap();
    assert_eq!(graph.num_nodes(), 3);
    assert_eq!(graph.num_edges(), 2);
    assert_eq!(graph.degrees(), vec![1, 2, 1]);
}

#[test]
fn test_node_out_of_range() {
    let err = DirectedGraph::new(3, vec![Edge::directed(0, 1), Edge::directed(1, 3)]).unwrap_err();
    assert!(matches!(
        err,
        EignError::NodeOutOfRange {
            edge: 1,
            node: 3,
            num_nodes: 3
        }
    ));
}

#[test]
fn test_self_loop_rejected() {
    let err = DirectedGraph::new(2, vec![Edge::directed(1, 1)]).unwrap_err();
    assert!(matches!(err, EignError::SelfLoop { edge: 0, node: 1 }));
}

#[test]
fn test_empty_graph() {
    // 没有边的图本身是合法的，是否允许由拉普拉斯算子的配置决定
    let graph = DirectedGraph::new(4, vec![]).unwrap();
    assert_eq!(graph.num_edges(), 0);
    assert_eq!(graph.degrees(), vec![0; 4]);
}

#[test]
fn test_from_edge_index() {
    let edge_index = array![[0, 1, 2], [1, 2, 0]];
    let graph = DirectedGraph::from_edge_index(3, &edge_index, Some(&[true, false, true])).unwrap();
    assert_eq!(
        graph.edges(),
        &[
            Edge::directed(0, 1),
            Edge::undirected(1, 2),
            Edge::directed(2, 0)
        ]
    );

    // 无掩码时全部为有向边
    let graph = DirectedGraph::from_edge_index(3, &edge_index, None).unwrap();
    assert!(graph.edges().iter().all(|e| e.directed));
}

#[test]
fn test_from_edge_index_malformed() {
    let edge_index = array![[0, 1], [1, 2], [2, 0]];
    assert!(matches!(
        DirectedGraph::from_edge_index(3, &edge_index, None),
        Err(EignError::MalformedEdgeList(_))
    ));

    let edge_index = array![[0, 1], [1, 2]];
    assert!(matches!(
        DirectedGraph::from_edge_index(3, &edge_index, Some(&[true])),
        Err(EignError::MalformedEdgeList(_))
    ));

    // 越界同样会在from_edge_index中被发现
    let edge_index = array![[0, 5], [1, 2]];
    assert!(matches!(
        DirectedGraph::from_edge_index(3, &edge_index, None),
        Err(EignError::NodeOutOfRange { node: 5, .. })
    ));
}

#[test]
fn test_reversed_and_flip() {
    let graph = DirectedGraph::new(3, vec![Edge::directed(0, 1), Edge::undirected(1, 2)]).unwrap();
    let reversed = graph.reversed();
    assert_eq!(
        reversed.edges(),
        &[Edge::directed(1, 0), Edge::undirected(2, 1)]
    );

    let flipped = graph.flip_orientation(1).unwrap();
    assert_eq!(flipped.edges()[0], Edge::directed(0, 1));
    assert_eq!(flipped.edges()[1], Edge::undirected(2, 1));

    assert!(graph.flip_orientation(2).is_err());
}
