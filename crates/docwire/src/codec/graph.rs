//! Dependency graphs as node, edge and root lists.

use crate::cancel::CancelToken;
use crate::codec::enums::{WireEnum, decode_enum};
use crate::error::DecodeError;
use crate::model::{DependencyGraph, Edge, Language, NodeKey};
use crate::wire;

fn nonzero(value: u32) -> Option<u32> {
    (value != 0).then_some(value)
}

pub fn node_to_wire(key: &NodeKey) -> wire::GraphNode {
    wire::GraphNode {
        sentence_index: Some(key.sentence_index),
        index: Some(key.index),
        copy_count: nonzero(key.copy_count),
        empty_index: nonzero(key.empty_index),
    }
}

pub fn node_from_wire(node: wire::GraphNode) -> Result<NodeKey, DecodeError> {
    Ok(NodeKey {
        index: node.index.ok_or(DecodeError::MissingField {
            field: "GraphNode.index",
        })?,
        sentence_index: node.sentence_index.ok_or(DecodeError::MissingField {
            field: "GraphNode.sentence_index",
        })?,
        copy_count: node.copy_count.unwrap_or(0),
        empty_index: node.empty_index.unwrap_or(0),
    })
}

pub fn graph_to_wire(graph: &DependencyGraph) -> wire::DependencyGraph {
    wire::DependencyGraph {
        nodes: graph.nodes.iter().map(node_to_wire).collect(),
        edges: graph
            .edges
            .iter()
            .map(|e| wire::GraphEdge {
                source: Some(node_to_wire(&e.source)),
                target: Some(node_to_wire(&e.target)),
                relation: Some(e.relation.clone()),
                language: e.language.map(Language::code),
                is_extra: e.is_extra.then_some(true),
                directed: Some(e.directed),
            })
            .collect(),
        roots: graph.roots.iter().map(node_to_wire).collect(),
    }
}

/// Converts the wire graph without checking references; callers run
/// [`crate::validate::validate_graph`] on the result.
pub fn graph_from_wire(
    graph: wire::DependencyGraph,
    cancel: &CancelToken,
) -> Result<DependencyGraph, DecodeError> {
    let nodes = graph
        .nodes
        .into_iter()
        .map(node_from_wire)
        .collect::<Result<Vec<_>, _>>()?;

    let mut edges = Vec::with_capacity(graph.edges.len());
    for edge in graph.edges {
        cancel.checkpoint()?;
        let source = edge.source.ok_or(DecodeError::MissingField {
            field: "GraphEdge.source",
        })?;
        let target = edge.target.ok_or(DecodeError::MissingField {
            field: "GraphEdge.target",
        })?;
        edges.push(Edge {
            source: node_from_wire(source)?,
            target: node_from_wire(target)?,
            relation: edge.relation.unwrap_or_default(),
            language: edge.language.map(decode_enum::<Language>).transpose()?,
            is_extra: edge.is_extra.unwrap_or(false),
            directed: edge.directed.unwrap_or(true),
        });
    }

    let roots = graph
        .roots
        .into_iter()
        .map(node_from_wire)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DependencyGraph {
        nodes,
        edges,
        roots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::message::Message;

    fn sample() -> DependencyGraph {
        let apple = NodeKey::new(1, 0);
        let company = NodeKey::new(4, 0);
        let mut graph = DependencyGraph::new();
        graph.add_node(apple);
        graph.add_node(company);
        graph.add_root(company);
        let mut edge = Edge::new(company, apple, "nsubj");
        edge.language = Some(Language::UniversalEnglish);
        graph.add_edge(edge);
        graph
    }

    #[test]
    fn test_graph_roundtrip() {
        let graph = sample();
        let bytes = graph_to_wire(&graph).encode_to_vec();
        let wire = wire::DependencyGraph::decode(&bytes).unwrap();
        assert_eq!(graph_from_wire(wire, &CancelToken::new()).unwrap(), graph);
    }

    #[test]
    fn test_zero_copy_and_empty_not_written() {
        let wire = node_to_wire(&NodeKey::new(2, 1));
        assert_eq!(wire.copy_count, None);
        assert_eq!(wire.empty_index, None);

        let wire = node_to_wire(&NodeKey::new(2, 1).with_copy(1));
        assert_eq!(wire.copy_count, Some(1));
    }

    #[test]
    fn test_copy_nodes_stay_distinct() {
        let real = NodeKey::new(2, 0);
        let copy = real.with_copy(1);
        let mut graph = DependencyGraph::new();
        graph.add_node(real);
        graph.add_node(copy);
        graph.add_root(real);
        graph.add_root(copy);

        let back = graph_from_wire(graph_to_wire(&graph), &CancelToken::new()).unwrap();
        assert_eq!(back.nodes, vec![real, copy]);
        assert_eq!(back.roots.len(), 2);
    }

    #[test]
    fn test_unknown_language_rejected() {
        let mut wire = graph_to_wire(&sample());
        wire.edges[0].language = Some(0);
        assert!(matches!(
            graph_from_wire(wire, &CancelToken::new()),
            Err(DecodeError::UnknownEnumCode { table: "language", code: 0 })
        ));
    }

    #[test]
    fn test_edge_without_target_rejected() {
        let mut wire = graph_to_wire(&sample());
        wire.edges[0].target = None;
        assert_eq!(
            graph_from_wire(wire, &CancelToken::new()),
            Err(DecodeError::MissingField { field: "GraphEdge.target" })
        );
    }
}
