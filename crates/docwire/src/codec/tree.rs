//! Trees as flat Open/Value/Close marker streams.
//!
//! A node flattens to `Open`, `Value` (label and sidecar fields), its
//! children in order, then `Close`. Every node contributes exactly three
//! markers, so a tree of `n` nodes flattens to `3n` markers. Both directions
//! run on an explicit stack and never recurse.

use crate::cancel::CancelToken;
use crate::codec::entity::{span_from_wire, span_to_wire};
use crate::codec::enums::{WireEnum, decode_enum};
use crate::error::DecodeError;
use crate::model::{SentimentClass, Tree};
use crate::wire;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Open,
    Value,
    Close,
}

impl WireEnum for Marker {
    const TABLE: &'static str = "tree marker";
    const VALUES: &'static [Self] = &[Marker::Open, Marker::Value, Marker::Close];
}

fn marker(m: Marker) -> wire::FlattenedNode {
    wire::FlattenedNode {
        marker: Some(m.code()),
        ..Default::default()
    }
}

fn value(node: &Tree) -> wire::FlattenedNode {
    wire::FlattenedNode {
        marker: Some(Marker::Value.code()),
        label: Some(node.label.clone()),
        score: node.score,
        span: node.span.map(span_to_wire),
        sentiment: node.sentiment.map(WireEnum::code),
    }
}

/// Flattens `tree` in preorder.
pub fn flatten(tree: &Tree) -> wire::FlattenedTree {
    let mut nodes = Vec::with_capacity(tree.node_count() * 3);
    nodes.push(marker(Marker::Open));
    nodes.push(value(tree));

    // (node, index of the next child to visit)
    let mut stack: Vec<(&Tree, usize)> = vec![(tree, 0)];
    while let Some(frame) = stack.last_mut() {
        let (node, next) = *frame;
        match node.children.get(next) {
            Some(child) => {
                frame.1 += 1;
                nodes.push(marker(Marker::Open));
                nodes.push(value(child));
                stack.push((child, 0));
            }
            None => {
                stack.pop();
                nodes.push(marker(Marker::Close));
            }
        }
    }
    wire::FlattenedTree { nodes }
}

struct Frame {
    tree: Tree,
    has_value: bool,
}

fn malformed(reason: &'static str) -> DecodeError {
    DecodeError::MalformedTree { reason }
}

/// Rebuilds a tree from its marker stream.
pub fn unflatten(flat: wire::FlattenedTree, cancel: &CancelToken) -> Result<Tree, DecodeError> {
    let mut stack: Vec<Frame> = Vec::new();
    let mut finished: Option<Tree> = None;

    for node in flat.nodes {
        cancel.checkpoint()?;
        if finished.is_some() {
            return Err(malformed("markers after the root closed"));
        }
        let code = node.marker.ok_or(DecodeError::MissingField {
            field: "FlattenedNode.marker",
        })?;
        let m = Marker::from_code(code).ok_or(malformed("unknown tree marker"))?;

        match m {
            Marker::Open => stack.push(Frame {
                tree: Tree::leaf(String::new()),
                has_value: false,
            }),
            Marker::Value => {
                let frame = stack
                    .last_mut()
                    .ok_or(malformed("value outside any node"))?;
                if frame.has_value {
                    return Err(malformed("two values in one node"));
                }
                frame.has_value = true;
                frame.tree.label = node.label.unwrap_or_default();
                frame.tree.score = node.score;
                frame.tree.span = node.span.map(span_from_wire).transpose()?;
                frame.tree.sentiment = node
                    .sentiment
                    .map(decode_enum::<SentimentClass>)
                    .transpose()?;
            }
            Marker::Close => {
                let frame = stack.pop().ok_or(malformed("tree started with a Close"))?;
                if !frame.has_value {
                    return Err(malformed("node closed without a value"));
                }
                match stack.last_mut() {
                    Some(parent) => parent.tree.children.push(frame.tree),
                    None => finished = Some(frame.tree),
                }
            }
        }
    }

    if !stack.is_empty() {
        return Err(malformed("tree never finished"));
    }
    finished.ok_or(malformed("empty marker list"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Span;
    use proptest::prelude::*;

    fn markers(flat: &wire::FlattenedTree) -> Vec<Marker> {
        flat.nodes
            .iter()
            .map(|n| Marker::from_code(n.marker.unwrap()).unwrap())
            .collect()
    }

    fn stream(codes: &[Marker]) -> wire::FlattenedTree {
        wire::FlattenedTree {
            nodes: codes
                .iter()
                .map(|m| match m {
                    Marker::Value => value(&Tree::leaf("x")),
                    other => marker(*other),
                })
                .collect(),
        }
    }

    fn reason(result: Result<Tree, DecodeError>) -> &'static str {
        match result {
            Err(DecodeError::MalformedTree { reason }) => reason,
            other => panic!("expected MalformedTree, got {other:?}"),
        }
    }

    #[test]
    fn test_leaf_is_three_markers() {
        let flat = flatten(&Tree::leaf("dog"));
        assert_eq!(markers(&flat), vec![Marker::Open, Marker::Value, Marker::Close]);
    }

    #[test]
    fn test_nested_roundtrip_with_sidecars() {
        let mut np = Tree::node("NP", vec![Tree::leaf("Apple")]);
        np.score = Some(-1.5);
        np.span = Some(Span::new(0, 1));
        np.sentiment = Some(SentimentClass::Positive);
        let tree = Tree::node("ROOT", vec![np, Tree::leaf(".")]);

        let flat = flatten(&tree);
        assert_eq!(flat.nodes.len(), tree.node_count() * 3);
        let back = unflatten(flat, &CancelToken::new()).unwrap();
        assert_eq!(back, tree);
    }

    #[test]
    fn test_malformed_streams() {
        use Marker::*;
        let cancel = CancelToken::new();
        assert_eq!(reason(unflatten(stream(&[Close]), &cancel)), "tree started with a Close");
        assert_eq!(reason(unflatten(stream(&[Open, Value]), &cancel)), "tree never finished");
        assert_eq!(
            reason(unflatten(stream(&[Open, Value, Open, Value, Close]), &cancel)),
            "tree never finished"
        );
        assert_eq!(reason(unflatten(stream(&[Value]), &cancel)), "value outside any node");
        assert_eq!(
            reason(unflatten(stream(&[Open, Value, Value, Close]), &cancel)),
            "two values in one node"
        );
        assert_eq!(
            reason(unflatten(stream(&[Open, Value, Close, Open]), &cancel)),
            "markers after the root closed"
        );
        assert_eq!(reason(unflatten(stream(&[Open, Close]), &cancel)), "node closed without a value");
        assert_eq!(reason(unflatten(stream(&[]), &cancel)), "empty marker list");

        let mut bad = stream(&[Open, Value, Close]);
        bad.nodes[0].marker = Some(9);
        assert_eq!(reason(unflatten(bad, &cancel)), "unknown tree marker");
    }

    #[test]
    fn test_deep_tree_does_not_overflow() {
        let mut tree = Tree::leaf("leaf");
        for _ in 0..100_000 {
            tree = Tree::node("X", vec![tree]);
        }
        let back = unflatten(flatten(&tree), &CancelToken::new()).unwrap();
        assert_eq!(back.depth(), 100_001);
        assert_eq!(back.leaves(), vec!["leaf"]);
    }

    #[test]
    fn test_cancel_interrupts_unflatten() {
        let cancel = CancelToken::new();
        let flat = flatten(&Tree::node("S", vec![Tree::leaf("a")]));
        cancel.cancel();
        assert_eq!(unflatten(flat.clone(), &cancel), Err(DecodeError::Cancelled));
        assert!(unflatten(flat, &cancel).is_ok());
    }

    fn arb_tree() -> impl Strategy<Value = Tree> {
        let leaf = "[A-Za-z.,]{1,6}".prop_map(|s: String| Tree::leaf(s));
        leaf.prop_recursive(6, 64, 4, |inner| {
            ("[A-Z]{1,4}", prop::collection::vec(inner, 0..4), prop::option::of(-10.0f64..10.0))
                .prop_map(|(label, children, score)| {
                    let mut node = Tree::node(label, children);
                    node.score = score;
                    node
                })
        })
    }

    proptest! {
        #[test]
        fn prop_unflatten_inverts_flatten(tree in arb_tree()) {
            let flat = flatten(&tree);
            prop_assert_eq!(flat.nodes.len(), tree.node_count() * 3);
            let back = unflatten(flat, &CancelToken::new()).unwrap();
            prop_assert_eq!(back, tree);
        }
    }
}
