use std::fmt;

use rustc_hash::FxHashSet;

use super::enums::Language;

/// Identity of a dependency-graph vertex.
///
/// `index` is the 1-based token index within sentence `sentence_index`.
/// Non-zero `copy_count` marks a copy node and non-zero `empty_index` an
/// empty (elided) node; both are distinct from the real token at `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NodeKey {
    pub index: u32,
    pub sentence_index: u32,
    pub copy_count: u32,
    pub empty_index: u32,
}

impl NodeKey {
    pub fn new(index: u32, sentence_index: u32) -> Self {
        Self {
            index,
            sentence_index,
            copy_count: 0,
            empty_index: 0,
        }
    }

    pub fn with_copy(self, copy_count: u32) -> Self {
        Self { copy_count, ..self }
    }

    pub fn with_empty(self, empty_index: u32) -> Self {
        Self {
            empty_index,
            ..self
        }
    }

    /// Whether this node stands for a real token rather than a copy or an
    /// empty node.
    pub fn is_real(&self) -> bool {
        self.copy_count == 0 && self.empty_index == 0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.sentence_index, self.index)?;
        if self.empty_index != 0 {
            write!(f, ".{}", self.empty_index)?;
        }
        if self.copy_count != 0 {
            write!(f, "^{}", self.copy_count)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: NodeKey,
    pub target: NodeKey,
    pub relation: String,
    pub language: Option<Language>,
    /// Edge added by an enhanced representation on top of the basic tree.
    pub is_extra: bool,
    pub directed: bool,
}

impl Edge {
    pub fn new(source: NodeKey, target: NodeKey, relation: impl Into<String>) -> Self {
        Self {
            source,
            target,
            relation: relation.into(),
            language: None,
            is_extra: false,
            directed: true,
        }
    }
}

/// Nodes, labeled edges and a root set.
///
/// Node and root order is preserved. Every edge endpoint and every root must
/// be a declared node; [`crate::validate`] checks this on encode and decode.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyGraph {
    pub nodes: Vec<NodeKey>,
    pub edges: Vec<Edge>,
    pub roots: Vec<NodeKey>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, key: NodeKey) {
        self.nodes.push(key);
    }

    pub fn add_root(&mut self, key: NodeKey) {
        self.roots.push(key);
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn contains(&self, key: &NodeKey) -> bool {
        self.nodes.contains(key)
    }

    pub fn is_root(&self, key: &NodeKey) -> bool {
        self.roots.contains(key)
    }

    pub fn outgoing<'a>(&'a self, key: &'a NodeKey) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source == *key)
    }

    pub fn incoming<'a>(&'a self, key: &'a NodeKey) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.target == *key)
    }

    /// Declared nodes as a set, for repeated lookups.
    pub fn node_set(&self) -> FxHashSet<NodeKey> {
        self.nodes.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_and_empty_nodes_are_distinct() {
        let real = NodeKey::new(3, 0);
        let copy = real.with_copy(1);
        let empty = real.with_empty(1);
        assert_ne!(real, copy);
        assert_ne!(real, empty);
        assert!(real.is_real());
        assert!(!copy.is_real());
        assert_eq!(copy.to_string(), "0:3^1");
        assert_eq!(empty.to_string(), "0:3.1");
    }

    #[test]
    fn test_edge_queries() {
        let root = NodeKey::new(2, 0);
        let dep = NodeKey::new(1, 0);
        let mut graph = DependencyGraph::new();
        graph.add_node(dep);
        graph.add_node(root);
        graph.add_root(root);
        graph.add_edge(Edge::new(root, dep, "nsubj"));

        assert!(graph.is_root(&root));
        assert_eq!(graph.outgoing(&root).count(), 1);
        assert_eq!(graph.incoming(&dep).next().map(|e| e.relation.as_str()), Some("nsubj"));
        assert_eq!(graph.node_set().len(), 2);
    }
}
