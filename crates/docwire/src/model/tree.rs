use super::annotation::Span;
use super::enums::SentimentClass;

/// A labeled n-ary tree, such as a constituency parse.
///
/// Drop, [`node_count`](Tree::node_count) and [`depth`](Tree::depth) are
/// iterative, so arbitrarily deep trees are fine to hold. The derived
/// `Clone` and `PartialEq` recurse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tree {
    pub label: String,
    pub score: Option<f64>,
    /// Token span this node covers within its sentence.
    pub span: Option<Span>,
    pub sentiment: Option<SentimentClass>,
    pub children: Vec<Tree>,
}

impl Tree {
    pub fn leaf(label: impl Into<String>) -> Self {
        Self::node(label, Vec::new())
    }

    // No struct-update syntax here: `Tree` implements `Drop`.
    pub fn node(label: impl Into<String>, children: Vec<Tree>) -> Self {
        Self {
            label: label.into(),
            score: None,
            span: None,
            sentiment: None,
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes, this one included.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Length of the longest root-to-leaf path, counted in nodes.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children.iter().map(|c| (c, depth + 1)));
        }
        deepest
    }

    /// Leaf labels, left to right.
    pub fn leaves(&self) -> Vec<&str> {
        let mut leaves = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                leaves.push(node.label.as_str());
            }
            stack.extend(node.children.iter().rev());
        }
        leaves
    }
}

impl Drop for Tree {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Tree {
        Tree::node(
            "ROOT",
            vec![Tree::node(
                "S",
                vec![
                    Tree::node("NP", vec![Tree::leaf("Apple")]),
                    Tree::node("VP", vec![Tree::leaf("is"), Tree::leaf("good")]),
                ],
            )],
        )
    }

    #[test]
    fn test_shape_queries() {
        let tree = sample();
        assert_eq!(tree.node_count(), 7);
        assert_eq!(tree.depth(), 4);
        assert_eq!(tree.leaves(), vec!["Apple", "is", "good"]);
        assert!(Tree::leaf("x").is_leaf());
    }

    #[test]
    fn test_deep_tree_drops_without_recursion() {
        let mut tree = Tree::leaf("x");
        for _ in 0..200_000 {
            tree = Tree::node("x", vec![tree]);
        }
        assert_eq!(tree.depth(), 200_001);
        drop(tree);
    }
}
