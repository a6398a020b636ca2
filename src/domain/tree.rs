//! Tree aggregate: traversal, measurement and rendering over one root node.

use std::fmt;
use std::str::FromStr;

use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::evaluator::Evaluator;
use crate::domain::node::Node;
use crate::domain::parser::parse_node;

/// Composite structure rooted at one node.
///
/// Owns the whole hierarchy; dropping the tree drops every node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    root: Node,
}

impl From<Node> for Tree {
    fn from(root: Node) -> Self {
        Self::new(root)
    }
}

impl FromStr for Tree {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_node(s).map(Self::new)
    }
}

impl fmt::Display for Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.root, f)
    }
}

impl Tree {
    pub fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Node {
        &mut self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    pub fn operation(&self) -> String {
        self.root.operation()
    }

    /// Pre-order dispatch of `evaluator` over every node.
    pub fn accept_all<E: Evaluator + ?Sized>(&self, evaluator: &mut E) -> DomainResult<Vec<E::Output>> {
        self.root.accept_recursive(evaluator)
    }

    pub fn iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(&self.root)
    }

    pub fn iter_postorder(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(&self.root)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        calculate_depth(&self.root)
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    pub fn leaf_count(&self) -> usize {
        self.iter().filter(|node| !node.is_composite()).count()
    }

    /// Names of all leaves, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_names(&self) -> Vec<String> {
        self.iter()
            .filter(|node| !node.is_composite())
            .map(|node| node.name().to_string())
            .collect()
    }

    /// Indented rendering for terminal display.
    pub fn render(&self) -> termtree::Tree<String> {
        render_node(&self.root)
    }
}

fn calculate_depth(root: &Node) -> usize {
    let mut max_depth = 0;
    let mut stack = vec![(root, 1)];

    while let Some((node, depth)) = stack.pop() {
        max_depth = max_depth.max(depth);
        if let Node::Branch(branch) = node {
            stack.extend(branch.children().iter().map(|child| (child, depth + 1)));
        }
    }
    max_depth
}

fn render_node(node: &Node) -> termtree::Tree<String> {
    match node {
        Node::Leaf(leaf) => termtree::Tree::new(leaf.name().to_string()),
        Node::Branch(branch) => {
            let leaves: Vec<_> = branch.children().iter().map(render_node).collect();
            termtree::Tree::new(node.name().to_string()).with_leaves(leaves)
        }
    }
}

/// Depth-first, node before children.
pub struct PreOrderIter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> PreOrderIter<'a> {
    fn new(root: &'a Node) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        if let Node::Branch(branch) = current {
            // Push children in reverse order for left-to-right traversal
            self.stack.extend(branch.children().iter().rev());
        }
        Some(current)
    }
}

/// Depth-first, children before node.
pub struct PostOrderIter<'a> {
    stack: Vec<(&'a Node, bool)>,
}

impl<'a> PostOrderIter<'a> {
    fn new(root: &'a Node) -> Self {
        Self {
            stack: vec![(root, false)],
        }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            match current {
                Node::Branch(branch) if !visited => {
                    self.stack.push((current, true));
                    for child in branch.children().iter().rev() {
                        self.stack.push((child, false));
                    }
                }
                _ => return Some(current),
            }
        }
        None
    }
}
