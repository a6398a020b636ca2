//! Composite nodes: a closed sum type of terminal leaves and branches.
//!
//! Structural mutation lives on [`Branch`] itself. The [`Node`] level
//! entry points exist for callers holding an unknown node; they fail with
//! [`DomainError::UnsupportedOperation`] on leaves, so check
//! [`Node::is_composite`] first.

use std::fmt;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};

/// Label returned by `operation()` on every leaf.
pub const LEAF_LABEL: &str = "Leaf";
/// Label wrapping the children of a branch in `operation()`.
pub const BRANCH_LABEL: &str = "Branch";
/// Separator between child results in a branch label.
pub const SEPARATOR: &str = "+";

/// Tag of the concrete node variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Leaf,
    Branch,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Leaf => write!(f, "leaf"),
            NodeKind::Branch => write!(f, "branch"),
        }
    }
}

/// Terminal node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    /// Display name, used by rendering and evaluators only
    name: String,
}

impl Default for Leaf {
    fn default() -> Self {
        Self::new()
    }
}

impl Leaf {
    pub fn new() -> Self {
        Self::named(LEAF_LABEL)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fixed terminal label, independent of the name.
    pub fn operation(&self) -> String {
        LEAF_LABEL.to_string()
    }
}

/// Composite node owning an ordered sequence of children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Branch {
    children: Vec<Node>,
}

impl Branch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(children: impl IntoIterator<Item = Node>) -> Self {
        Self {
            children: children.into_iter().collect(),
        }
    }

    /// Appends `child` after the existing children.
    #[instrument(level = "trace", skip_all)]
    pub fn add(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Removes the first child equal to `child`.
    ///
    /// Returns `false` if no child matched.
    #[instrument(level = "trace", skip_all)]
    pub fn remove(&mut self, child: &Node) -> bool {
        match self.children.iter().position(|c| c == child) {
            Some(idx) => {
                self.children.remove(idx);
                true
            }
            None => {
                debug!("remove: no matching child among {}", self.children.len());
                false
            }
        }
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// `Branch(op(c1)+op(c2)+...)` over the children in insertion order.
    pub fn operation(&self) -> String {
        format!(
            "{}({})",
            BRANCH_LABEL,
            self.children.iter().map(Node::operation).join(SEPARATOR)
        )
    }
}

/// Unit of the composite structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(Leaf),
    Branch(Branch),
}

impl From<Leaf> for Node {
    fn from(leaf: Leaf) -> Self {
        Node::Leaf(leaf)
    }
}

impl From<Branch> for Node {
    fn from(branch: Branch) -> Self {
        Node::Branch(branch)
    }
}

impl Node {
    pub fn leaf() -> Self {
        Node::Leaf(Leaf::new())
    }

    pub fn named_leaf(name: impl Into<String>) -> Self {
        Node::Leaf(Leaf::named(name))
    }

    pub fn branch(children: impl IntoIterator<Item = Node>) -> Self {
        Node::Branch(Branch::with_children(children))
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Leaf(_) => NodeKind::Leaf,
            Node::Branch(_) => NodeKind::Branch,
        }
    }

    pub fn is_composite(&self) -> bool {
        self.kind() == NodeKind::Branch
    }

    /// Leaf name, or the branch label for composites.
    pub fn name(&self) -> &str {
        match self {
            Node::Leaf(leaf) => leaf.name(),
            Node::Branch(_) => BRANCH_LABEL,
        }
    }

    pub fn operation(&self) -> String {
        match self {
            Node::Leaf(leaf) => leaf.operation(),
            Node::Branch(branch) => branch.operation(),
        }
    }

    pub fn as_branch(&self) -> Option<&Branch> {
        match self {
            Node::Branch(branch) => Some(branch),
            Node::Leaf(_) => None,
        }
    }

    pub fn as_branch_mut(&mut self) -> Option<&mut Branch> {
        match self {
            Node::Branch(branch) => Some(branch),
            Node::Leaf(_) => None,
        }
    }

    pub fn add(&mut self, child: Node) -> DomainResult<()> {
        let branch = self.require_branch_mut("add")?;
        branch.add(child);
        Ok(())
    }

    pub fn remove(&mut self, child: &Node) -> DomainResult<bool> {
        let branch = self.require_branch_mut("remove")?;
        Ok(branch.remove(child))
    }

    pub fn children(&self) -> DomainResult<&[Node]> {
        self.as_branch()
            .map(Branch::children)
            .ok_or(DomainError::UnsupportedOperation {
                operation: "children",
                kind: self.kind(),
            })
    }

    fn require_branch_mut(&mut self, operation: &'static str) -> DomainResult<&mut Branch> {
        let kind = self.kind();
        self.as_branch_mut()
            .ok_or(DomainError::UnsupportedOperation { operation, kind })
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.operation())
    }
}
