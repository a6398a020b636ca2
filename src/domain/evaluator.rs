//! Double dispatch over the node variants.
//!
//! A node picks the entry point matching its own kind; the evaluator picks
//! what that entry point does. Entry points an evaluator does not override
//! fail with [`DomainError::UnsupportedNodeKind`].
//!
//! Recursive dispatch ([`Node::accept_recursive`]) is pre-order: a node is
//! visited before its children, children in insertion order.

use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::{Branch, Leaf, Node, NodeKind};

pub trait Evaluator {
    type Output;

    /// Name reported in `UnsupportedNodeKind` errors.
    fn name(&self) -> &str;

    fn visit_leaf(&mut self, _leaf: &Leaf) -> DomainResult<Self::Output> {
        Err(self.unsupported(NodeKind::Leaf))
    }

    fn visit_branch(&mut self, _branch: &Branch) -> DomainResult<Self::Output> {
        Err(self.unsupported(NodeKind::Branch))
    }

    fn unsupported(&self, kind: NodeKind) -> DomainError {
        DomainError::UnsupportedNodeKind {
            kind,
            evaluator: self.name().to_string(),
        }
    }
}

impl Leaf {
    pub fn accept<E: Evaluator + ?Sized>(&self, evaluator: &mut E) -> DomainResult<E::Output> {
        evaluator.visit_leaf(self)
    }
}

impl Branch {
    pub fn accept<E: Evaluator + ?Sized>(&self, evaluator: &mut E) -> DomainResult<E::Output> {
        evaluator.visit_branch(self)
    }
}

impl Node {
    #[instrument(level = "trace", skip_all, fields(kind = %self.kind()))]
    pub fn accept<E: Evaluator + ?Sized>(&self, evaluator: &mut E) -> DomainResult<E::Output> {
        match self {
            Node::Leaf(leaf) => leaf.accept(evaluator),
            Node::Branch(branch) => branch.accept(evaluator),
        }
    }

    /// Accepts `evaluator` on this node and every descendant, pre-order.
    ///
    /// Stops at the first failing visit.
    #[instrument(level = "debug", skip_all, fields(evaluator = evaluator.name()))]
    pub fn accept_recursive<E: Evaluator + ?Sized>(
        &self,
        evaluator: &mut E,
    ) -> DomainResult<Vec<E::Output>> {
        let mut outputs = Vec::new();
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            outputs.push(node.accept(evaluator)?);
            if let Node::Branch(branch) = node {
                // Push children in reverse order for left-to-right traversal
                stack.extend(branch.children().iter().rev());
            }
        }

        debug!("visited {} nodes", outputs.len());
        Ok(outputs)
    }
}

/// Renders `"<name> + <label>"` for every node it visits.
///
/// Stateless: repeated visits of the same node give the same text.
#[derive(Debug, Clone)]
pub struct KindLabeler {
    label: String,
}

impl Default for KindLabeler {
    fn default() -> Self {
        Self::new("KindLabeler")
    }
}

impl KindLabeler {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Evaluator for KindLabeler {
    type Output = String;

    fn name(&self) -> &str {
        &self.label
    }

    fn visit_leaf(&mut self, leaf: &Leaf) -> DomainResult<String> {
        Ok(format!("{} + {}", leaf.name(), self.label))
    }

    fn visit_branch(&mut self, branch: &Branch) -> DomainResult<String> {
        Ok(format!("Branch[{}] + {}", branch.len(), self.label))
    }
}

/// Counts visited leaves and branches.
///
/// Cumulative across traversals until [`NodeCounter::reset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeCounter {
    pub leaves: usize,
    pub branches: usize,
}

impl NodeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.leaves + self.branches
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Evaluator for NodeCounter {
    type Output = ();

    fn name(&self) -> &str {
        "NodeCounter"
    }

    fn visit_leaf(&mut self, _leaf: &Leaf) -> DomainResult<()> {
        self.leaves += 1;
        Ok(())
    }

    fn visit_branch(&mut self, _branch: &Branch) -> DomainResult<()> {
        self.branches += 1;
        Ok(())
    }
}

/// Collects leaf names. Has no branch entry point.
#[derive(Debug, Clone, Default)]
pub struct LeafCollector {
    names: Vec<String>,
}

impl LeafCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

impl Evaluator for LeafCollector {
    type Output = ();

    fn name(&self) -> &str {
        "LeafCollector"
    }

    fn visit_leaf(&mut self, leaf: &Leaf) -> DomainResult<()> {
        self.names.push(leaf.name().to_string());
        Ok(())
    }
}
