//! Tree service
//!
//! Parses tree expressions and runs the shipped evaluators over them.

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Evaluator, KindLabeler, LeafCollector, Node, NodeCounter, Tree};

/// Structural summary of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub depth: usize,
    pub nodes: usize,
    pub leaves: usize,
    pub branches: usize,
}

#[derive(Debug, Default)]
pub struct TreeService;

impl TreeService {
    pub fn new() -> Self {
        Self
    }

    #[instrument(level = "debug", skip(self))]
    pub fn parse(&self, expr: &str) -> ApplicationResult<Tree> {
        expr.parse::<Tree>()
            .map_err(|source| ApplicationError::InvalidExpression {
                expr: expr.to_string(),
                source,
            })
    }

    /// Counts via a [`NodeCounter`] pass, depth via recursion.
    pub fn stats(&self, tree: &Tree) -> ApplicationResult<TreeStats> {
        let mut counter = NodeCounter::new();
        tree.accept_all(&mut counter)?;
        Ok(TreeStats {
            depth: tree.depth(),
            nodes: counter.total(),
            leaves: counter.leaves,
            branches: counter.branches,
        })
    }

    /// Runs one [`KindLabeler`] per label over the whole tree, pre-order.
    pub fn visit(&self, tree: &Tree, labels: &[String]) -> ApplicationResult<Vec<Vec<String>>> {
        labels
            .iter()
            .map(|label| -> ApplicationResult<Vec<String>> {
                let mut labeler = KindLabeler::new(label.as_str());
                Ok(tree.accept_all(&mut labeler)?)
            })
            .collect()
    }

    /// Walks the tree itself and hands only leaves to a [`LeafCollector`],
    /// which has no branch entry point.
    pub fn collect_leaves(&self, tree: &Tree) -> ApplicationResult<Vec<String>> {
        let mut collector = LeafCollector::new();
        for node in tree.iter().filter(|node| !node.is_composite()) {
            node.accept(&mut collector)?;
        }
        debug!("collected {} leaves via {}", collector.names().len(), collector.name());
        Ok(collector.into_names())
    }

    /// Adds a leaf to `node` when it is composite, without attempting the
    /// mutation on leaves.
    ///
    /// Returns whether the leaf was added.
    pub fn graft_leaf(&self, node: &mut Node) -> bool {
        match node.as_branch_mut() {
            Some(branch) => {
                branch.add(Node::leaf());
                true
            }
            None => false,
        }
    }
}
