//! Domain layer: composite tree, evaluators and cursors
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod collection;
pub mod error;
pub mod evaluator;
pub mod node;
pub mod parser;
pub mod tree;

pub use collection::{Cursor, Direction, DirectionalIter, OrderedCollection};
pub use error::{DomainError, DomainResult};
pub use evaluator::{Evaluator, KindLabeler, LeafCollector, NodeCounter};
pub use node::{Branch, Leaf, Node, NodeKind};
pub use parser::{parse_node, MAX_DEPTH};
pub use tree::{PostOrderIter, PreOrderIter, Tree};
