//! Iteration service
//!
//! Drives explicit cursors over an ordered collection.

use tracing::{debug, instrument};

use crate::application::ApplicationResult;
use crate::domain::OrderedCollection;

#[derive(Debug, Default)]
pub struct IterationService;

impl IterationService {
    pub fn new() -> Self {
        Self
    }

    /// Builds a collection from `items`, flipped when `reverse` is set.
    pub fn collection(&self, items: &[String], reverse: bool) -> OrderedCollection<String> {
        let mut collection: OrderedCollection<String> = items.iter().cloned().collect();
        if reverse {
            collection.reverse_direction();
        }
        collection
    }

    /// Walks a fresh cursor to exhaustion with `move_next`/`current`.
    #[instrument(level = "debug", skip_all, fields(direction = %collection.direction()))]
    pub fn traverse(&self, collection: &OrderedCollection<String>) -> ApplicationResult<Vec<String>> {
        let mut cursor = collection.cursor();
        let mut seen = Vec::with_capacity(collection.len());
        while cursor.move_next(collection) {
            seen.push(cursor.current(collection)?.clone());
        }
        debug!("traversed {} items", seen.len());
        Ok(seen)
    }

    /// Straight traversal, then reverse traversal after flipping the direction.
    pub fn walkthrough(&self, items: &[String]) -> ApplicationResult<Vec<String>> {
        let mut collection = self.collection(items, false);
        let mut lines = vec!["Straight traversal:".to_string()];
        lines.extend(self.traverse(&collection)?);

        lines.push(String::new());
        lines.push("Reverse traversal:".to_string());
        collection.reverse_direction();
        lines.extend(self.traverse(&collection)?);
        Ok(lines)
    }
}
