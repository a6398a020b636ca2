//! Insertion-ordered collection with direction-aware external cursors.
//!
//! A [`Cursor`] is a plain value: position plus direction. The collection
//! is handed in at every step, so a cursor never holds on to it. Several
//! cursors over one collection each keep their own position.
//!
//! Cursor states:
//! - before start: `-1` forward, `len` reverse
//! - positioned: `0..len`, `current()` is valid
//! - exhausted: `move_next()` ran off the end; stays exhausted until `reset()`

use std::fmt;

use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Reverse,
            Direction::Reverse => Direction::Forward,
        }
    }

    pub fn is_reverse(self) -> bool {
        self == Direction::Reverse
    }

    fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Reverse => -1,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Reverse => write!(f, "reverse"),
        }
    }
}

/// Mutable, insertion-ordered sequence plus the direction handed to new cursors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedCollection<T> {
    items: Vec<T>,
    direction: Direction,
}

impl<T> Default for OrderedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for OrderedCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
            direction: Direction::Forward,
        }
    }
}

impl<T> OrderedCollection<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            direction: Direction::Forward,
        }
    }

    pub fn add_item(&mut self, item: T) {
        self.items.push(item);
    }

    /// Flips the direction for cursors created from now on.
    #[instrument(level = "debug", skip(self))]
    pub fn reverse_direction(&mut self) {
        self.direction = self.direction.flipped();
        debug!("direction now {}", self.direction);
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Mutable access for in-place edits; live cursors are not adjusted.
    pub fn items_mut(&mut self) -> &mut Vec<T> {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Detached cursor in the current direction.
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.len(), self.direction)
    }

    /// Cursor bound to this collection for its lifetime.
    pub fn iter(&self) -> DirectionalIter<'_, T> {
        DirectionalIter {
            collection: self,
            cursor: self.cursor(),
        }
    }
}

impl<'a, T> IntoIterator for &'a OrderedCollection<T> {
    type Item = &'a T;
    type IntoIter = DirectionalIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// External cursor: position and direction, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    position: isize,
    direction: Direction,
    exhausted: bool,
}

impl Cursor {
    fn new(len: usize, direction: Direction) -> Self {
        Self {
            position: before_start(len, direction),
            direction,
            exhausted: false,
        }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Raw position, including the before-start values `-1` and `len`.
    pub fn key(&self) -> isize {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Steps one element in the cursor's direction.
    ///
    /// Returns `false` once the end is reached; the position is not moved
    /// past the last valid element and later calls keep returning `false`.
    #[instrument(level = "trace", skip_all, fields(position = self.position))]
    pub fn move_next<T>(&mut self, collection: &OrderedCollection<T>) -> bool {
        if self.exhausted {
            return false;
        }
        let candidate = self.position + self.direction.step();
        if (0..len_as_isize(collection.len())).contains(&candidate) {
            self.position = candidate;
            true
        } else {
            trace!("exhausted at candidate {}", candidate);
            self.exhausted = true;
            false
        }
    }

    /// Element under the cursor.
    ///
    /// Fails with `InvalidCursorAccess` before the first successful
    /// `move_next`, after exhaustion, or when the collection shrank below
    /// the position.
    pub fn current<'a, T>(&self, collection: &'a OrderedCollection<T>) -> DomainResult<&'a T> {
        if self.exhausted {
            return Err(self.invalid_access());
        }
        usize::try_from(self.position)
            .ok()
            .and_then(|idx| collection.items().get(idx))
            .ok_or_else(|| self.invalid_access())
    }

    /// Back to before the first element in the cursor's direction.
    pub fn reset<T>(&mut self, collection: &OrderedCollection<T>) {
        self.position = before_start(collection.len(), self.direction);
        self.exhausted = false;
    }

    fn invalid_access(&self) -> DomainError {
        DomainError::InvalidCursorAccess {
            position: self.position,
        }
    }
}

fn before_start(len: usize, direction: Direction) -> isize {
    match direction {
        Direction::Forward => -1,
        Direction::Reverse => len_as_isize(len),
    }
}

fn len_as_isize(len: usize) -> isize {
    isize::try_from(len).unwrap_or(isize::MAX)
}

/// Cursor borrowing its collection; usable as a std iterator.
#[derive(Debug, Clone)]
pub struct DirectionalIter<'a, T> {
    collection: &'a OrderedCollection<T>,
    cursor: Cursor,
}

impl<'a, T> DirectionalIter<'a, T> {
    pub fn move_next(&mut self) -> bool {
        self.cursor.move_next(self.collection)
    }

    pub fn current(&self) -> DomainResult<&'a T> {
        self.cursor.current(self.collection)
    }

    pub fn reset(&mut self) {
        self.cursor.reset(self.collection);
    }

    pub fn key(&self) -> isize {
        self.cursor.key()
    }

    pub fn direction(&self) -> Direction {
        self.cursor.direction()
    }
}

impl<'a, T> Iterator for DirectionalIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.move_next() {
            self.current().ok()
        } else {
            None
        }
    }
}
