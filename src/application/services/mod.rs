//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.

mod demo;
mod iteration;
mod tree;

pub use demo::{DemoService, Section};
pub use iteration::IterationService;
pub use tree::{TreeService, TreeStats};
