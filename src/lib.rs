//! treekit: composite trees, double-dispatch evaluators and directional cursors
//!
//! - [`domain`]: nodes, trees, evaluators, the notation parser and cursors
//! - [`application`]: services composing domain operations for the CLI
//! - [`cli`]: argument parsing, dispatch and terminal output
//! - [`config`]: layered settings

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
