//! Ternary search tree with prefix autocomplete and pattern matching.
//!
//! The [`domain`] layer holds the data structure; [`cli`] is the interactive
//! menu built on top of it.

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{KeyMatcher, PatternSyntax, TernaryTree, TreeError, TreeResult};
