//! Domain layer: the ternary search tree and key matchers
//!
//! This layer is independent of external concerns (no terminal I/O, no CLI, no config loading).

pub mod error;
pub mod matcher;
pub mod tree;

pub use error::{TreeError, TreeResult};
pub use matcher::{GlobMatcher, KeyMatcher, PatternSyntax, PrefixMatcher, RegexMatcher};
pub use tree::TernaryTree;
