//! Key predicates used by partial matching
//!
//! The tree walks its keys in order and asks a [`KeyMatcher`] about each
//! complete candidate. Swapping the matcher changes the matching semantics
//! without touching the traversal.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::{TreeError, TreeResult};

/// Predicate over a full candidate key.
pub trait KeyMatcher {
    fn is_match(&self, key: &str) -> bool;
}

impl<F> KeyMatcher for F
where
    F: Fn(&str) -> bool,
{
    fn is_match(&self, key: &str) -> bool {
        self(key)
    }
}

/// Regular-expression matcher.
///
/// [`RegexMatcher::new`] matches the whole candidate key;
/// [`RegexMatcher::search`] accepts a match anywhere in the key.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
}

impl RegexMatcher {
    pub fn new(pattern: &str) -> TreeResult<Self> {
        // checked alone first: `a)|(b` only compiles inside the wrapping group
        Regex::new(pattern).map_err(|e| TreeError::pattern(pattern, e))?;
        let regex = Regex::new(&format!("^(?:{})$", pattern))
            .map_err(|e| TreeError::pattern(pattern, e))?;
        Ok(Self { regex })
    }

    pub fn search(pattern: &str) -> TreeResult<Self> {
        let regex = Regex::new(pattern).map_err(|e| TreeError::pattern(pattern, e))?;
        Ok(Self { regex })
    }
}

impl KeyMatcher for RegexMatcher {
    fn is_match(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }
}

/// Shell-style wildcard matcher over the whole key.
///
/// `*` matches any run of characters (including none), `?` exactly one
/// character; everything else is literal.
#[derive(Debug, Clone)]
pub struct GlobMatcher {
    regex: Regex,
}

impl GlobMatcher {
    pub fn new(glob: &str) -> TreeResult<Self> {
        let mut translated = String::with_capacity(glob.len() + 8);
        translated.push_str("^(?s:");
        let mut literal = [0u8; 4];
        for ch in glob.chars() {
            match ch {
                '*' => translated.push_str(".*"),
                '?' => translated.push('.'),
                _ => translated.push_str(&regex::escape(ch.encode_utf8(&mut literal))),
            }
        }
        translated.push_str(")$");

        let regex = Regex::new(&translated).map_err(|e| TreeError::pattern(glob, e))?;
        Ok(Self { regex })
    }
}

impl KeyMatcher for GlobMatcher {
    fn is_match(&self, key: &str) -> bool {
        self.regex.is_match(key)
    }
}

/// Literal prefix test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixMatcher {
    prefix: String,
}

impl PrefixMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl KeyMatcher for PrefixMatcher {
    fn is_match(&self, key: &str) -> bool {
        key.starts_with(&self.prefix)
    }
}

/// Pattern language used for user-supplied partial-match patterns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternSyntax {
    /// Regular expression over the whole key
    #[default]
    Regex,
    /// Regular expression found anywhere in the key
    Search,
    /// Shell wildcards over the whole key
    Glob,
}

impl PatternSyntax {
    /// Compile `pattern` into a matcher of this syntax.
    pub fn compile(self, pattern: &str) -> TreeResult<Box<dyn KeyMatcher>> {
        Ok(match self {
            PatternSyntax::Regex => Box::new(RegexMatcher::new(pattern)?),
            PatternSyntax::Search => Box::new(RegexMatcher::search(pattern)?),
            PatternSyntax::Glob => Box::new(GlobMatcher::new(pattern)?),
        })
    }
}

impl fmt::Display for PatternSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternSyntax::Regex => write!(f, "regex"),
            PatternSyntax::Search => write!(f, "search"),
            PatternSyntax::Glob => write!(f, "glob"),
        }
    }
}
