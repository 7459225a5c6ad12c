//! Generalized edit distance over a user-supplied catalogue of string
//! rewrites.
//!
//! The distance between a search string and a candidate text is the
//! cheapest way to turn one into the other using weighted single-character
//! edits plus multi-character rewrite rules (`left -> right` at some
//! cost). Four match shapes control which ends of the text are pinned,
//! marked regions of the search string can forbid edits, and full matches
//! can be backtraced into the tree of all co-optimal alignments.
//!
//! ```
//! use gedist::{chars, Engine};
//!
//! let mut engine = Engine::new();
//! engine.add_rule(&chars("tt"), &chars("d"), 0.2);
//! engine.add_rule(&chars("en"), &chars("ing"), 0.3);
//! let d = engine.distance_full(&chars("kitten"), &chars("kiding"));
//! assert!((d - 0.5).abs() < 1e-7);
//! ```

pub mod casefold;
mod catalogue;
pub mod cli;
pub mod cost_model;
pub mod driver;
pub mod engine;
pub mod error;
pub mod masks;
pub mod top_list;
pub mod trace;
pub mod trie;

pub use casefold::CaseFold;
pub use cost_model::{approx_eq, Cost, CostModel, BLOCK, INF};
pub use engine::{Engine, MatchShape};
pub use error::CatalogueError;
pub use masks::{extract_blocked_regions, SearchMasks};
pub use top_list::TopList;
pub use trace::{OpKind, Trace, Transformation};

/// Strings are processed as sequences of Unicode scalars, never bytes;
/// this is the conversion used throughout.
pub fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

#[cfg(test)]
mod tests;
