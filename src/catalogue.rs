//! Loading the rewrite catalogue.
//!
//! Two kinds of lines: `>add:`/`>rep:`/`>rem:` override the base cost of a
//! primitive operation, `left:right:cost` adds a rewrite rule. An empty
//! left side routes the rule to the insert trie, an empty right side to
//! the delete trie, anything else to the replace trie. Both `\n` and
//! `\r\n` line endings are accepted and blank lines are skipped.

use log::debug;

use crate::casefold::CaseFold;
use crate::cost_model::Cost;
use crate::engine::Engine;
use crate::error::CatalogueError;

/// Upper bound on the number of rules accepted from one catalogue. A
/// query walks the tries once per table cell, so a runaway catalogue is
/// refused up front instead of stalling every lookup.
const MAX_RULES: usize = 1 << 20;

impl Engine {
    /// Parses a catalogue and builds the rule tries. When `fold` is given
    /// (case-insensitive mode), both sides of every rule are folded before
    /// insertion.
    pub fn from_catalogue(text: &str, fold: Option<&CaseFold>) -> Result<Engine, CatalogueError> {
        let mut engine = Engine::new();
        let mut rules = 0usize;
        for (nr, line) in text.lines().enumerate() {
            let line_nr = nr + 1;
            if line.is_empty() {
                continue;
            }
            if let Some(rest) = line.strip_prefix('>') {
                let (op, value) = rest
                    .split_once(':')
                    .ok_or(CatalogueError::MissingField { line: line_nr })?;
                let cost = parse_cost(value, line_nr)?;
                match op {
                    "add" => engine.costs.add = cost,
                    "rep" => engine.costs.rep = cost,
                    "rem" => engine.costs.rem = cost,
                    _ => {
                        return Err(CatalogueError::UnknownDirective {
                            line: line_nr,
                            directive: op.to_string(),
                        })
                    }
                }
            } else {
                let (left, rest) = line
                    .split_once(':')
                    .ok_or(CatalogueError::MissingField { line: line_nr })?;
                let (right, value) = rest
                    .split_once(':')
                    .ok_or(CatalogueError::MissingField { line: line_nr })?;
                let cost = parse_cost(value, line_nr)?;
                let mut l: Vec<char> = left.chars().collect();
                let mut r: Vec<char> = right.chars().collect();
                if let Some(fold) = fold {
                    fold.fold(&mut l);
                    fold.fold(&mut r);
                }
                engine.add_rule(&l, &r, cost);
                rules += 1;
                if rules > MAX_RULES {
                    return Err(CatalogueError::TooLarge { rules });
                }
            }
        }
        debug!(
            "catalogue: {rules} rewrite rules, base costs add={} rep={} rem={}",
            engine.costs.add, engine.costs.rep, engine.costs.rem
        );
        Ok(engine)
    }
}

fn parse_cost(value: &str, line: usize) -> Result<Cost, CatalogueError> {
    value.trim().parse().map_err(|_| CatalogueError::BadCost {
        line,
        value: value.to_string(),
    })
}
