//! Scanning a dictionary against a search string.
//!
//! The scan is a plain linear pass: one candidate per line, each scored
//! with the requested match shapes. Output goes to the given writer in
//! the tool's traditional shape: a dashed separator per reported entry,
//! the entry itself, and its scores with six decimal places.

use std::io::{self, Write};

use itertools::Itertools;
use log::debug;

use crate::casefold::CaseFold;
use crate::cost_model::Cost;
use crate::engine::{Engine, MatchShape};
use crate::masks::SearchMasks;
use crate::top_list::TopList;

const SEPARATOR: &str = "------------------------";

/// One prepared search: the engine plus everything derived from the
/// search string. `search` is already stripped of region markers and case
/// folded; `fold` is applied to every dictionary entry before scoring.
pub struct Query<'a> {
    pub engine: &'a Engine,
    pub fold: Option<&'a CaseFold>,
    pub masks: Option<&'a SearchMasks>,
    pub search: Vec<char>,
}

impl Query<'_> {
    fn score(&self, shape: MatchShape, word: &[char]) -> Cost {
        self.engine.distance(shape, &self.search, word, self.masks)
    }

    fn folded(&self, line: &str) -> Vec<char> {
        let mut word: Vec<char> = line.chars().collect();
        if let Some(fold) = self.fold {
            fold.fold(&mut word);
        }
        word
    }
}

/// Options of the threshold scan.
pub struct ThresholdOptions {
    pub max_distance: Cost,
    /// Match shapes to compute and print, in flag order.
    pub shapes: Vec<MatchShape>,
    /// Prefix each match with its 0-based line number.
    pub line_numbers: bool,
    /// Print the alignments of full matches. Callers must only enable
    /// this with `shapes == [Full]` and no masks.
    pub alignments: bool,
    pub weights: bool,
    pub pretty: bool,
}

/// Reports every entry for which at least one requested score stays
/// within the threshold.
pub fn run_threshold(
    query: &Query,
    dictionary: &str,
    opts: &ThresholdOptions,
    out: &mut impl Write,
) -> io::Result<()> {
    let mut scanned = 0usize;
    let mut matched = 0usize;
    for (nr, line) in dictionary.lines().enumerate() {
        scanned += 1;
        let word = query.folded(line);
        let scores: Vec<Cost> = opts
            .shapes
            .iter()
            .map(|&shape| query.score(shape, &word))
            .collect();
        if !scores.iter().any(|&s| s <= opts.max_distance) {
            continue;
        }
        matched += 1;
        writeln!(out, "{SEPARATOR}")?;
        if opts.line_numbers {
            writeln!(out, "{nr}")?;
        }
        writeln!(out, "{line}")?;
        writeln!(out, "{}", scores.iter().map(|s| format!("{s:.6} ")).join(""))?;

        if opts.alignments {
            let full = opts
                .shapes
                .iter()
                .position(|&s| s == MatchShape::Full)
                .map(|k| scores[k]);
            if full.is_some_and(|s| s <= opts.max_distance) {
                let (_, trace) = query.engine.trace_full(&query.search, &word);
                for alignment in trace.render(opts.weights, opts.pretty) {
                    writeln!(out, "{alignment}")?;
                }
            }
        }
    }
    debug!("threshold scan: {matched} of {scanned} entries within {}", opts.max_distance);
    Ok(())
}

/// Keeps the N best entries under a single match shape and prints them
/// grouped by score. Ties in the group that reaches N extend the output
/// past N.
pub fn run_top_n(
    query: &Query,
    dictionary: &str,
    n: usize,
    shape: MatchShape,
    out: &mut impl Write,
) -> io::Result<()> {
    let mut best = TopList::new(n);
    let mut scanned = 0usize;
    for line in dictionary.lines() {
        scanned += 1;
        let word = query.folded(line);
        best.push(query.score(shape, &word), line.to_string());
    }
    debug!("top-{n} scan: {scanned} entries");

    let mut printed = 0usize;
    for (score, entries) in best.groups() {
        writeln!(out, "{SEPARATOR}")?;
        writeln!(out, "{score:.6} ")?;
        for entry in entries {
            writeln!(out, "{entry}")?;
            printed += 1;
        }
        if printed >= n {
            break;
        }
    }
    Ok(())
}
