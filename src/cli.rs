//! Command line interface.

use std::path::PathBuf;

use clap::{ArgAction, ArgGroup, Parser};

use crate::engine::MatchShape;

/// Searches a dictionary for entries within a generalized edit distance
/// of the search string, using a catalogue of weighted rewrite rules on
/// top of the primitive character edits.
#[derive(Parser, Debug)]
#[command(
    name = "gedist",
    disable_help_flag = true,
    group(ArgGroup::new("mode").required(true).args(["max_distance", "best"])),
    after_help = "Blocked regions (-e): inside (..) the primitive edit operations are \
                  forbidden, inside <..> rewrite rules are forbidden as well. Doubled \
                  markers at the very start or end of the search string also forbid \
                  insertions before or after it."
)]
pub struct Cli {
    /// Threshold mode: print every entry within this distance.
    #[arg(short = 'm', value_name = "maxED", allow_negative_numbers = true)]
    pub max_distance: Option<f64>,

    /// Top-N mode: print the N entries closest to the search string.
    /// Ties for the last place may extend the list.
    #[arg(short = 'b', value_name = "N")]
    pub best: Option<usize>,

    /// Match the full extent of each entry (default).
    #[arg(short = 'f')]
    pub full: bool,

    /// Match a prefix of each entry.
    #[arg(short = 'p')]
    pub prefix: bool,

    /// Match a suffix of each entry.
    #[arg(short = 's')]
    pub suffix: bool,

    /// Match an infix of each entry.
    #[arg(short = 'i')]
    pub infix: bool,

    /// Print the 0-based line number of each match (threshold mode).
    #[arg(short = 'l')]
    pub line_numbers: bool,

    /// Enable (..) and <..> blocked regions in the search string.
    #[arg(short = 'e')]
    pub blocked_regions: bool,

    /// Print the alignment(s) of each match. Threshold mode with the full
    /// match shape alone and without -e.
    #[arg(short = 'a')]
    pub alignments: bool,

    /// Include transformation weights in alignment output.
    #[arg(short = 'w')]
    pub weights: bool,

    /// Pretty-print alignments by padding the shorter side.
    #[arg(short = 'y')]
    pub pretty: bool,

    /// File with the rewrite catalogue.
    pub catalogue: PathBuf,

    /// The string to search for.
    pub search: String,

    /// Dictionary file, one candidate per line.
    pub dictionary: PathBuf,

    /// Case-map file with `from:to` lines; enables case-insensitive
    /// search.
    pub casemap: Option<PathBuf>,

    #[arg(short = '?', long = "help", action = ArgAction::Help, help = "Print help")]
    pub help: Option<bool>,
}

impl Cli {
    /// The match shapes in the order their flags appeared, deduplicated,
    /// defaulting to a single full match. Clap does not keep the relative
    /// order of distinct flags, so the raw arguments are re-scanned.
    pub fn shapes(&self) -> Vec<MatchShape> {
        shape_order(std::env::args().skip(1))
    }
}

/// Recovers the order of the `-f`/`-p`/`-s`/`-i` flags from the raw
/// argument list, honouring clustered short flags and skipping the values
/// of `-m` and `-b`.
pub fn shape_order(args: impl IntoIterator<Item = String>) -> Vec<MatchShape> {
    let mut shapes: Vec<MatchShape> = Vec::new();
    let mut skip_value = false;
    for arg in args {
        if skip_value {
            skip_value = false;
            continue;
        }
        if arg == "--" {
            break;
        }
        let Some(cluster) = arg.strip_prefix('-') else {
            continue;
        };
        if cluster.starts_with('-') {
            continue;
        }
        for (k, c) in cluster.char_indices() {
            let shape = match c {
                'f' => MatchShape::Full,
                'p' => MatchShape::Prefix,
                's' => MatchShape::Suffix,
                'i' => MatchShape::Infix,
                'm' | 'b' => {
                    // The rest of the cluster, or the next argument, is
                    // this option's value.
                    if k + c.len_utf8() == cluster.len() {
                        skip_value = true;
                    }
                    break;
                }
                _ => continue,
            };
            if !shapes.contains(&shape) {
                shapes.push(shape);
            }
        }
    }
    if shapes.is_empty() {
        shapes.push(MatchShape::Full);
    }
    shapes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    fn order(args: &[&str]) -> Vec<MatchShape> {
        shape_order(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_to_full() {
        assert_eq!(order(&["-m", "2", "cat", "word", "dict"]), [MatchShape::Full]);
    }

    #[test]
    fn keeps_flag_order() {
        assert_eq!(
            order(&["-m", "2", "-i", "-p", "-f"]),
            [MatchShape::Infix, MatchShape::Prefix, MatchShape::Full]
        );
    }

    #[test]
    fn reads_clustered_flags() {
        assert_eq!(
            order(&["-sp", "-m", "2"]),
            [MatchShape::Suffix, MatchShape::Prefix]
        );
    }

    #[test]
    fn skips_option_values_and_duplicates() {
        // The "i" inside -m's value must not register as a shape.
        assert_eq!(order(&["-m", "inf", "-p", "-p"]), [MatchShape::Prefix]);
        assert_eq!(order(&["-b3", "-s"]), [MatchShape::Suffix]);
    }

    #[test]
    fn stops_at_the_separator() {
        assert_eq!(order(&["-m", "1", "--", "-p"]), [MatchShape::Full]);
    }
}
