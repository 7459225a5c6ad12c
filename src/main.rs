use std::fs;
use std::io;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::Parser;

use gedist::cli::Cli;
use gedist::driver::{run_threshold, run_top_n, Query, ThresholdOptions};
use gedist::{extract_blocked_regions, CaseFold, Engine, MatchShape};

fn main() -> ExitCode {
    env_logger::init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and exit cleanly; everything
            // else is an argument error.
            let failed = e.use_stderr();
            let _ = e.print();
            return if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("gedist: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let fold = match &cli.casemap {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading case map {}", path.display()))?;
            Some(CaseFold::parse(&text)?)
        }
        None => None,
    };

    let catalogue = fs::read_to_string(&cli.catalogue)
        .with_context(|| format!("reading catalogue {}", cli.catalogue.display()))?;
    let engine = Engine::from_catalogue(&catalogue, fold.as_ref())?;

    let mut search: Vec<char> = cli.search.chars().collect();
    let mut masks = None;
    if cli.blocked_regions && !search.is_empty() {
        let (stripped, extracted) = extract_blocked_regions(&search);
        search = stripped;
        masks = extracted;
    }
    if let Some(fold) = &fold {
        fold.fold(&mut search);
    }

    let shapes = cli.shapes();
    if cli.alignments
        && (cli.max_distance.is_none() || cli.blocked_regions || shapes != [MatchShape::Full])
    {
        bail!("-a needs threshold mode (-m), the full match shape alone, and no -e");
    }

    let dictionary = fs::read_to_string(&cli.dictionary)
        .with_context(|| format!("reading dictionary {}", cli.dictionary.display()))?;

    let query = Query {
        engine: &engine,
        fold: fold.as_ref(),
        masks: masks.as_ref(),
        search,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match (cli.best, cli.max_distance) {
        (Some(n), None) => {
            // Top-N mode scores a single shape: the last flag given.
            let shape = shapes.last().copied().unwrap_or(MatchShape::Full);
            run_top_n(&query, &dictionary, n, shape, &mut out)?;
        }
        (None, Some(max_distance)) => {
            let opts = ThresholdOptions {
                max_distance,
                shapes,
                line_numbers: cli.line_numbers,
                alignments: cli.alignments,
                weights: cli.weights,
                pretty: cli.pretty,
            };
            run_threshold(&query, &dictionary, &opts, &mut out)?;
        }
        _ => bail!("exactly one of -m and -b must be given"),
    }
    Ok(())
}
