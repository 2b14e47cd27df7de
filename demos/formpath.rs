// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::io::BufRead;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use formpath::{all_paths, Config, Locator, Outcome, Position, Selection, Source};

fn make_locator(config: Option<String>) -> Result<Locator> {
    let config = match config {
        Some(file) => {
            Config::from_file(&file).with_context(|| format!("Failed to load config {file}"))?
        }
        None => Config::default(),
    };
    log::debug!("config: {config:?}");
    Ok(Locator::with_config(config))
}

fn read_source(file: &str) -> Result<Source> {
    Ok(Source::from_file(file)?)
}

// Print the outcome the way an editor would notify the user. The path itself goes to stdout so
// that it can be piped into a clipboard tool.
fn report(outcome: &Outcome) {
    match outcome {
        Outcome::Resolved(path) => println!("{path}"),
        Outcome::Candidates(candidates) => {
            for (idx, candidate) in candidates.iter().enumerate() {
                println!("{:>3}. {}", idx + 1, candidate.label);
            }
            eprintln!("Select path to copy with --pick <N>");
        }
        Outcome::NotFound(_) | Outcome::Cancelled => (),
    }
    if let Some(msg) = outcome.message() {
        eprintln!("{msg}");
    }
}

fn prompt_for_name() -> Result<String> {
    eprint!("Enter attribute name: ");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn formpath_find(
    file: String,
    name: Option<String>,
    pick: Option<usize>,
    all: bool,
    config: Option<String>,
) -> Result<()> {
    let locator = make_locator(config)?;
    let source = read_source(&file)?;

    let name = match name {
        Some(name) => name,
        None => prompt_for_name()?,
    };

    let mut outcome = locator
        .locate_name(source.contents(), &name)
        .with_context(|| format!("Failed to search {}", source.file()))?;

    if all {
        if let Outcome::Candidates(candidates) = &outcome {
            for candidate in candidates {
                println!("{}", candidate.label);
            }
            return Ok(());
        }
    }

    if let Some(n) = pick {
        outcome = outcome.pick(n.checked_sub(1));
    }
    report(&outcome);
    Ok(())
}

fn parse_position(s: &str) -> Result<Position> {
    let (line, col) = s
        .split_once(':')
        .ok_or_else(|| anyhow!("expected <line>:<col>, got `{s}`"))?;
    Ok(Position::new(line.trim().parse()?, col.trim().parse()?))
}

fn parse_selection(
    offset: Option<String>,
    range: Option<String>,
    utf16: bool,
) -> Result<Selection> {
    match (offset, range) {
        (Some(offset), None) => {
            let (start, end) = offset
                .split_once("..")
                .ok_or_else(|| anyhow!("expected <start>..<end>, got `{offset}`"))?;
            Ok(Selection::bytes(start.trim().parse()?..end.trim().parse()?))
        }
        (None, Some(range)) => {
            let (start, end) = range
                .split_once('-')
                .ok_or_else(|| anyhow!("expected <line>:<col>-<line>:<col>, got `{range}`"))?;
            let (start, end) = (parse_position(start)?, parse_position(end)?);
            Ok(match utf16 {
                true => Selection::utf16_positions(start, end),
                false => Selection::positions(start, end),
            })
        }
        _ => bail!("specify exactly one of --offset or --range"),
    }
}

fn formpath_select(
    file: String,
    offset: Option<String>,
    range: Option<String>,
    utf16: bool,
    config: Option<String>,
) -> Result<()> {
    let selection = parse_selection(offset, range, utf16)?;
    let locator = make_locator(config)?;
    let source = read_source(&file)?;

    // Nothing selected: ask for a name instead.
    let outcome = locator
        .locate(&source, &selection, || {
            prompt_for_name().inspect_err(|e| log::warn!("{e}")).ok()
        })
        .with_context(|| format!("Failed to search {}", source.file()))?;
    report(&outcome);
    Ok(())
}

fn formpath_paths(file: String, config: Option<String>) -> Result<()> {
    let locator = make_locator(config)?;
    let source = read_source(&file)?;
    let document = locator.load(source.contents())?;

    for path in all_paths(&document) {
        println!("{}", locator.render(&path));
    }
    Ok(())
}

#[derive(Subcommand)]
enum FormpathCommand {
    /// Find the paths of a field by name.
    Find {
        /// Form document. json.
        file: String,

        /// Field name. Read from stdin when omitted.
        name: Option<String>,

        /// Resolve the N-th candidate (1-based).
        #[arg(long, short)]
        pick: Option<usize>,

        /// Print every candidate path, one per line.
        #[arg(long, short, conflicts_with = "pick")]
        all: bool,

        /// Configuration file. json or yaml.
        #[arg(long, short, value_name = "config.yaml")]
        config: Option<String>,
    },

    /// Find the path of the key under a selection.
    Select {
        /// Form document. json.
        file: String,

        /// Selection as byte offsets.
        #[arg(long, short, value_name = "START..END")]
        offset: Option<String>,

        /// Selection as 1-based editor positions.
        #[arg(long, short, value_name = "LINE:COL-LINE:COL")]
        range: Option<String>,

        /// Count --range columns in UTF-16 code units instead of characters.
        #[arg(long, requires = "range")]
        utf16: bool,

        /// Configuration file. json or yaml.
        #[arg(long, short, value_name = "config.yaml")]
        config: Option<String>,
    },

    /// List every field path in a document.
    Paths {
        /// Form document. json.
        file: String,

        /// Configuration file. json or yaml.
        #[arg(long, short, value_name = "config.yaml")]
        config: Option<String>,
    },
}

#[derive(clap::Parser)]
#[command(author, version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"), about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: FormpathCommand,
}

fn main() -> Result<()> {
    env_logger::init();

    // Parse and dispatch command.
    let cli = Cli::parse();
    match cli.command {
        FormpathCommand::Find {
            file,
            name,
            pick,
            all,
            config,
        } => formpath_find(file, name, pick, all, config),
        FormpathCommand::Select {
            file,
            offset,
            range,
            utf16,
            config,
        } => formpath_select(file, offset, range, utf16, config),
        FormpathCommand::Paths { file, config } => formpath_paths(file, config),
    }
}
