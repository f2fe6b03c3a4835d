use std::io;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use html2data::Document;

mod cli;
mod output;

use cli::{Cli, Target};

fn main() {
    if let Err(error) = run() {
        eprintln!("html2data error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let (target, selectors) = cli::parse_args(&cli.args)?;
    let document = match Target::from_arg(&target) {
        Target::Stdin => Document::from_reader(io::stdin().lock()),
        Target::Url(url) => Document::from_url(&url, &cli.fetch_config()),
        Target::File(path) => Document::from_file(path),
        Target::Missing => {
            Cli::command().print_help()?;
            return Ok(());
        }
    };

    let options = cli.extract_options();
    let print_names = selectors.len() > 1;
    let mut out = io::stdout().lock();

    match &cli.find_in {
        Some(outer) => {
            let containers = document
                .get_data_nested(outer, &selectors, options)
                .with_context(|| format!("failed to extract from '{target}' inside '{outer}'"))?;
            if cli.json {
                output::write_json(&mut out, &containers)?;
            } else {
                output::write_nested_text(&mut out, &containers, print_names)?;
            }
        }
        None => {
            let texts = document
                .get_data(&selectors, options)
                .with_context(|| format!("failed to extract from '{target}'"))?;
            if cli.json {
                output::write_json(&mut out, &texts)?;
            } else {
                output::write_text(&mut out, &texts, print_names)?;
            }
        }
    }

    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("HTML2DATA_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
