//! Command line arguments

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use html2data::{ExtractOptions, FetchConfig, Selectors};
use thiserror::Error;

/// Selector name used when a single unnamed selector is given
pub const DEFAULT_NAME: &str = "one";

#[derive(Debug, Parser)]
#[command(
    name = "html2data",
    version,
    about = "Extract data from HTML via CSS selectors",
    override_usage = "html2data [OPTIONS] [url|file|-] 'css selector'\n       \
                      html2data [OPTIONS] [url|file|-] :name 'css1' :name2 'css2' ..."
)]
pub struct Cli {
    /// JSON output
    #[arg(long)]
    pub json: bool,

    /// Search in the specified elements instead of the whole document
    #[arg(long, value_name = "SELECTOR")]
    pub find_in: Option<String>,

    /// Set custom user-agent
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Timeout in seconds for fetching a URL
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Keep leading and trailing whitespace of values
    #[arg(long)]
    pub dont_trim_spaces: bool,

    /// Read pages as UTF-8 instead of their declared charset
    #[arg(long)]
    pub dont_detect_charset: bool,

    /// Debug logging on stderr
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// [url|file|-] followed by a selector or `:name selector` pairs
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

impl Cli {
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            keep_whitespace: self.dont_trim_spaces,
        }
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            user_agent: self.user_agent.clone(),
            timeout: self.timeout.map(Duration::from_secs),
            detect_charset: !self.dont_detect_charset,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("arguments is empty")]
    Empty,

    #[error("name '{0}' is not valid, must begin from ':'")]
    InvalidName(String),
}

/// Where the document comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Stdin,
    Url(String),
    File(PathBuf),
    /// Empty target, usage is printed instead
    Missing,
}

impl Target {
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Self::Stdin
        } else if arg.starts_with("http://") || arg.starts_with("https://") {
            Self::Url(arg.to_string())
        } else if !arg.is_empty() {
            Self::File(PathBuf::from(arg))
        } else {
            Self::Missing
        }
    }
}

/// Split positional arguments into the target and named selectors.
///
/// Accepted shapes, target defaulting to `-` (stdin):
/// ```text
/// css                         url css
/// :name css                   url :name css
/// :name css :name2 css2 ...   url :name css :name2 css2 ...
/// ```
pub fn parse_args(args: &[String]) -> Result<(String, Selectors), ArgsError> {
    let mut selectors = Selectors::new();

    let (target, pairs) = match args {
        [] => return Err(ArgsError::Empty),
        [selector] => {
            selectors.insert(DEFAULT_NAME.to_string(), selector.clone());
            return Ok(("-".to_string(), selectors));
        }
        [target, selector] if !target.starts_with(':') => {
            selectors.insert(DEFAULT_NAME.to_string(), selector.clone());
            return Ok((target.clone(), selectors));
        }
        pairs if pairs.len() % 2 == 0 => ("-".to_string(), pairs),
        [target, pairs @ ..] => (target.clone(), pairs),
    };

    for pair in pairs.chunks_exact(2) {
        let (name, selector) = (&pair[0], &pair[1]);
        let Some(stripped) = name.strip_prefix(':') else {
            return Err(ArgsError::InvalidName(name.clone()));
        };
        selectors.insert(stripped.trim_start_matches(':').to_string(), selector.clone());
    }

    Ok((target, selectors))
}
