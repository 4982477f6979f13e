//! Command-line configuration.
//!
//! Parses arguments with clap and maps them onto [`SearchRequest`] and
//! [`Options`]. Validation of the resulting values stays with the library.

use std::path::PathBuf;

use clap::Parser;

use crate::options::{ErrorPolicy, HiddenPolicy, MatchMode, Options, PathStyle, SearchRequest};

/// Upper bound for `--threads`.
const MAX_THREADS: i64 = 100;

/// Find files and directories by name, in parallel
#[derive(Parser, Debug, Clone)]
#[command(
    name = "parfind",
    version,
    about = "Find files and directories by name, in parallel",
    after_help = "EXAMPLES:\n    \
        parfind -f . invoice\n    \
        parfind -fd -p ~/src '^mod\\.rs$'\n    \
        parfind -d -c -n 16 /srv node_modules\n    \
        parfind -f -k -H / passwd"
)]
pub struct CliArgs {
    /// Directory to search
    #[arg(value_name = "PATH")]
    pub root: PathBuf,

    /// Text (or regex with -p) to look for in entry names
    #[arg(value_name = "PATTERN")]
    pub pattern: String,

    /// Match files
    #[arg(short = 'f', long)]
    pub files: bool,

    /// Match directories
    #[arg(short = 'd', long)]
    pub dirs: bool,

    /// Treat PATTERN as a regular expression
    #[arg(short = 'p', long)]
    pub regex: bool,

    /// Compare names case-insensitively
    #[arg(short = 'i', long)]
    pub ignore_case: bool,

    /// Print paths joined onto PATH instead of relative to it
    #[arg(short = 'a', long)]
    pub absolute: bool,

    /// Print the number of entries browsed and the search duration
    #[arg(short = 'c', long)]
    pub count: bool,

    /// Search hidden directories and files too
    #[arg(short = 'H', long, conflicts_with = "exclude_hidden_files")]
    pub hidden: bool,

    /// Skip hidden files as well as hidden directories
    #[arg(long)]
    pub exclude_hidden_files: bool,

    /// Skip unreadable directories instead of stopping
    #[arg(short = 'k', long)]
    pub keep_going: bool,

    /// Number of worker threads [default: logical CPU count]
    #[arg(
        short = 'n',
        long,
        value_name = "NUM",
        value_parser = clap::value_parser!(u16).range(1..=MAX_THREADS)
    )]
    pub threads: Option<u16>,

    /// Log walk progress to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Split the arguments into the search request and its options.
    pub fn into_search(self) -> (SearchRequest, Options) {
        let defaults = Options::default();

        let hidden = if self.hidden {
            HiddenPolicy::Include
        } else if self.exclude_hidden_files {
            HiddenPolicy::Exclude
        } else {
            HiddenPolicy::PruneDirs
        };

        let options = Options {
            files:            self.files,
            dirs:             self.dirs,
            mode:             if self.regex { MatchMode::Regex } else { MatchMode::Substring },
            case_insensitive: self.ignore_case,
            paths:            if self.absolute { PathStyle::Joined } else { PathStyle::Relative },
            stats:            self.count,
            hidden,
            on_error:         if self.keep_going { ErrorPolicy::Continue } else { ErrorPolicy::Abort },
            threads:          self.threads.map(usize::from).unwrap_or(defaults.threads),
        };

        (SearchRequest::new(self.root, self.pattern), options)
    }
}
