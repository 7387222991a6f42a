//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Manifest files or directories (positional, one or more).
pub fn manifest_paths_arg() -> Arg {
    Arg::new("manifest_paths")
        .value_name("MANIFEST")
        .value_parser(value_parser!(PathBuf))
        .num_args(1..)
        .required(true)
        .help("Manifest file, directory of *.json manifests, or - for stdin")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Verbosity level (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .action(ArgAction::Count)
        .help("Verbosity level (-v for info, -vv for debug logs)")
}

/// Plan output format (--format).
pub fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .value_name("FORMAT")
        .default_value("text")
        .value_parser(["text", "json"])
        .help("Output format")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (only with --format json)")
}

/// Hide passthrough lines (--no-passthroughs).
pub fn no_passthroughs_arg() -> Arg {
    Arg::new("no_passthroughs")
        .long("no-passthroughs")
        .action(ArgAction::SetTrue)
        .help("Hide relayed slots in text output")
}

/// Write output to file (-o/--output).
pub fn output_file_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write output to file")
}
