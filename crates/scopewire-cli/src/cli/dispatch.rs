//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::plan::{PlanArgs, PlanFormat};
use crate::commands::roots::RootsArgs;

pub struct CheckParams {
    pub manifest_paths: Vec<PathBuf>,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            manifest_paths: parse_manifest_paths(m),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            manifest_paths: p.manifest_paths,
            color: p.color.should_colorize(),
        }
    }
}

pub struct PlanParams {
    pub manifest_paths: Vec<PathBuf>,
    pub format: PlanFormat,
    pub compact: bool,
    pub passthroughs: bool,
    pub output: Option<PathBuf>,
    pub color: ColorChoice,
}

impl PlanParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        let format = match m.get_one::<String>("format").map(|s| s.as_str()) {
            Some("json") => PlanFormat::Json,
            _ => PlanFormat::Text,
        };
        Self {
            manifest_paths: parse_manifest_paths(m),
            format,
            compact: m.get_flag("compact"),
            passthroughs: !m.get_flag("no_passthroughs"),
            output: m.get_one::<PathBuf>("output").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<PlanParams> for PlanArgs {
    fn from(p: PlanParams) -> Self {
        // Never write escape codes into a file.
        let color = p.output.is_none() && p.color.should_colorize();
        Self {
            manifest_paths: p.manifest_paths,
            format: p.format,
            compact: p.compact,
            passthroughs: p.passthroughs,
            output: p.output,
            color,
        }
    }
}

pub struct RootsParams {
    pub manifest_paths: Vec<PathBuf>,
    pub color: ColorChoice,
}

impl RootsParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            manifest_paths: parse_manifest_paths(m),
            color: parse_color(m),
        }
    }
}

impl From<RootsParams> for RootsArgs {
    fn from(p: RootsParams) -> Self {
        Self {
            manifest_paths: p.manifest_paths,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_manifest_paths(m: &ArgMatches) -> Vec<PathBuf> {
    m.get_many::<PathBuf>("manifest_paths")
        .map(|paths| paths.cloned().collect())
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

/// Number of `-v` flags, zero when the command has none.
pub fn parse_verbosity(m: &ArgMatches) -> u8 {
    m.try_get_one::<u8>("verbose")
        .ok()
        .flatten()
        .copied()
        .unwrap_or(0)
}
