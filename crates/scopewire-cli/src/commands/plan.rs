use std::fs;
use std::path::PathBuf;

use tracing::info;

use super::run_common::{load_or_exit, resolve_or_exit};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlanFormat {
    #[default]
    Text,
    Json,
}

pub struct PlanArgs {
    pub manifest_paths: Vec<PathBuf>,
    pub format: PlanFormat,
    pub compact: bool,
    pub passthroughs: bool,
    pub output: Option<PathBuf>,
    pub color: bool,
}

pub fn run(args: PlanArgs) {
    let catalogue = load_or_exit(&args.manifest_paths, args.color);
    let resolution = resolve_or_exit(&catalogue, args.color);

    let output = match args.format {
        PlanFormat::Text => resolution
            .printer()
            .colored(args.color)
            .with_passthroughs(args.passthroughs)
            .dump(),
        PlanFormat::Json => match resolution.to_plan().to_json(args.compact) {
            Ok(mut json) => {
                json.push('\n');
                json
            }
            Err(e) => {
                eprintln!("error: failed to serialize plan: {}", e);
                std::process::exit(1);
            }
        },
    };

    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, &output) {
                eprintln!("error: failed to write '{}': {}", path.display(), e);
                std::process::exit(1);
            }
            info!(path = %path.display(), "wrote plan");
        }
        None => print!("{}", output),
    }
}
