use std::path::PathBuf;

use tracing::info;

use super::run_common::{load_or_exit, resolve_or_exit};

pub struct CheckArgs {
    pub manifest_paths: Vec<PathBuf>,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let catalogue = load_or_exit(&args.manifest_paths, args.color);
    let resolution = resolve_or_exit(&catalogue, args.color);

    info!(
        roots = resolution.roots().len(),
        placed = resolution.graph().placed_count(),
        "catalogue resolves"
    );

    // Silent on success (like cargo check)
}
