use std::path::PathBuf;

use scopewire_core::Colors;

use super::run_common::{load_or_exit, resolve_or_exit};

pub struct RootsArgs {
    pub manifest_paths: Vec<PathBuf>,
    pub color: bool,
}

pub fn run(args: RootsArgs) {
    let catalogue = load_or_exit(&args.manifest_paths, args.color);
    let resolution = resolve_or_exit(&catalogue, args.color);

    let c = Colors::new(args.color);
    for root in resolution.roots() {
        println!("{}{}{}", c.blue, root, c.reset);
    }
}
