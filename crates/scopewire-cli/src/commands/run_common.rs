//! Shared logic for all commands: load, resolve, or report and exit.

use std::path::PathBuf;

use scopewire_core::Catalogue;
use scopewire_lib::{Diagnostics, Resolution, Resolver};

use super::manifest_loader::load_manifests;

/// Load and merge manifests, exiting with a diagnostic on failure.
pub fn load_or_exit(paths: &[PathBuf], color: bool) -> Catalogue {
    match load_manifests(paths) {
        Ok(catalogue) => catalogue,
        Err(err) => match err.as_catalogue_error() {
            Some(dup) => exit_with(&Diagnostics::from(dup), color),
            None => {
                eprintln!("error: {}", err);
                std::process::exit(1);
            }
        },
    }
}

/// Resolve the catalogue, exiting with every reported violation on failure.
pub fn resolve_or_exit(catalogue: &Catalogue, color: bool) -> Resolution<'_> {
    Resolver::new(catalogue)
        .resolve()
        .unwrap_or_else(|err| exit_with(&Diagnostics::from(&err), color))
}

fn exit_with(diagnostics: &Diagnostics, color: bool) -> ! {
    eprint!("{}", diagnostics.render_colored(color));
    std::process::exit(1)
}
