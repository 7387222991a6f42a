//! Load and merge manifests from files, directories or stdin.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use scopewire_core::{Catalogue, CatalogueError, ManifestError, load_catalogue};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("at least one manifest is required")]
    NoManifests,

    #[error("stdin can only be read once")]
    StdinTwice,

    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),

    #[error("failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to read directory '{}': {source}", path.display())]
    ReadDir { path: PathBuf, source: io::Error },

    #[error("no .json manifests found in '{}'", .0.display())]
    EmptyDirectory(PathBuf),

    #[error("{origin}: {source}")]
    Manifest {
        origin: String,
        source: ManifestError,
    },

    #[error(transparent)]
    Catalogue(#[from] CatalogueError),
}

impl LoadError {
    /// The duplicate-fulfillment error, if this is one, for diagnostic rendering.
    pub fn as_catalogue_error(&self) -> Option<&CatalogueError> {
        match self {
            Self::Catalogue(err)
            | Self::Manifest {
                source: ManifestError::Catalogue(err),
                ..
            } => Some(err),
            _ => None,
        }
    }
}

/// One manifest's text and where it came from.
struct ManifestSource {
    origin: String,
    content: String,
}

/// Read every manifest and merge them into one catalogue, in argument order.
pub fn load_manifests(paths: &[PathBuf]) -> Result<Catalogue, LoadError> {
    if paths.is_empty() {
        return Err(LoadError::NoManifests);
    }
    if paths.iter().filter(|p| is_stdin(p)).count() > 1 {
        return Err(LoadError::StdinTwice);
    }

    let mut sources = Vec::new();
    for path in paths {
        if is_stdin(path) {
            sources.push(load_stdin()?);
        } else if path.is_dir() {
            sources.extend(load_directory(path)?);
        } else {
            sources.push(load_file(path)?);
        }
    }

    let mut catalogue = Catalogue::new();
    for source in sources {
        let loaded = load_catalogue(&source.content).map_err(|err| LoadError::Manifest {
            origin: source.origin.clone(),
            source: err,
        })?;
        debug!(origin = %source.origin, instantiables = loaded.len(), "loaded manifest");
        catalogue.merge(loaded)?;
    }
    Ok(catalogue)
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn load_stdin() -> Result<ManifestSource, LoadError> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .map_err(LoadError::Stdin)?;
    Ok(ManifestSource {
        origin: "<stdin>".to_string(),
        content,
    })
}

fn load_file(path: &Path) -> Result<ManifestSource, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(ManifestSource {
        origin: path.display().to_string(),
        content,
    })
}

fn load_directory(dir: &Path) -> Result<Vec<ManifestSource>, LoadError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|source| LoadError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "json"))
        .collect();

    if paths.is_empty() {
        return Err(LoadError::EmptyDirectory(dir.to_path_buf()));
    }

    // Sort for deterministic ordering
    paths.sort();

    paths.iter().map(|path| load_file(path)).collect()
}
