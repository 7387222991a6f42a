//! Scopewire: resolve a dependency-injection catalogue into a placed scope graph.
//!
//! # Example
//!
//! ```
//! use scopewire_core::load_catalogue;
//! use scopewire_lib::Resolver;
//!
//! let catalogue = load_catalogue(r#"{"instantiables": [
//!     {"type": "Root", "slots": [{"label": "log", "type": "Logger", "role": "singleton"}]},
//!     {"type": "Logger"}
//! ]}"#).unwrap();
//!
//! let resolution = Resolver::new(&catalogue).resolve().unwrap();
//! println!("{}", resolution.printer().dump());
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod analyze;
pub mod diagnostics;
pub mod graph;
pub mod plan;
pub mod printer;
pub mod resolver;

#[cfg(test)]
mod fixtures;
#[cfg(test)]
mod resolver_tests;

use std::fmt;

use scopewire_core::{Property, TypeIdentity};

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter};
pub use graph::{BuildKind, PlacedSlot, Scope, ScopeGraph, ScopeId};
pub use plan::{Plan, PlanScope, PlanSlot};
pub use printer::PlanPrinter;
pub use resolver::{Resolution, Resolver};

/// A received slot no ancestor can supply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnfulfillableProperty {
    pub property: Property,
    /// Concrete type of the consuming instantiable.
    pub instantiable: TypeIdentity,
    /// Ancestors of the consumer on the failing path, root first.
    pub ancestor_chain: Vec<TypeIdentity>,
}

impl fmt::Display for UnfulfillableProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "`{}` on `{}` is not supplied by any ancestor",
            self.property, self.instantiable
        )?;
        if !self.ancestor_chain.is_empty() {
            write!(f, " (path: {})", join(&self.ancestor_chain, " -> "))?;
        }
        Ok(())
    }
}

/// Errors that fail a resolution run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A reachable type has no catalogue entry.
    #[error("no instantiable found for `{0}`")]
    NoInstantiableFound(TypeIdentity),

    /// Every candidate root is constructed by something else, or there are none.
    #[error("no root found")]
    NoRootFound,

    #[error("cannot place singletons {} under a common ancestor of roots {}", join(.properties, ", "), join(.roots, ", "))]
    UnsatisfiableSingletons {
        properties: Vec<Property>,
        roots: Vec<TypeIdentity>,
    },

    #[error("resolution failed with {} unfulfillable properties", .0.len())]
    UnfulfillableProperties(Vec<UnfulfillableProperty>),
}

/// Result type for resolution.
pub type Result<T> = std::result::Result<T, Error>;

fn join<T: fmt::Display>(items: &[T], sep: &str) -> String {
    items
        .iter()
        .map(|item| format!("`{item}`"))
        .collect::<Vec<_>>()
        .join(sep)
}
