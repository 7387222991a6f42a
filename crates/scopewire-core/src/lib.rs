#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for scopewire.
//!
//! Two layers:
//! - **Deserialization layer**: `RawManifest`, a 1:1 mapping to manifest JSON
//! - **Model layer**: `TypeIdentity`, `Slot`, `Instantiable` and the `Catalogue`
//!   the resolver consumes

mod catalogue;
mod colors;
mod identity;
mod manifest;
mod slot;
pub mod syntax;

#[cfg(test)]
mod catalogue_tests;
#[cfg(test)]
mod identity_tests;

pub use catalogue::{Catalogue, CatalogueError, Instantiable, InstantiableId};
pub use colors::Colors;
pub use identity::{
    DeferredWrapper, FORWARDING_INSTANTIATOR_WRAPPER, INSTANTIATOR_WRAPPER, LAZY_WRAPPER,
    TypeIdentity,
};
pub use manifest::{
    ManifestError, RawInstantiable, RawManifest, RawSlot, load_catalogue, parse_manifest,
};
pub use slot::{Property, Role, Slot};
pub use syntax::TypeParseError;

/// Sort type identities by canonical text.
pub fn sort_canonical(types: &mut [TypeIdentity]) {
    types.sort_by_cached_key(TypeIdentity::canonical);
}
