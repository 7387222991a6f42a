//! Resolution passes.
//!
//! Run strictly in order, each annotating the same [`ScopeGraph`]:
//! reachability, scope building, singleton placement, inheritance.
//!
//! [`ScopeGraph`]: crate::graph::ScopeGraph

mod inheritance;
mod invariants;
mod reachability;
mod scopes;
mod singletons;

#[cfg(test)]
mod singletons_tests;

pub use inheritance::propagate_inheritance;
pub use reachability::{Reachability, analyze_reachability};
pub use scopes::build_scopes;
pub use singletons::{SingletonDemand, place_singletons, singleton_demand};
