//! Invariant checks excluded from coverage reports.
//!
//! Every lookup here is guaranteed to succeed once reachability passed;
//! a failure is a bug in an earlier pass, not bad input.

#![cfg_attr(coverage_nightly, coverage(off))]

use scopewire_core::{Catalogue, InstantiableId, TypeIdentity};

use crate::graph::{ScopeGraph, ScopeId};

#[inline]
pub(super) fn ensure_fulfilled(catalogue: &Catalogue, ty: &TypeIdentity) -> InstantiableId {
    catalogue.fulfilling(ty).unwrap_or_else(|| {
        panic!("broken reachability invariant: reachable type `{ty}` has no instantiable")
    })
}

#[inline]
pub(super) fn ensure_scope(graph: &ScopeGraph, ty: &TypeIdentity) -> ScopeId {
    graph.scope_for(ty).unwrap_or_else(|| {
        panic!("broken scope invariant: reachable type `{ty}` has no scope")
    })
}
