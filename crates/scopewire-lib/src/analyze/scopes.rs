//! Scope building: one scope per reachable instantiable, plus local edges.

use scopewire_core::{Catalogue, Role, TypeIdentity};
use tracing::debug;

use super::invariants::{ensure_fulfilled, ensure_scope};
use crate::graph::{BuildKind, PlacedSlot, ScopeGraph, ScopeId};

/// Materialize scopes for `reachable` and place every `Constructed` and
/// `LazyConstructed` slot. Singletons are left to the singleton pass.
pub fn build_scopes(catalogue: &Catalogue, reachable: &[TypeIdentity]) -> ScopeGraph {
    let mut graph = ScopeGraph::new();

    for ty in reachable {
        if graph.scope_for(ty).is_some() {
            continue;
        }
        let id = ensure_fulfilled(catalogue, ty);
        let instantiable = catalogue.get(id);
        graph.add_scope(
            id,
            instantiable.concrete.clone(),
            instantiable.fulfilled_types(),
        );
    }

    let scope_ids: Vec<ScopeId> = graph.iter().map(|(id, _)| id).collect();
    for scope_id in scope_ids {
        let instantiable = catalogue.get(graph.get(scope_id).instantiable());
        for slot in &instantiable.slots {
            if !matches!(slot.role, Role::Constructed | Role::LazyConstructed) {
                continue;
            }
            let built = slot.built_type();
            let placed = PlacedSlot {
                property: slot.property.clone(),
                role: slot.role,
                instantiable: ensure_fulfilled(catalogue, built),
                scope: ensure_scope(&graph, built),
                kind: BuildKind::for_slot(slot),
            };
            graph.place(scope_id, placed);
        }
    }

    debug!(
        scopes = graph.len(),
        placed = graph.placed_count(),
        "built scopes"
    );
    graph
}
