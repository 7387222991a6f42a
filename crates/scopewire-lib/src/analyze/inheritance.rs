//! Inheritance propagation.
//!
//! Every received slot is matched against the consumer's ancestors, nearest
//! first. Only a scope that builds the property (any placed slot) or gets it
//! from its caller (a forwarded slot) supplies it; a scope that merely
//! receives it is itself fed from further up. Every scope between consumer
//! and supplier relays the property as a passthrough.
//!
//! A singleton hosted at a strict ancestor is consumed the same way, matched
//! by type: the relayed property is the one the host placed.
//!
//! The walk uses an explicit stack, so construction depth is bounded only by
//! memory.

use scopewire_core::{Catalogue, Property, Role, Slot, TypeIdentity};
use tracing::{debug, trace};

use super::invariants::ensure_scope;
use crate::graph::{ScopeGraph, ScopeId};
use crate::{Error, Result, UnfulfillableProperty};

/// Resolve all inherited slots, collecting every failure.
pub fn propagate_inheritance(
    catalogue: &Catalogue,
    graph: &mut ScopeGraph,
    roots: &[TypeIdentity],
) -> Result<()> {
    let root_ids: Vec<ScopeId> = roots.iter().map(|ty| ensure_scope(graph, ty)).collect();
    let mut propagator = InheritancePropagator {
        catalogue,
        on_path: vec![false; graph.len()],
        graph,
        path: Vec::new(),
        failures: Vec::new(),
    };
    for root in root_ids {
        propagator.walk(root);
    }

    debug!(
        passthroughs = propagator.graph.passthrough_count(),
        failures = propagator.failures.len(),
        "propagated inheritance"
    );

    let mut failures = propagator.failures;
    if failures.is_empty() {
        return Ok(());
    }
    failures.sort_by_cached_key(|f| (f.instantiable.canonical(), f.property.sort_key()));
    Err(Error::UnfulfillableProperties(failures))
}

/// A scope on the walk stack and the children still to visit.
struct Frame {
    children: Vec<ScopeId>,
    next: usize,
}

struct InheritancePropagator<'a> {
    catalogue: &'a Catalogue,
    graph: &'a mut ScopeGraph,
    /// Ancestors of the scope being resolved, root first.
    path: Vec<ScopeId>,
    /// Membership index over `path`.
    on_path: Vec<bool>,
    failures: Vec<UnfulfillableProperty>,
}

impl InheritancePropagator<'_> {
    fn walk(&mut self, root: ScopeId) {
        self.resolve_slots(root);
        let mut stack = vec![self.enter(root)];

        while let Some(frame) = stack.last_mut() {
            let Some(&child) = frame.children.get(frame.next) else {
                stack.pop();
                if let Some(left) = self.path.pop() {
                    self.on_path[left.index()] = false;
                }
                continue;
            };
            frame.next += 1;
            if self.on_path[child.index()] {
                continue;
            }
            self.resolve_slots(child);
            stack.push(self.enter(child));
        }
    }

    /// Push `scope` onto the path and list its distinct children.
    fn enter(&mut self, scope: ScopeId) -> Frame {
        self.path.push(scope);
        self.on_path[scope.index()] = true;
        let mut children: Vec<ScopeId> = Vec::new();
        for placed in self.graph.get(scope).placed() {
            if !children.contains(&placed.scope) {
                children.push(placed.scope);
            }
        }
        Frame { children, next: 0 }
    }

    fn resolve_slots(&mut self, scope: ScopeId) {
        let catalogue = self.catalogue;
        let instantiable = catalogue.get(self.graph.get(scope).instantiable());
        for slot in &instantiable.slots {
            let inherited = match slot.role {
                Role::Received => true,
                Role::Singleton => !self.graph.get(scope).hosts_singleton(slot.declared_type()),
                _ => false,
            };
            if inherited {
                self.resolve(scope, slot);
            }
        }
    }

    fn resolve(&mut self, consumer: ScopeId, slot: &Slot) {
        let supplier = self
            .path
            .iter()
            .rev()
            .enumerate()
            .find_map(|(distance, &ancestor)| {
                self.supplied(ancestor, slot).map(|property| (distance, property))
            });

        let Some((distance, property)) = supplier else {
            let failure = UnfulfillableProperty {
                property: slot.property.clone(),
                instantiable: self.graph.get(consumer).concrete().clone(),
                ancestor_chain: self
                    .path
                    .iter()
                    .map(|&id| self.graph.get(id).concrete().clone())
                    .collect(),
            };
            if !self.failures.contains(&failure) {
                self.failures.push(failure);
            }
            return;
        };

        let len = self.path.len();
        for &relay in &self.path[len - distance..] {
            if self.graph.add_passthrough(relay, property.clone()) {
                trace!(
                    property = %property,
                    relay = %self.graph.get(relay).concrete(),
                    "added passthrough"
                );
            }
        }
    }

    /// The property `ancestor` hands down for `slot`, if it supplies it.
    fn supplied(&self, ancestor: ScopeId, slot: &Slot) -> Option<Property> {
        let scope = self.graph.get(ancestor);
        if slot.role == Role::Singleton
            && let Some(hosted) = scope.hosted_singleton(slot.declared_type())
        {
            return Some(hosted.property.clone());
        }
        if scope.placed_property(&slot.property).is_some() {
            return Some(slot.property.clone());
        }
        self.catalogue
            .get(scope.instantiable())
            .slots_with_role(Role::Forwarded)
            .any(|forwarded| forwarded.property == slot.property)
            .then(|| slot.property.clone())
    }
}
