//! Singleton placement.
//!
//! A singleton is identified by its type: every scope declaring a singleton
//! slot of type `T` shares one instance, whatever label it uses. That
//! instance is built in the deepest scope lying on every path from the roots
//! to every consumer, i.e. the nearest common dominator of the consumers in
//! the scope graph. A sole consumer hosts its own singleton.
//!
//! Placing a singleton adds an edge from its host to the singleton's scope,
//! which can make more consumers reachable (a singleton that itself declares
//! singletons). Placement therefore runs in rounds over a recomputed
//! dominator tree until no pending type has all of its consumers reachable.
//! Within a round, types are placed in scope creation order.

use indexmap::IndexMap;
use scopewire_core::{Catalogue, Property, Role, TypeIdentity};
use tracing::{debug, trace};

use super::invariants::{ensure_fulfilled, ensure_scope};
use crate::graph::{BuildKind, PlacedSlot, ScopeGraph, ScopeId};
use crate::{Error, Result};

/// Scopes declaring one singleton type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingletonDemand {
    /// Slot of the first declaring scope; names the placement when the host
    /// does not declare the singleton itself.
    pub property: Property,
    /// Distinct consumer scopes, in creation order.
    pub consumers: Vec<ScopeId>,
}

impl SingletonDemand {
    pub fn count(&self) -> usize {
        self.consumers.len()
    }
}

/// Consumers of every singleton type, keyed in scope creation order.
pub fn singleton_demand(
    catalogue: &Catalogue,
    graph: &ScopeGraph,
) -> IndexMap<TypeIdentity, SingletonDemand> {
    let mut demand: IndexMap<TypeIdentity, SingletonDemand> = IndexMap::new();
    for (id, scope) in graph.iter() {
        let instantiable = catalogue.get(scope.instantiable());
        for slot in instantiable.slots_with_role(Role::Singleton) {
            let entry = demand
                .entry(slot.declared_type().clone())
                .or_insert_with(|| SingletonDemand {
                    property: slot.property.clone(),
                    consumers: Vec::new(),
                });
            if !entry.consumers.contains(&id) {
                entry.consumers.push(id);
            }
        }
    }
    demand
}

/// Place every singleton, or report all that have no common host.
pub fn place_singletons(
    catalogue: &Catalogue,
    graph: &mut ScopeGraph,
    roots: &[TypeIdentity],
) -> Result<()> {
    let mut pending = singleton_demand(catalogue, graph);
    if pending.is_empty() {
        return Ok(());
    }
    let total = pending.len();
    let root_ids: Vec<ScopeId> = roots.iter().map(|ty| ensure_scope(graph, ty)).collect();

    loop {
        let dominators = Dominators::compute(graph, &root_ids);
        let mut placements = Vec::new();
        pending.retain(|ty, demand| match dominators.common_dominator(&demand.consumers) {
            Some(host) => {
                placements.push((host, ty.clone(), demand.property.clone()));
                false
            }
            None => true,
        });
        if placements.is_empty() {
            break;
        }
        for (host, ty, property) in placements {
            place(catalogue, graph, host, &ty, property);
        }
    }

    debug!(
        singletons = total,
        unplaced = pending.len(),
        "placed singletons"
    );

    if pending.is_empty() {
        return Ok(());
    }
    let mut properties: Vec<Property> = pending.into_values().map(|d| d.property).collect();
    properties.sort_by_cached_key(Property::sort_key);
    Err(Error::UnsatisfiableSingletons {
        properties,
        roots: roots.to_vec(),
    })
}

fn place(
    catalogue: &Catalogue,
    graph: &mut ScopeGraph,
    host: ScopeId,
    ty: &TypeIdentity,
    fallback: Property,
) {
    // The host's own declaration names the slot when it has one.
    let property = catalogue
        .get(graph.get(host).instantiable())
        .slots_with_role(Role::Singleton)
        .find(|slot| slot.declared_type() == ty)
        .map(|slot| slot.property.clone())
        .unwrap_or(fallback);

    let built = ty.built_type();
    let slot = PlacedSlot {
        property,
        role: Role::Singleton,
        instantiable: ensure_fulfilled(catalogue, built),
        scope: ensure_scope(graph, built),
        kind: BuildKind::Value,
    };
    trace!(
        singleton = %slot.property,
        host = %graph.get(host).concrete(),
        "placed singleton"
    );
    graph.place(host, slot);
}

const UNDEFINED: usize = usize::MAX;

/// Dominator tree of the scope graph below a virtual node that builds every
/// root, computed with the iterative Cooper-Harvey-Kennedy scheme.
///
/// Nodes are scope indices; the virtual root is `graph.len()`.
struct Dominators {
    virtual_root: usize,
    /// Reverse-postorder rank, `UNDEFINED` for scopes no root reaches.
    rank: Vec<usize>,
    /// Immediate dominator, `UNDEFINED` for scopes no root reaches.
    idom: Vec<usize>,
}

impl Dominators {
    fn compute(graph: &ScopeGraph, roots: &[ScopeId]) -> Self {
        let virtual_root = graph.len();
        let mut successors: Vec<Vec<usize>> = graph
            .iter()
            .map(|(_, scope)| scope.placed().iter().map(|p| p.scope.index()).collect())
            .collect();
        successors.push(roots.iter().map(|id| id.index()).collect());

        let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); virtual_root + 1];
        for (node, succs) in successors.iter().enumerate() {
            for &succ in succs {
                predecessors[succ].push(node);
            }
        }

        let postorder = postorder(&successors, virtual_root);
        let mut rank = vec![UNDEFINED; virtual_root + 1];
        for (i, &node) in postorder.iter().rev().enumerate() {
            rank[node] = i;
        }

        let mut dominators = Self {
            virtual_root,
            rank,
            idom: vec![UNDEFINED; virtual_root + 1],
        };
        dominators.idom[virtual_root] = virtual_root;

        let mut changed = true;
        while changed {
            changed = false;
            for &node in postorder.iter().rev().skip(1) {
                let mut new_idom = UNDEFINED;
                for &pred in &predecessors[node] {
                    if dominators.idom[pred] == UNDEFINED {
                        continue;
                    }
                    new_idom = if new_idom == UNDEFINED {
                        pred
                    } else {
                        dominators.intersect(pred, new_idom)
                    };
                }
                if dominators.idom[node] != new_idom {
                    dominators.idom[node] = new_idom;
                    changed = true;
                }
            }
        }
        dominators
    }

    /// Nearest common dominator of two reachable nodes.
    fn intersect(&self, mut a: usize, mut b: usize) -> usize {
        while a != b {
            while self.rank[a] > self.rank[b] {
                a = self.idom[a];
            }
            while self.rank[b] > self.rank[a] {
                b = self.idom[b];
            }
        }
        a
    }

    /// Deepest scope dominating every consumer. `None` if a consumer is
    /// unreachable or only the virtual root is shared.
    fn common_dominator(&self, consumers: &[ScopeId]) -> Option<ScopeId> {
        let mut host: Option<usize> = None;
        for consumer in consumers {
            let node = consumer.index();
            if self.idom[node] == UNDEFINED {
                return None;
            }
            host = Some(match host {
                None => node,
                Some(current) => self.intersect(current, node),
            });
        }
        host.filter(|&node| node != self.virtual_root)
            .map(|node| ScopeId::from_raw(node as u32))
    }
}

/// Postorder of the nodes reachable from `start`, children in placement order.
fn postorder(successors: &[Vec<usize>], start: usize) -> Vec<usize> {
    let mut visited = vec![false; successors.len()];
    let mut order = Vec::with_capacity(successors.len());
    let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
    visited[start] = true;

    while let Some(top) = stack.last_mut() {
        let (node, next) = *top;
        match successors[node].get(next) {
            Some(&succ) => {
                top.1 += 1;
                if !visited[succ] {
                    visited[succ] = true;
                    stack.push((succ, 0));
                }
            }
            None => {
                order.push(node);
                stack.pop();
            }
        }
    }
    order
}
