//! Pipeline facade.
//!
//! ```text
//! Catalogue ─► reachability ─► scopes ─► singletons ─► inheritance ─► Resolution
//! ```
//!
//! Resolution is all-or-nothing: any error drops the partially built graph.

use scopewire_core::{Catalogue, TypeIdentity};
use tracing::{debug, info};

use crate::Result;
use crate::analyze::{
    analyze_reachability, build_scopes, place_singletons, propagate_inheritance,
};
use crate::graph::{Scope, ScopeGraph, ScopeId};
use crate::plan::Plan;
use crate::printer::PlanPrinter;

/// Entry point for resolving a catalogue.
pub struct Resolver<'c> {
    catalogue: &'c Catalogue,
}

impl<'c> Resolver<'c> {
    pub fn new(catalogue: &'c Catalogue) -> Self {
        Self { catalogue }
    }

    /// Run every pass in order.
    pub fn resolve(self) -> Result<Resolution<'c>> {
        let catalogue = self.catalogue;
        debug!(instantiables = catalogue.len(), "resolving catalogue");

        let reachability = analyze_reachability(catalogue)?;
        let mut graph = build_scopes(catalogue, &reachability.reachable);
        place_singletons(catalogue, &mut graph, &reachability.roots)?;
        propagate_inheritance(catalogue, &mut graph, &reachability.roots)?;

        info!(
            roots = reachability.roots.len(),
            scopes = graph.len(),
            "resolved catalogue"
        );

        Ok(Resolution {
            catalogue,
            reachable: reachability.reachable,
            roots: reachability.roots,
            graph,
        })
    }
}

/// A fully placed and validated scope graph.
#[derive(Debug)]
pub struct Resolution<'c> {
    catalogue: &'c Catalogue,
    reachable: Vec<TypeIdentity>,
    roots: Vec<TypeIdentity>,
    graph: ScopeGraph,
}

impl<'c> Resolution<'c> {
    pub fn catalogue(&self) -> &'c Catalogue {
        self.catalogue
    }

    /// True roots in canonical order.
    pub fn roots(&self) -> &[TypeIdentity] {
        &self.roots
    }

    /// Reachable types in canonical order.
    pub fn reachable(&self) -> &[TypeIdentity] {
        &self.reachable
    }

    pub fn graph(&self) -> &ScopeGraph {
        &self.graph
    }

    pub fn scope_for(&self, ty: &TypeIdentity) -> Option<ScopeId> {
        self.graph.scope_for(ty)
    }

    /// Scope registered for `ty`, dereferenced.
    pub fn scope(&self, ty: &TypeIdentity) -> Option<&Scope> {
        self.scope_for(ty).map(|id| self.graph.get(id))
    }

    pub fn root_scopes(&self) -> impl Iterator<Item = ScopeId> + '_ {
        self.roots.iter().filter_map(|ty| self.graph.scope_for(ty))
    }

    pub fn printer(&self) -> PlanPrinter<'_> {
        PlanPrinter::new(self)
    }

    pub fn to_plan(&self) -> Plan {
        Plan::from_resolution(self)
    }
}
