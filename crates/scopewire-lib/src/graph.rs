//! Scope arena.
//!
//! Scopes are construction sites compared by handle, never by value: two
//! structurally identical scopes are still distinct nodes. Every type an
//! instantiable fulfills (concrete type and aliases) maps to the same
//! `ScopeId`.

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use scopewire_core::{DeferredWrapper, InstantiableId, Property, Role, Slot, TypeIdentity};

/// Handle to a scope inside a [`ScopeGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(u32);

impl ScopeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// How a placed slot's value is handed to its consumer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildKind {
    /// Built eagerly when the owning scope is built.
    Value,
    /// Built on first access, then memoized.
    Lazy,
    /// The consumer gets a builder and decides when to build.
    OnDemandBuilder,
    /// Like `OnDemandBuilder`, but the builder takes caller-forwarded arguments.
    ForwardingOnDemandBuilder,
}

impl BuildKind {
    /// Build kind for a locally constructed slot. Deferred builder types win
    /// over the declared role.
    pub fn for_slot(slot: &Slot) -> Self {
        match slot.deferred_wrapper() {
            Some(DeferredWrapper::Instantiator) => Self::OnDemandBuilder,
            Some(DeferredWrapper::ForwardingInstantiator) => Self::ForwardingOnDemandBuilder,
            _ if slot.role == Role::LazyConstructed => Self::Lazy,
            _ => Self::Value,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Lazy => "lazy",
            Self::OnDemandBuilder => "on_demand_builder",
            Self::ForwardingOnDemandBuilder => "forwarding_on_demand_builder",
        }
    }
}

impl fmt::Display for BuildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decision to construct `property` inside the owning scope.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedSlot {
    pub property: Property,
    /// Role of the declaring slot: `Constructed`, `LazyConstructed` or `Singleton`.
    pub role: Role,
    /// Instantiable that builds the value.
    pub instantiable: InstantiableId,
    /// Child scope the value is built in.
    pub scope: ScopeId,
    pub kind: BuildKind,
}

/// Construction context for exactly one instantiable.
#[derive(Clone, Debug)]
pub struct Scope {
    instantiable: InstantiableId,
    concrete: TypeIdentity,
    placed: Vec<PlacedSlot>,
    passthroughs: IndexSet<Property>,
}

impl Scope {
    pub fn instantiable(&self) -> InstantiableId {
        self.instantiable
    }

    /// Concrete type of the instantiable, used as the scope's display name.
    pub fn concrete(&self) -> &TypeIdentity {
        &self.concrete
    }

    pub fn placed(&self) -> &[PlacedSlot] {
        &self.placed
    }

    /// Slots relayed to descendants without being used here.
    pub fn passthroughs(&self) -> &IndexSet<Property> {
        &self.passthroughs
    }

    pub fn placed_property(&self, property: &Property) -> Option<&PlacedSlot> {
        self.placed.iter().find(|p| &p.property == property)
    }

    /// The singleton of type `ty` placed in this scope, whatever label its
    /// consumers use.
    pub fn hosted_singleton(&self, ty: &TypeIdentity) -> Option<&PlacedSlot> {
        self.placed
            .iter()
            .find(|p| p.role == Role::Singleton && &p.property.type_identity == ty)
    }

    pub fn hosts_singleton(&self, ty: &TypeIdentity) -> bool {
        self.hosted_singleton(ty).is_some()
    }
}

/// Arena of scopes plus the type index.
#[derive(Clone, Debug, Default)]
pub struct ScopeGraph {
    scopes: Vec<Scope>,
    by_type: IndexMap<TypeIdentity, ScopeId>,
}

impl ScopeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a scope and register it under every fulfilled type.
    pub fn add_scope<'t>(
        &mut self,
        instantiable: InstantiableId,
        concrete: TypeIdentity,
        fulfilled: impl IntoIterator<Item = &'t TypeIdentity>,
    ) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            instantiable,
            concrete,
            placed: Vec::new(),
            passthroughs: IndexSet::new(),
        });
        for ty in fulfilled {
            self.by_type.insert(ty.clone(), id);
        }
        id
    }

    pub fn scope_for(&self, ty: &TypeIdentity) -> Option<ScopeId> {
        self.by_type.get(ty).copied()
    }

    /// # Panics
    /// Panics if the id was not created by this graph.
    #[inline]
    pub fn get(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub(crate) fn place(&mut self, id: ScopeId, slot: PlacedSlot) {
        self.scopes[id.index()].placed.push(slot);
    }

    /// Returns `true` if the passthrough was new.
    pub(crate) fn add_passthrough(&mut self, id: ScopeId, property: Property) -> bool {
        self.scopes[id.index()].passthroughs.insert(property)
    }

    /// Scopes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ScopeId, &Scope)> {
        self.scopes
            .iter()
            .enumerate()
            .map(|(i, scope)| (ScopeId(i as u32), scope))
    }

    /// Every registered type with its scope, in registration order.
    pub fn types(&self) -> impl Iterator<Item = (&TypeIdentity, ScopeId)> {
        self.by_type.iter().map(|(ty, &id)| (ty, id))
    }

    /// Types registered for `id`, in registration order.
    pub fn types_of(&self, id: ScopeId) -> impl Iterator<Item = &TypeIdentity> {
        self.by_type
            .iter()
            .filter(move |(_, scope)| **scope == id)
            .map(|(ty, _)| ty)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    pub fn placed_count(&self) -> usize {
        self.scopes.iter().map(|s| s.placed.len()).sum()
    }

    pub fn passthrough_count(&self) -> usize {
        self.scopes.iter().map(|s| s.passthroughs.len()).sum()
    }
}
