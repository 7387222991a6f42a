//! Serializable plan for downstream emitters.

use scopewire_core::{Property, Role, TypeIdentity};
use serde::{Deserialize, Serialize};

use crate::graph::BuildKind;
use crate::printer::is_inherited;
use crate::resolver::Resolution;

/// A resolved plan: every scope sorted by canonical type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<String>,
    pub roots: Vec<TypeIdentity>,
    pub scopes: Vec<PlanScope>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanScope {
    #[serde(rename = "type")]
    pub type_identity: TypeIdentity,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<TypeIdentity>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub placed: Vec<PlanSlot>,
    /// Received slots and singletons hosted by an ancestor.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub received: Vec<Property>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub forwarded: Vec<Property>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub passthroughs: Vec<Property>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSlot {
    pub label: String,
    #[serde(rename = "type")]
    pub type_identity: TypeIdentity,
    pub role: Role,
    pub kind: BuildKind,
    /// Concrete type of the scope that builds the value.
    pub scope: TypeIdentity,
}

impl Plan {
    pub fn from_resolution(resolution: &Resolution<'_>) -> Self {
        let graph = resolution.graph();
        let catalogue = resolution.catalogue();

        let mut scopes: Vec<PlanScope> = graph
            .iter()
            .map(|(id, scope)| {
                let instantiable = catalogue.get(scope.instantiable());
                let inherited = |role: Role| {
                    instantiable
                        .slots
                        .iter()
                        .filter(move |slot| slot.role == role && is_inherited(scope, slot))
                        .map(|slot| slot.property.clone())
                };

                let mut received: Vec<Property> = inherited(Role::Received).collect();
                received.extend(inherited(Role::Singleton));

                PlanScope {
                    type_identity: scope.concrete().clone(),
                    aliases: graph
                        .types_of(id)
                        .filter(|ty| *ty != scope.concrete())
                        .cloned()
                        .collect(),
                    placed: scope
                        .placed()
                        .iter()
                        .map(|placed| PlanSlot {
                            label: placed.property.label.clone(),
                            type_identity: placed.property.type_identity.clone(),
                            role: placed.role,
                            kind: placed.kind,
                            scope: graph.get(placed.scope).concrete().clone(),
                        })
                        .collect(),
                    received,
                    forwarded: inherited(Role::Forwarded).collect(),
                    passthroughs: scope.passthroughs().iter().cloned().collect(),
                }
            })
            .collect();
        scopes.sort_by_cached_key(|scope| scope.type_identity.canonical());

        Self {
            modules: catalogue.modules().to_vec(),
            roots: resolution.roots().to_vec(),
            scopes,
        }
    }

    /// Serialize as JSON, pretty unless `compact`.
    pub fn to_json(&self, compact: bool) -> serde_json::Result<String> {
        if compact {
            serde_json::to_string(self)
        } else {
            serde_json::to_string_pretty(self)
        }
    }

    pub fn scope(&self, ty: &TypeIdentity) -> Option<&PlanScope> {
        self.scopes.iter().find(|scope| &scope.type_identity == ty)
    }
}
