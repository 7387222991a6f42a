//! Type catalogue: every instantiable the resolver may construct.
//!
//! Instantiables are stored in an arena and addressed by `InstantiableId`.
//! Each fulfilled type (concrete type and aliases) maps to exactly one
//! instantiable; a second claim on the same type is rejected at insert time.

use indexmap::IndexMap;

use crate::identity::TypeIdentity;
use crate::slot::{Role, Slot};

/// Handle to an instantiable inside a [`Catalogue`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstantiableId(u32);

impl InstantiableId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }
}

/// One catalogue entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instantiable {
    /// The type actually built.
    pub concrete: TypeIdentity,
    /// Additional types this instantiable fulfills.
    pub aliases: Vec<TypeIdentity>,
    pub slots: Vec<Slot>,
}

impl Instantiable {
    pub fn new(concrete: TypeIdentity) -> Self {
        Self {
            concrete,
            aliases: Vec::new(),
            slots: Vec::new(),
        }
    }

    pub fn with_alias(mut self, alias: TypeIdentity) -> Self {
        self.aliases.push(alias);
        self
    }

    pub fn with_slot(mut self, label: &str, type_identity: TypeIdentity, role: Role) -> Self {
        self.slots.push(Slot::new(label, type_identity, role));
        self
    }

    /// Concrete type followed by aliases, without repeats.
    pub fn fulfilled_types(&self) -> impl Iterator<Item = &TypeIdentity> {
        let mut seen: Vec<&TypeIdentity> = Vec::with_capacity(self.aliases.len() + 1);
        std::iter::once(&self.concrete)
            .chain(self.aliases.iter())
            .filter(move |ty| {
                if seen.contains(ty) {
                    return false;
                }
                seen.push(*ty);
                true
            })
    }

    pub fn slots_with_role(&self, role: Role) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(move |slot| slot.role == role)
    }

    pub fn constructive_slots(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|slot| slot.is_constructive())
    }

    /// Needs nothing from an enclosing scope: every slot is constructive.
    pub fn is_possible_root(&self) -> bool {
        self.slots.iter().all(Slot::is_constructive)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogueError {
    #[error("`{type_identity}` is fulfilled by both `{existing}` and `{duplicate}`")]
    DuplicateFulfillment {
        type_identity: TypeIdentity,
        existing: TypeIdentity,
        duplicate: TypeIdentity,
    },
}

/// Immutable-after-construction map from type identity to its instantiable.
#[derive(Clone, Debug, Default)]
pub struct Catalogue {
    instantiables: Vec<Instantiable>,
    fulfilling: IndexMap<TypeIdentity, InstantiableId>,
    modules: Vec<String>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_instantiables(
        instantiables: impl IntoIterator<Item = Instantiable>,
    ) -> Result<Self, CatalogueError> {
        let mut catalogue = Self::new();
        for instantiable in instantiables {
            catalogue.insert(instantiable)?;
        }
        Ok(catalogue)
    }

    /// Add an instantiable, rejecting it if any fulfilled type is already claimed.
    pub fn insert(&mut self, instantiable: Instantiable) -> Result<InstantiableId, CatalogueError> {
        for ty in instantiable.fulfilled_types() {
            if let Some(&existing) = self.fulfilling.get(ty) {
                return Err(CatalogueError::DuplicateFulfillment {
                    type_identity: ty.clone(),
                    existing: self.get(existing).concrete.clone(),
                    duplicate: instantiable.concrete.clone(),
                });
            }
        }

        let id = InstantiableId(self.instantiables.len() as u32);
        for ty in instantiable.fulfilled_types() {
            self.fulfilling.insert(ty.clone(), id);
        }
        self.instantiables.push(instantiable);
        Ok(id)
    }

    /// Fold another catalogue into this one with the same duplicate check.
    pub fn merge(&mut self, other: Catalogue) -> Result<(), CatalogueError> {
        for instantiable in other.instantiables {
            self.insert(instantiable)?;
        }
        for module in other.modules {
            self.add_module(module);
        }
        Ok(())
    }

    /// Record a module name for plan headers. Kept sorted and unique.
    pub fn add_module(&mut self, module: impl Into<String>) {
        let module = module.into();
        if let Err(pos) = self.modules.binary_search(&module) {
            self.modules.insert(pos, module);
        }
    }

    pub fn modules(&self) -> &[String] {
        &self.modules
    }

    /// # Panics
    /// Panics if the id was not created by this catalogue.
    #[inline]
    pub fn get(&self, id: InstantiableId) -> &Instantiable {
        &self.instantiables[id.index()]
    }

    /// The instantiable fulfilling `ty`, if any.
    pub fn fulfilling(&self, ty: &TypeIdentity) -> Option<InstantiableId> {
        self.fulfilling.get(ty).copied()
    }

    pub fn instantiable_for(&self, ty: &TypeIdentity) -> Option<&Instantiable> {
        self.fulfilling(ty).map(|id| self.get(id))
    }

    pub fn contains(&self, ty: &TypeIdentity) -> bool {
        self.fulfilling.contains_key(ty)
    }

    /// Instantiables in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (InstantiableId, &Instantiable)> {
        self.instantiables
            .iter()
            .enumerate()
            .map(|(i, inst)| (InstantiableId(i as u32), inst))
    }

    pub fn len(&self) -> usize {
        self.instantiables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instantiables.is_empty()
    }
}
