//! Reachability analysis: which types can be built, and from which roots.

use indexmap::IndexSet;
use scopewire_core::{Catalogue, TypeIdentity, sort_canonical};
use tracing::debug;

use super::invariants::ensure_fulfilled;
use crate::{Error, Result};

/// Output of [`analyze_reachability`].
#[derive(Debug, Clone)]
pub struct Reachability {
    /// Concrete types of instantiables with only constructive slots, sorted.
    pub possible_roots: Vec<TypeIdentity>,
    /// Every type reached over constructive edges, sorted.
    pub reachable: Vec<TypeIdentity>,
    /// Concrete types built by some reachable instantiable.
    pub child_types: IndexSet<TypeIdentity>,
    /// Possible roots nothing else builds, sorted.
    pub roots: Vec<TypeIdentity>,
}

pub fn analyze_reachability(catalogue: &Catalogue) -> Result<Reachability> {
    let mut possible_roots: Vec<TypeIdentity> = catalogue
        .iter()
        .filter(|(_, inst)| inst.is_possible_root())
        .map(|(_, inst)| inst.concrete.clone())
        .collect();
    sort_canonical(&mut possible_roots);

    let mut visited: IndexSet<TypeIdentity> = IndexSet::new();
    let mut stack: Vec<TypeIdentity> = possible_roots.iter().rev().cloned().collect();

    while let Some(ty) = stack.pop() {
        if visited.contains(&ty) {
            continue;
        }
        let Some(instantiable) = catalogue.instantiable_for(&ty) else {
            return Err(Error::NoInstantiableFound(ty));
        };
        visited.insert(ty);

        // Reverse so the first declared slot is explored first.
        let targets: Vec<&TypeIdentity> = instantiable
            .constructive_slots()
            .map(|slot| slot.built_type())
            .collect();
        stack.extend(targets.into_iter().rev().cloned());
    }

    let mut child_types = IndexSet::new();
    for ty in &visited {
        let instantiable = catalogue.get(ensure_fulfilled(catalogue, ty));
        for slot in instantiable.constructive_slots() {
            let child = catalogue.get(ensure_fulfilled(catalogue, slot.built_type()));
            child_types.insert(child.concrete.clone());
        }
    }

    let roots: Vec<TypeIdentity> = possible_roots
        .iter()
        .filter(|ty| !child_types.contains(*ty))
        .cloned()
        .collect();

    let mut reachable: Vec<TypeIdentity> = visited.into_iter().collect();
    sort_canonical(&mut reachable);

    debug!(
        possible_roots = possible_roots.len(),
        reachable = reachable.len(),
        roots = roots.len(),
        "analyzed reachability"
    );

    if roots.is_empty() {
        return Err(Error::NoRootFound);
    }

    Ok(Reachability {
        possible_roots,
        reachable,
        child_types,
        roots,
    })
}
