//! Catalogue builders shared by tests.

use scopewire_core::{Catalogue, Instantiable, Role, TypeIdentity};

use crate::{Error, Resolution, Resolver};

pub fn ty(text: &str) -> TypeIdentity {
    TypeIdentity::parse(text).expect("fixture type is valid")
}

pub struct Entry(Instantiable);

pub fn entry(concrete: &str) -> Entry {
    Entry(Instantiable::new(ty(concrete)))
}

impl Entry {
    pub fn alias(self, alias: &str) -> Self {
        Self(self.0.with_alias(ty(alias)))
    }

    pub fn constructs(self, label: &str, type_text: &str) -> Self {
        self.slot(label, type_text, Role::Constructed)
    }

    pub fn lazy(self, label: &str, type_text: &str) -> Self {
        self.slot(label, type_text, Role::LazyConstructed)
    }

    pub fn receives(self, label: &str, type_text: &str) -> Self {
        self.slot(label, type_text, Role::Received)
    }

    pub fn forwards(self, label: &str, type_text: &str) -> Self {
        self.slot(label, type_text, Role::Forwarded)
    }

    pub fn singleton(self, label: &str, type_text: &str) -> Self {
        self.slot(label, type_text, Role::Singleton)
    }

    fn slot(self, label: &str, type_text: &str, role: Role) -> Self {
        Self(self.0.with_slot(label, ty(type_text), role))
    }
}

pub fn catalogue(entries: impl IntoIterator<Item = Entry>) -> Catalogue {
    Catalogue::from_instantiables(entries.into_iter().map(|e| e.0))
        .expect("fixture catalogue has no duplicates")
}

pub fn resolve(catalogue: &Catalogue) -> Resolution<'_> {
    match Resolver::new(catalogue).resolve() {
        Ok(resolution) => resolution,
        Err(err) => panic!("expected resolution to succeed: {err}"),
    }
}

pub fn resolve_err(catalogue: &Catalogue) -> Error {
    match Resolver::new(catalogue).resolve() {
        Ok(_) => panic!("expected resolution to fail"),
        Err(err) => err,
    }
}

/// Root `R` builds `A` and hosts singleton `X`; `A` and `B` both receive `X`.
pub fn scenario_a() -> Catalogue {
    catalogue([
        entry("R").constructs("a", "A").singleton("x", "X"),
        entry("A").receives("x", "X").constructs("b", "B"),
        entry("B").receives("x", "X"),
        entry("X"),
    ])
}
