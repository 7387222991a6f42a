//! Dependency slots and their supply roles.

use std::fmt;

use crate::identity::{DeferredWrapper, TypeIdentity};

/// How a slot's value is supplied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Built eagerly and owned by the declaring scope.
    Constructed,
    /// Built on first access and memoized.
    LazyConstructed,
    /// Supplied by some ancestor.
    Received,
    /// Supplied by the immediate caller at construction time.
    Forwarded,
    /// Shared; built at most once per tree.
    Singleton,
}

impl Role {
    /// Roles whose value is built somewhere inside the tree.
    pub fn is_constructive(self) -> bool {
        matches!(
            self,
            Self::Constructed | Self::LazyConstructed | Self::Singleton
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Constructed => "constructed",
            Self::LazyConstructed => "lazy_constructed",
            Self::Received => "received",
            Self::Forwarded => "forwarded",
            Self::Singleton => "singleton",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A labelled dependency: the key used to match suppliers with consumers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Property {
    pub label: String,
    #[serde(rename = "type")]
    pub type_identity: TypeIdentity,
}

impl Property {
    pub fn new(label: impl Into<String>, type_identity: TypeIdentity) -> Self {
        Self {
            label: label.into(),
            type_identity,
        }
    }

    /// Deterministic ordering key: canonical type text, then label.
    pub fn sort_key(&self) -> (String, String) {
        (self.type_identity.canonical(), self.label.clone())
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.type_identity)
    }
}

/// One named dependency position on an instantiable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slot {
    pub property: Property,
    pub role: Role,
}

impl Slot {
    pub fn new(label: impl Into<String>, type_identity: TypeIdentity, role: Role) -> Self {
        Self {
            property: Property::new(label, type_identity),
            role,
        }
    }

    pub fn label(&self) -> &str {
        &self.property.label
    }

    pub fn declared_type(&self) -> &TypeIdentity {
        &self.property.type_identity
    }

    /// The type built to fill this slot (deferred wrappers unwrapped).
    pub fn built_type(&self) -> &TypeIdentity {
        self.property.type_identity.built_type()
    }

    pub fn deferred_wrapper(&self) -> Option<DeferredWrapper> {
        self.property.type_identity.deferred_wrapper()
    }

    pub fn is_constructive(&self) -> bool {
        self.role.is_constructive()
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.property, self.role)
    }
}
