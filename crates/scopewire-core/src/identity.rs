//! Canonical type identities.
//!
//! A `TypeIdentity` is the graph key for everything the resolver does. Two
//! identities are equal iff they render to the same canonical text, which
//! is also the sort key used wherever output must be deterministic.

use std::fmt;
use std::str::FromStr;

use crate::syntax::{TypeParseError, parse_type};

/// Name of the lazy wrapper: `Lazy<T>` builds `T` on first access.
pub const LAZY_WRAPPER: &str = "Lazy";
/// Name of the deferred builder wrapper: `Instantiator<T>` hands out a builder for `T`.
pub const INSTANTIATOR_WRAPPER: &str = "Instantiator";
/// Name of the forwarding builder wrapper: `ForwardingInstantiator<Args, T>`.
pub const FORWARDING_INSTANTIATOR_WRAPPER: &str = "ForwardingInstantiator";

/// Canonical identifier of a declared type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeIdentity {
    /// `Foo` or `Foo<A, B>`.
    Simple {
        name: String,
        generics: Vec<TypeIdentity>,
    },
    /// `Outer.Inner` or `Outer.Inner<A>`.
    Nested {
        parent: Box<TypeIdentity>,
        name: String,
        generics: Vec<TypeIdentity>,
    },
    /// `T?`
    Optional(Box<TypeIdentity>),
    /// `T!`
    ImplicitlyUnwrappedOptional(Box<TypeIdentity>),
    /// `[T]`
    Array(Box<TypeIdentity>),
    /// `[K: V]`
    Dictionary {
        key: Box<TypeIdentity>,
        value: Box<TypeIdentity>,
    },
    /// `(A, B)`; the empty tuple is `()`.
    Tuple(Vec<TypeIdentity>),
    /// `A & B`
    Composition(Vec<TypeIdentity>),
    /// `(A, B) async throws -> R`
    Closure {
        arguments: Vec<TypeIdentity>,
        is_async: bool,
        throws: bool,
        returns: Box<TypeIdentity>,
    },
    /// `T.Type`, or `P.Protocol` when `is_protocol` is set.
    Metatype {
        inner: Box<TypeIdentity>,
        is_protocol: bool,
    },
    /// `@escaping T`, `any P`, `some P`, `inout T`.
    Attributed {
        specifiers: Vec<String>,
        attributes: Vec<String>,
        inner: Box<TypeIdentity>,
    },
    /// Opaque text the parsing layer could not structure. Compared textually.
    Unknown(String),
}

/// Deferred wrapper recognised on a slot's declared type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeferredWrapper {
    Lazy,
    Instantiator,
    ForwardingInstantiator,
}

impl TypeIdentity {
    /// Plain nominal type without generic arguments.
    pub fn simple(name: impl Into<String>) -> Self {
        Self::Simple {
            name: name.into(),
            generics: Vec::new(),
        }
    }

    /// Nominal type applied to generic arguments.
    pub fn generic(name: impl Into<String>, generics: Vec<TypeIdentity>) -> Self {
        Self::Simple {
            name: name.into(),
            generics,
        }
    }

    /// Parse canonical type syntax.
    pub fn parse(text: &str) -> Result<Self, TypeParseError> {
        parse_type(text)
    }

    /// Parse canonical type syntax, falling back to [`TypeIdentity::Unknown`].
    pub fn parse_lenient(text: &str) -> Self {
        parse_type(text).unwrap_or_else(|_| Self::Unknown(text.trim().to_owned()))
    }

    /// Wrapper kind when this type is `Lazy<T>`, `Instantiator<T>` or
    /// `ForwardingInstantiator<Args, T>`.
    pub fn deferred_wrapper(&self) -> Option<DeferredWrapper> {
        let Self::Simple { name, generics } = self else {
            return None;
        };
        match (name.as_str(), generics.len()) {
            (LAZY_WRAPPER, 1) => Some(DeferredWrapper::Lazy),
            (INSTANTIATOR_WRAPPER, 1) => Some(DeferredWrapper::Instantiator),
            (FORWARDING_INSTANTIATOR_WRAPPER, 2) => Some(DeferredWrapper::ForwardingInstantiator),
            _ => None,
        }
    }

    /// The type actually built for a slot declared with this type.
    ///
    /// Unwraps one level of deferred wrapper; every other type builds itself.
    pub fn built_type(&self) -> &TypeIdentity {
        match self {
            Self::Simple { generics, .. } if self.deferred_wrapper().is_some() => {
                generics.last().unwrap_or(self)
            }
            _ => self,
        }
    }

    /// Canonical text, used as the deterministic sort key.
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    fn needs_parens_as_operand(&self) -> bool {
        matches!(
            self,
            Self::Composition(_) | Self::Closure { .. } | Self::Attributed { .. }
        )
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple { name, generics } => {
                f.write_str(name)?;
                write_generics(f, generics)
            }
            Self::Nested {
                parent,
                name,
                generics,
            } => {
                write_operand(f, parent)?;
                write!(f, ".{name}")?;
                write_generics(f, generics)
            }
            Self::Optional(inner) => {
                write_operand(f, inner)?;
                f.write_str("?")
            }
            Self::ImplicitlyUnwrappedOptional(inner) => {
                write_operand(f, inner)?;
                f.write_str("!")
            }
            Self::Array(element) => write!(f, "[{element}]"),
            Self::Dictionary { key, value } => write!(f, "[{key}: {value}]"),
            Self::Tuple(elements) => {
                f.write_str("(")?;
                write_list(f, elements, ", ")?;
                f.write_str(")")
            }
            Self::Composition(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" & ")?;
                    }
                    write_operand(f, part)?;
                }
                Ok(())
            }
            Self::Closure {
                arguments,
                is_async,
                throws,
                returns,
            } => {
                f.write_str("(")?;
                write_list(f, arguments, ", ")?;
                f.write_str(")")?;
                if *is_async {
                    f.write_str(" async")?;
                }
                if *throws {
                    f.write_str(" throws")?;
                }
                write!(f, " -> {returns}")
            }
            Self::Metatype { inner, is_protocol } => {
                write_operand(f, inner)?;
                f.write_str(if *is_protocol { ".Protocol" } else { ".Type" })
            }
            Self::Attributed {
                specifiers,
                attributes,
                inner,
            } => {
                for attribute in attributes {
                    write!(f, "@{attribute} ")?;
                }
                for specifier in specifiers {
                    write!(f, "{specifier} ")?;
                }
                write!(f, "{inner}")
            }
            Self::Unknown(text) => f.write_str(text),
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, ty: &TypeIdentity) -> fmt::Result {
    if ty.needs_parens_as_operand() {
        write!(f, "({ty})")
    } else {
        write!(f, "{ty}")
    }
}

fn write_generics(f: &mut fmt::Formatter<'_>, generics: &[TypeIdentity]) -> fmt::Result {
    if generics.is_empty() {
        return Ok(());
    }
    f.write_str("<")?;
    write_list(f, generics, ", ")?;
    f.write_str(">")
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[TypeIdentity], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl FromStr for TypeIdentity {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type(s)
    }
}

impl serde::Serialize for TypeIdentity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for TypeIdentity {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_type(&text).map_err(serde::de::Error::custom)
    }
}
