use std::fmt;

/// Diagnostic kinds, one per user-facing failure.
///
/// Ordered by pipeline stage: catalogue merging first, inheritance last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Catalogue assembly
    DuplicateFulfillment,

    // Reachability
    NoInstantiableFound,
    NoRootFound,

    // Placement
    UnsatisfiableSingleton,
    UnfulfillableProperty,
}

impl DiagnosticKind {
    /// Default hint for this kind, automatically included in diagnostics.
    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::DuplicateFulfillment => {
                Some("each type may be fulfilled by a single instantiable")
            }
            Self::NoInstantiableFound => Some("declare an instantiable or alias for this type"),
            Self::NoRootFound => Some(
                "a root has only constructed, lazy or singleton slots and is built by nothing else",
            ),
            Self::UnsatisfiableSingleton => {
                Some("every consumer of a singleton must share one ancestor scope")
            }
            Self::UnfulfillableProperty => {
                Some("construct or forward this property in an ancestor scope")
            }
        }
    }

    /// Base message for this diagnostic kind, used when no custom message is provided.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::DuplicateFulfillment => "type is fulfilled more than once",
            Self::NoInstantiableFound => "no instantiable found",
            Self::NoRootFound => "no root found",
            Self::UnsatisfiableSingleton => "singleton has no common ancestor",
            Self::UnfulfillableProperty => "property is not supplied by any ancestor",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::DuplicateFulfillment => "`{}` is fulfilled more than once".to_string(),
            Self::NoInstantiableFound => "no instantiable found for `{}`".to_string(),
            Self::UnsatisfiableSingleton => "singleton `{}` has no common ancestor".to_string(),
            Self::UnfulfillableProperty => "`{}` is not supplied by any ancestor".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// Render the final message.
    ///
    /// - `None` → returns `fallback_message()`
    /// - `Some(detail)` → returns `custom_message()` with `{}` replaced by detail
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    pub(crate) message: String,
    /// Context rendered as notes under the title.
    pub(crate) related: Vec<String>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn with_default_message(kind: DiagnosticKind) -> Self {
        Self {
            kind,
            message: kind.fallback_message().to_string(),
            related: Vec::new(),
            hints: kind.default_hint().map(str::to_string).into_iter().collect(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn related(&self) -> &[String] {
        &self.related
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }
}

impl fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error: {}", self.message)?;
        for related in &self.related {
            write!(f, " (note: {related})")?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}
