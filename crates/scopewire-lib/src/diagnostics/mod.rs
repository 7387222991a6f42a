//! Diagnostics: the rendered form of resolution errors.
//!
//! Batched errors fan out into one message per violation, so a single run
//! reports every unplaceable singleton and every unfulfillable property.

mod message;
mod printer;


use scopewire_core::CatalogueError;

pub use message::{DiagnosticKind, DiagnosticMessage};
pub use printer::DiagnosticsPrinter;

use crate::Error;

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    messages: Vec<DiagnosticMessage>,
}

#[must_use = "diagnostic not emitted, call .emit()"]
pub struct DiagnosticBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
    message: DiagnosticMessage,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    /// Create a diagnostic with the given kind.
    ///
    /// Uses the kind's default message. Call `.message()` on the builder to override.
    pub fn report(&mut self, kind: DiagnosticKind) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder {
            diagnostics: self,
            message: DiagnosticMessage::with_default_message(kind),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiagnosticMessage> {
        self.messages.iter()
    }

    pub fn kinds(&self) -> impl Iterator<Item = DiagnosticKind> + '_ {
        self.messages.iter().map(|m| m.kind)
    }

    pub fn printer(&self) -> DiagnosticsPrinter<'_> {
        DiagnosticsPrinter::new(self)
    }

    pub fn render(&self) -> String {
        self.printer().render()
    }

    pub fn render_colored(&self, colored: bool) -> String {
        self.printer().colored(colored).render()
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
    }
}

impl<'a> DiagnosticBuilder<'a> {
    /// Provide custom detail for this diagnostic, rendered using the kind's template.
    pub fn message(mut self, detail: impl Into<String>) -> Self {
        let detail = detail.into();
        self.message.message = self.message.kind.message(Some(&detail));
        self
    }

    pub fn related(mut self, msg: impl Into<String>) -> Self {
        self.message.related.push(msg.into());
        self
    }

    pub fn hint(mut self, msg: impl Into<String>) -> Self {
        self.message.hints.push(msg.into());
        self
    }

    pub fn emit(self) {
        self.diagnostics.messages.push(self.message);
    }
}

impl From<&Error> for Diagnostics {
    fn from(error: &Error) -> Self {
        let mut diagnostics = Diagnostics::new();
        match error {
            Error::NoInstantiableFound(ty) => {
                diagnostics
                    .report(DiagnosticKind::NoInstantiableFound)
                    .message(ty.to_string())
                    .emit();
            }
            Error::NoRootFound => {
                diagnostics.report(DiagnosticKind::NoRootFound).emit();
            }
            Error::UnsatisfiableSingletons { properties, roots } => {
                let roots = roots
                    .iter()
                    .map(|ty| format!("`{ty}`"))
                    .collect::<Vec<_>>()
                    .join(", ");
                for property in properties {
                    diagnostics
                        .report(DiagnosticKind::UnsatisfiableSingleton)
                        .message(property.to_string())
                        .related(format!("roots: {roots}"))
                        .emit();
                }
            }
            Error::UnfulfillableProperties(failures) => {
                for failure in failures {
                    let mut builder = diagnostics
                        .report(DiagnosticKind::UnfulfillableProperty)
                        .message(failure.property.to_string())
                        .related(format!("required by `{}`", failure.instantiable));
                    if !failure.ancestor_chain.is_empty() {
                        let chain = failure
                            .ancestor_chain
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(" -> ");
                        builder = builder.related(format!("ancestors: {chain}"));
                    }
                    builder.emit();
                }
            }
        }
        diagnostics
    }
}

impl From<&CatalogueError> for Diagnostics {
    fn from(error: &CatalogueError) -> Self {
        let mut diagnostics = Diagnostics::new();
        match error {
            CatalogueError::DuplicateFulfillment {
                type_identity,
                existing,
                duplicate,
            } => {
                diagnostics
                    .report(DiagnosticKind::DuplicateFulfillment)
                    .message(type_identity.to_string())
                    .related(format!("first fulfilled by `{existing}`"))
                    .related(format!("again by `{duplicate}`"))
                    .emit();
            }
        }
        diagnostics
    }
}
