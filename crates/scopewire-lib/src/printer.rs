//! Builder-pattern printer for resolved plans.
//!
//! Output is one tree per true root:
//!
//! ```text
//! modules: App
//!
//! Root
//!   a: A [value]
//!     ~ x: X
//!     < x: X (received)
//!     b: B [value]
//!       < x: X (received)
//!   x: X [value, singleton]
//! ```
//!
//! `~` marks a passthrough, `<` an inherited slot. A scope already on the
//! current branch is printed once more with `(cycle)` and not expanded.

use std::fmt::Write;

use scopewire_core::{Colors, Role, Slot};

use crate::graph::{Scope, ScopeId};
use crate::resolver::Resolution;

pub struct PlanPrinter<'r> {
    resolution: &'r Resolution<'r>,
    colors: Colors,
    with_passthroughs: bool,
}

impl<'r> PlanPrinter<'r> {
    pub fn new(resolution: &'r Resolution<'r>) -> Self {
        Self {
            resolution,
            colors: Colors::OFF,
            with_passthroughs: true,
        }
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colors = Colors::new(value);
        self
    }

    pub fn colors(mut self, colors: Colors) -> Self {
        self.colors = colors;
        self
    }

    /// Show passthrough lines (on by default).
    pub fn with_passthroughs(mut self, value: bool) -> Self {
        self.with_passthroughs = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let c = self.colors;
        let modules = self.resolution.catalogue().modules();
        if !modules.is_empty() {
            writeln!(w, "{}modules: {}{}", c.dim, modules.join(", "), c.reset)?;
            writeln!(w)?;
        }

        let graph = self.resolution.graph();
        for (i, root) in self.resolution.root_scopes().enumerate() {
            if i > 0 {
                writeln!(w)?;
            }
            writeln!(w, "{}{}{}", c.blue, graph.get(root).concrete(), c.reset)?;
            let mut path = vec![root];
            self.format_scope(w, root, 1, &mut path)?;
        }
        Ok(())
    }

    fn format_scope(
        &self,
        w: &mut impl Write,
        id: ScopeId,
        depth: usize,
        path: &mut Vec<ScopeId>,
    ) -> std::fmt::Result {
        let c = self.colors;
        let scope = self.resolution.graph().get(id);
        let indent = "  ".repeat(depth);

        if self.with_passthroughs {
            for property in scope.passthroughs() {
                writeln!(w, "{indent}{}~ {property}{}", c.yellow, c.reset)?;
            }
        }

        let instantiable = self.resolution.catalogue().get(scope.instantiable());
        for slot in instantiable.slots.iter().filter(|s| is_inherited(scope, s)) {
            writeln!(
                w,
                "{indent}{}< {} ({}){}",
                c.dim, slot.property, slot.role, c.reset
            )?;
        }

        for placed in scope.placed() {
            write!(
                w,
                "{indent}{}: {}{}{} [{}{}{}",
                placed.property.label,
                c.blue,
                placed.property.type_identity,
                c.reset,
                c.green,
                placed.kind,
                c.reset
            )?;
            if placed.role == Role::Singleton {
                w.write_str(", singleton")?;
            }
            w.write_char(']')?;

            if path.contains(&placed.scope) {
                writeln!(w, " {}(cycle){}", c.dim, c.reset)?;
                continue;
            }
            writeln!(w)?;

            path.push(placed.scope);
            self.format_scope(w, placed.scope, depth + 1, path)?;
            path.pop();
        }
        Ok(())
    }
}

/// Slot whose value comes from outside the scope.
pub(crate) fn is_inherited(scope: &Scope, slot: &Slot) -> bool {
    match slot.role {
        Role::Received | Role::Forwarded => true,
        Role::Singleton => !scope.hosts_singleton(slot.declared_type()),
        Role::Constructed | Role::LazyConstructed => false,
    }
}
