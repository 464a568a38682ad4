//! Strongly-typed identifiers used across the planner.
//!
//! Downstream crates (planner, stats, cli) should *not* use raw integers for IDs.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! new_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Ord, PartialOrd,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(v: u64) -> Self {
                Self(v)
            }
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

new_id!(ElementId);
new_id!(ScopeId);

/// Per-session id counter for elements and scopes.
///
/// Planning is single-threaded, so this is a plain counter rather than an
/// atomic. Element and scope ids share one sequence, which keeps debug output
/// unambiguous.
#[derive(Debug, Clone)]
pub struct IdGen {
    next: u64,
}

impl IdGen {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }

    pub fn element(&mut self) -> ElementId {
        ElementId::new(self.bump())
    }

    pub fn scope(&mut self) -> ScopeId {
        ScopeId::new(self.bump())
    }

    fn bump(&mut self) -> u64 {
        let v = self.next;
        self.next += 1;
        v
    }
}

impl Default for IdGen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_share_one_sequence() {
        let mut ids = IdGen::new();
        assert_eq!(ids.element(), ElementId::new(1));
        assert_eq!(ids.scope(), ScopeId::new(2));
        assert_eq!(ids.element(), ElementId::new(3));
    }

    #[test]
    fn display_names_the_id_type() {
        assert_eq!(ElementId::new(7).to_string(), "ElementId(7)");
        assert_eq!(ScopeId::new(9).to_string(), "ScopeId(9)");
    }
}
