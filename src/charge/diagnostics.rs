//! Structured diagnostic records collected during a charge calculation.
//!
//! Recoverable conditions never abort the calculation and never go through
//! a global warning channel; they are returned alongside the charges so
//! callers (and tests) can assert on them deterministically.

use super::resolver::ValenceState;
use std::fmt;

/// A non-fatal condition encountered while computing charges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// A covalently bonded atom has no parameter entry for its derived
    /// valence state. Its output charge is NaN; all other atoms are
    /// unaffected.
    UnparametrizedValence {
        /// Index of the affected atom.
        atom_index: usize,
        /// The valence state that missed the table.
        state: ValenceState,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnparametrizedValence { atom_index, state } => write!(
                f,
                "no electronegativity parameters for atom {} with valence state {}; \
                 its charge is set to NaN",
                atom_index, state
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charge::resolver::Hybridization;
    use crate::model::types::Element;

    #[test]
    fn diagnostic_display_names_atom_and_state() {
        let diagnostic = Diagnostic::UnparametrizedValence {
            atom_index: 1,
            state: ValenceState {
                element: Element::S,
                degree: 1,
                hybridization: Hybridization::Sp2,
            },
        };
        let text = diagnostic.to_string();
        assert!(text.contains("atom 1"));
        assert!(text.contains("S (1 partner, sp2)"));
        assert!(text.contains("NaN"));
    }
}
