//! A pure Rust library for Gasteiger-Marsili (PEOE) partial atomic charges,
//! with thin orchestration of external ligand docking.
//!
//! Charges are computed by partial equalization of orbital
//! electronegativities over a bonded molecular graph: bond orders and
//! hybridizations are inferred from connectivity, each atom's valence state
//! is matched against a parameter table, and charge flows along bonds in a
//! fixed number of damped iteration steps. Unparametrized atoms come back
//! as NaN together with a structured diagnostic; monoatomic ions keep their
//! formal charge.
//!
//! # Quick Start
//!
//! ```
//! use peoe::{partial_charges, Atom, BondOrder, Element, Molecule};
//!
//! let mut methane = Molecule::new();
//! methane.atoms.push(Atom::new(Element::C, [0.0, 0.0, 0.0]));
//! for position in [
//!     [0.63, 0.63, 0.63],
//!     [-0.63, -0.63, 0.63],
//!     [-0.63, 0.63, -0.63],
//!     [0.63, -0.63, -0.63],
//! ] {
//!     methane.atoms.push(Atom::new(Element::H, position));
//! }
//! for h in 1..=4 {
//!     methane.add_bond(0, h, BondOrder::Single)?;
//! }
//!
//! let result = partial_charges(&methane)?;
//! assert!(result.diagnostics.is_empty());
//! assert!((result.charges[0] + 0.078).abs() < 1e-2);
//! # Ok::<(), peoe::Error>(())
//! ```

pub mod charge;
pub mod dock;
pub mod error;
pub mod model;

pub use charge::diagnostics::Diagnostic;
pub use charge::params::{Parameters, StateParams};
pub use charge::partial_charges;
pub use charge::resolver::{Hybridization, ValenceState};
pub use charge::solver::{ChargeResult, PartialChargeSolver, SolverOptions};
pub use error::Error;
pub use model::atom::Atom;
pub use model::molecule::{Bond, Molecule};
pub use model::types::{BondOrder, Element, ParseBondOrderError, ParseElementError};

use std::sync::OnceLock;

static DEFAULT_PARAMETERS: OnceLock<Parameters> = OnceLock::new();

/// Returns the built-in electronegativity parameter table.
///
/// Parsed once from the embedded TOML on first use; subsequent calls return
/// the cached reference.
pub fn get_default_parameters() -> &'static Parameters {
    DEFAULT_PARAMETERS.get_or_init(|| {
        const DEFAULT_PARAMS_TOML: &str = include_str!("../resources/peoe.params.toml");
        Parameters::load_from_str(DEFAULT_PARAMS_TOML)
            .expect("Failed to parse embedded default parameters. This is a library bug.")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters_are_cached() {
        let params1 = get_default_parameters();
        let params2 = get_default_parameters();
        assert_eq!(params1 as *const _, params2 as *const _);
    }

    #[test]
    fn default_parameters_cover_the_published_table() {
        let params = get_default_parameters();
        for element in [
            Element::H,
            Element::C,
            Element::N,
            Element::O,
            Element::S,
            Element::F,
            Element::Cl,
            Element::Br,
            Element::I,
        ] {
            assert!(
                params.has_element(element),
                "{element} should be parametrized"
            );
        }
        assert!(params.is_ion(Element::Na));
        assert!(!params.is_ion(Element::C));
    }
}
