//! Gasteiger-Marsili partial charge assignment.
//!
//! The pipeline runs in three stages: bond orders and hybridizations are
//! resolved from the molecular graph ([`resolver`]), each atom's valence
//! state is matched against the electronegativity table ([`params`]), and
//! charge is equilibrated iteratively across all parametrized bonds
//! ([`solver`]).

pub mod diagnostics;
pub mod params;
pub mod resolver;
pub mod solver;

use crate::error::Error;
use crate::model::molecule::Molecule;

use solver::{ChargeResult, PartialChargeSolver};

/// Computes Gasteiger-Marsili partial charges with the built-in parameter
/// table and default options.
///
/// Equivalent to building a [`PartialChargeSolver`] over
/// [`crate::get_default_parameters`] and calling
/// [`PartialChargeSolver::solve`].
///
/// # Errors
///
/// Returns [`Error::EmptyMolecule`] for a molecule without atoms.
pub fn partial_charges(molecule: &Molecule) -> Result<ChargeResult, Error> {
    PartialChargeSolver::new(crate::get_default_parameters()).solve(molecule)
}
