//! The iterative charge equilibration procedure.
//!
//! Partial equalization of orbital electronegativities (PEOE): starting from
//! the formal charges, a fixed number of damped steps transfers charge along
//! every bond from the less to the more electronegative atom. There is no
//! convergence check; the historically validated step count of 6 is the
//! termination condition. Deltas within a step accumulate against a frozen
//! electronegativity snapshot and apply at once, so the result is
//! bit-identical for any bond enumeration order.

use super::diagnostics::Diagnostic;
use super::params::{Parameters, StateParams};
use super::resolver;
use crate::error::Error;
use crate::model::molecule::Molecule;
use crate::model::types::Element;

/// χ⁺ substituted for hydrogen in the transfer normalization.
///
/// Hydrogen's table value of a + b + c would be 12.85; the original
/// publication instead fixes 20.02 to account for hydrogen's lack of inner
/// shells.
const HYDROGEN_CATION_ELECTRONEGATIVITY: f64 = 20.02;

/// Configuration for the charge iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverOptions {
    /// Number of equilibration steps to run.
    ///
    /// The damping factor halves at every step, so later steps contribute
    /// exponentially less. The default of 6 matches the original
    /// publication; the algorithm is deliberately not run to full
    /// convergence.
    pub iteration_steps: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self { iteration_steps: 6 }
    }
}

/// The outcome of a charge calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChargeResult {
    /// One partial charge per atom, in input atom order. NaN marks atoms
    /// whose valence state is unparametrized.
    pub charges: Vec<f64>,
    /// Diagnostics collected during the calculation, in atom order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Computes Gasteiger-Marsili partial charges over a molecular graph.
///
/// The solver borrows an immutable parameter table and is itself stateless:
/// solving is a pure function of the molecule's topology and formal charges,
/// safe to invoke concurrently for independent molecules.
pub struct PartialChargeSolver<'p> {
    parameters: &'p Parameters,
    options: SolverOptions,
}

impl<'p> PartialChargeSolver<'p> {
    pub fn new(parameters: &'p Parameters) -> Self {
        Self {
            parameters,
            options: SolverOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SolverOptions) -> Self {
        self.options = options;
        self
    }

    /// Computes partial charges using the formal charges stored on the
    /// molecule's atoms.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMolecule`] for a molecule without atoms.
    pub fn solve(&self, molecule: &Molecule) -> Result<ChargeResult, Error> {
        let formal_charges = molecule.formal_charges();
        self.solve_with_formal_charges(molecule, &formal_charges)
    }

    /// Computes partial charges with an explicit formal-charge override.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FormalChargeLength`] if the override length does
    /// not match the atom count, and [`Error::EmptyMolecule`] for a
    /// molecule without atoms.
    pub fn solve_with_formal_charges(
        &self,
        molecule: &Molecule,
        formal_charges: &[i32],
    ) -> Result<ChargeResult, Error> {
        let n_atoms = molecule.atom_count();
        if n_atoms == 0 {
            return Err(Error::EmptyMolecule);
        }
        if formal_charges.len() != n_atoms {
            return Err(Error::FormalChargeLength {
                expected: n_atoms,
                actual: formal_charges.len(),
            });
        }

        let resolved = resolver::resolve(molecule);

        let mut diagnostics = Vec::new();
        let mut is_ion = vec![false; n_atoms];
        let mut entries: Vec<Option<&StateParams>> = Vec::with_capacity(n_atoms);
        for (i, state) in resolved.states.iter().enumerate() {
            if self.parameters.is_ion(state.element) {
                is_ion[i] = true;
                entries.push(None);
                continue;
            }
            let entry = self.parameters.lookup(state);
            if entry.is_none() {
                diagnostics.push(Diagnostic::UnparametrizedValence {
                    atom_index: i,
                    state: *state,
                });
            }
            entries.push(entry);
        }

        let mut charges: Vec<f64> = formal_charges.iter().map(|&q| q as f64).collect();
        self.iterate(molecule, &entries, &mut charges);

        // Ions keep their formal charge untouched; unparametrized covalent
        // atoms come out as NaN.
        for i in 0..n_atoms {
            if !is_ion[i] && entries[i].is_none() {
                charges[i] = f64::NAN;
            }
        }

        Ok(ChargeResult {
            charges,
            diagnostics,
        })
    }

    /// Runs the fixed-step damped equilibration over all parametrized atoms.
    ///
    /// Bonds touching an atom without an entry (ion or unparametrized) are
    /// skipped entirely so no NaN can leak into a neighbor's charge.
    fn iterate(
        &self,
        molecule: &Molecule,
        entries: &[Option<&StateParams>],
        charges: &mut [f64],
    ) {
        let n_atoms = charges.len();

        let cation_en: Vec<f64> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| match entry {
                Some(_) if molecule.atoms[i].element == Element::H => {
                    HYDROGEN_CATION_ELECTRONEGATIVITY
                }
                Some(entry) => entry.cation_electronegativity(),
                None => f64::NAN,
            })
            .collect();

        let mut en = vec![0.0; n_atoms];
        let mut deltas = vec![0.0; n_atoms];
        let mut damping = 1.0;

        for _ in 0..self.options.iteration_steps {
            damping *= 0.5;

            // Frozen snapshot for this step
            for i in 0..n_atoms {
                if let Some(entry) = entries[i] {
                    en[i] = entry.electronegativity(charges[i]);
                }
            }
            deltas.fill(0.0);

            for bond in molecule.bonds() {
                let (i, j) = (bond.i, bond.j);
                if entries[i].is_none() || entries[j].is_none() {
                    continue;
                }
                // Normalize by χ⁺ of the less electronegative endpoint
                let divisor = if en[j] > en[i] {
                    cation_en[i]
                } else {
                    cation_en[j]
                };
                let transfer = (en[j] - en[i]) / divisor * damping;
                deltas[i] += transfer;
                deltas[j] -= transfer;
            }

            // Synchronous application of the whole step
            for i in 0..n_atoms {
                charges[i] += deltas[i];
            }
        }
    }
}
