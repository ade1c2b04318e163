//! Error types for molecule construction and charge calculation.
//!
//! Structural problems (malformed topology, mismatched input lengths) are
//! fail-fast errors defined here. Unparametrized valence states are *not*
//! errors: they surface as [`Diagnostic`](crate::Diagnostic) records in the
//! calculation result while the rest of the molecule proceeds.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building a molecule or computing charges.
#[derive(Debug, Error)]
pub enum Error {
    /// A bond references an atom index outside the molecule.
    #[error("invalid bond between atoms {i} and {j}: {detail}")]
    InvalidBond {
        /// First atom index.
        i: usize,
        /// Second atom index.
        j: usize,
        /// Description of the problem.
        detail: String,
    },

    /// A bond connects an atom to itself.
    #[error("atom {0} cannot bond to itself")]
    SelfBond(usize),

    /// A pair of atoms was bonded twice. The second insertion is rejected.
    #[error("atoms {i} and {j} are already bonded")]
    DuplicateBond {
        /// Lower atom index of the normalized pair.
        i: usize,
        /// Higher atom index of the normalized pair.
        j: usize,
    },

    /// A formal-charge override did not match the molecule's atom count.
    #[error("formal charge array length {actual} does not match atom count {expected}")]
    FormalChargeLength {
        /// The molecule's atom count.
        expected: usize,
        /// The length of the supplied array.
        actual: usize,
    },

    /// The input molecule contains no atoms.
    #[error("input molecule is empty: at least one atom is required")]
    EmptyMolecule,

    /// Failed to parse an electronegativity parameter TOML.
    #[error("failed to parse electronegativity parameters: {0}")]
    ParameterParse(#[from] toml::de::Error),

    /// Failed to read a parameter file.
    #[error("I/O error at path '{path}': {source}")]
    Io {
        /// The path of the file that caused the I/O error.
        path: PathBuf,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Creates an [`InvalidBond`](Error::InvalidBond) error.
    pub fn invalid_bond(i: usize, j: usize, details: impl Into<String>) -> Self {
        Self::InvalidBond {
            i,
            j,
            detail: details.into(),
        }
    }
}
