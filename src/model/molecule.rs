use super::atom::Atom;
use super::types::BondOrder;
use crate::error::Error;

/// An undirected bond between two atom indices, tagged with a bond order.
///
/// The index pair is normalized so that `i <= j`; two `Bond`s over the same
/// pair compare equal regardless of construction order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
    pub order: BondOrder,
}

impl Bond {
    pub fn new(idx1: usize, idx2: usize, order: BondOrder) -> Self {
        if idx1 <= idx2 {
            Self { i: idx1, j: idx2, order }
        } else {
            Self { i: idx2, j: idx1, order }
        }
    }
}

/// A bonded atom collection: an ordered atom sequence plus a bond set.
///
/// Atom index is identity. The bond set upholds three invariants: every
/// bond references in-range atom indices, no atom bonds to itself, and a
/// pair of atoms carries at most one bond (a second insertion is rejected,
/// not merged).
#[derive(Debug, Clone, Default)]
pub struct Molecule {
    pub atoms: Vec<Atom>,
    bonds: Vec<Bond>,
}

impl Molecule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a molecule from already-collected parts, validating every bond
    /// against the same invariants as [`add_bond`](Self::add_bond).
    pub fn from_parts(atoms: Vec<Atom>, bonds: Vec<Bond>) -> Result<Self, Error> {
        let mut molecule = Self {
            atoms,
            bonds: Vec::with_capacity(bonds.len()),
        };
        for bond in bonds {
            molecule.add_bond(bond.i, bond.j, bond.order)?;
        }
        Ok(molecule)
    }

    /// Inserts a bond between atoms `i` and `j`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBond`] for an out-of-range index,
    /// [`Error::SelfBond`] if `i == j`, and [`Error::DuplicateBond`] if the
    /// pair is already bonded (regardless of order).
    pub fn add_bond(&mut self, i: usize, j: usize, order: BondOrder) -> Result<(), Error> {
        let n_atoms = self.atoms.len();
        if i >= n_atoms || j >= n_atoms {
            return Err(Error::invalid_bond(
                i,
                j,
                format!("atom index out of bounds (n_atoms = {})", n_atoms),
            ));
        }
        if i == j {
            return Err(Error::SelfBond(i));
        }
        let bond = Bond::new(i, j, order);
        if self
            .bonds
            .iter()
            .any(|b| b.i == bond.i && b.j == bond.j)
        {
            return Err(Error::DuplicateBond { i: bond.i, j: bond.j });
        }
        self.bonds.push(bond);
        Ok(())
    }

    #[inline]
    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn bond_count(&self) -> usize {
        self.bonds.len()
    }

    /// Indices of the bonding partners of atom `i`, in bond-insertion order.
    pub fn neighbors(&self, i: usize) -> Vec<usize> {
        self.bonds
            .iter()
            .filter_map(|b| {
                if b.i == i {
                    Some(b.j)
                } else if b.j == i {
                    Some(b.i)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Number of bonds at atom `i`.
    pub fn degree(&self, i: usize) -> usize {
        self.bonds.iter().filter(|b| b.i == i || b.j == i).count()
    }

    /// Per-atom formal charges, in atom order.
    pub fn formal_charges(&self) -> Vec<i32> {
        self.atoms.iter().map(|a| a.formal_charge).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::Element;

    fn make_water() -> Molecule {
        let mut mol = Molecule::new();
        mol.atoms.push(Atom::new(Element::O, [0.0, 0.0, 0.0]));
        mol.atoms.push(Atom::new(Element::H, [0.96, 0.0, 0.0]));
        mol.atoms.push(Atom::new(Element::H, [-0.24, 0.93, 0.0]));
        mol.add_bond(0, 1, BondOrder::Single).unwrap();
        mol.add_bond(0, 2, BondOrder::Single).unwrap();
        mol
    }

    #[test]
    fn bond_new_normalizes_indices() {
        let bond = Bond::new(5, 2, BondOrder::Single);
        assert_eq!((bond.i, bond.j), (2, 5));
    }

    #[test]
    fn neighbors_and_degree() {
        let water = make_water();
        assert_eq!(water.neighbors(0), vec![1, 2]);
        assert_eq!(water.neighbors(1), vec![0]);
        assert_eq!(water.degree(0), 2);
        assert_eq!(water.degree(1), 1);
        assert_eq!(water.degree(2), 1);
    }

    #[test]
    fn rejects_out_of_range_bond() {
        let mut mol = Molecule::new();
        mol.atoms.push(Atom::new(Element::C, [0.0, 0.0, 0.0]));
        let result = mol.add_bond(0, 99, BondOrder::Single);
        assert!(matches!(result, Err(Error::InvalidBond { i: 0, j: 99, .. })));
    }

    #[test]
    fn rejects_self_bond() {
        let mut mol = Molecule::new();
        mol.atoms.push(Atom::new(Element::C, [0.0, 0.0, 0.0]));
        assert!(matches!(
            mol.add_bond(0, 0, BondOrder::Single),
            Err(Error::SelfBond(0))
        ));
    }

    #[test]
    fn rejects_duplicate_bond_either_direction() {
        let mut water = make_water();
        assert!(matches!(
            water.add_bond(1, 0, BondOrder::Double),
            Err(Error::DuplicateBond { i: 0, j: 1 })
        ));
        assert_eq!(water.bond_count(), 2);
    }

    #[test]
    fn from_parts_validates_bonds() {
        let atoms = vec![
            Atom::new(Element::C, [0.0, 0.0, 0.0]),
            Atom::new(Element::O, [1.2, 0.0, 0.0]),
        ];
        let bonds = vec![Bond::new(0, 1, BondOrder::Double)];
        let mol = Molecule::from_parts(atoms.clone(), bonds).unwrap();
        assert_eq!(mol.bond_count(), 1);

        let bad = vec![Bond::new(0, 7, BondOrder::Single)];
        assert!(Molecule::from_parts(atoms, bad).is_err());
    }

    #[test]
    fn formal_charges_follow_atom_order() {
        let mut mol = Molecule::new();
        mol.atoms
            .push(Atom::with_formal_charge(Element::N, [0.0, 0.0, 0.0], 1));
        mol.atoms.push(Atom::new(Element::H, [1.0, 0.0, 0.0]));
        assert_eq!(mol.formal_charges(), vec![1, 0]);
    }
}
