use peoe::{Atom, BondOrder, Element, Molecule};

/// Builds a molecule from element symbols and undirected connectivity.
///
/// Bond orders are left unresolved, mirroring input sources that record
/// connectivity only; the library infers integer orders itself. Positions
/// are irrelevant to charge assignment and are zeroed.
pub fn molecule(elements: &[Element], bonds: &[(usize, usize)]) -> Molecule {
    let mut mol = Molecule::new();
    for &element in elements {
        mol.atoms.push(Atom::new(element, [0.0, 0.0, 0.0]));
    }
    for &(i, j) in bonds {
        mol.add_bond(i, j, BondOrder::Unknown)
            .expect("fixture bonds must be valid");
    }
    mol
}

pub fn methane() -> Molecule {
    use Element::{C, H};
    molecule(&[C, H, H, H, H], &[(0, 1), (0, 2), (0, 3), (0, 4)])
}
