//! Integer bond order resolution and valence state derivation.
//!
//! Input sources frequently leave bond orders unset or marked aromatic.
//! Before parameters can be selected, every bond needs a concrete integer
//! order: each atom gets a bond-order budget from its standard valence, and
//! unresolved bonds are promoted while both endpoints still have budget
//! left. Ties default to single bonds. The assignment is deterministic for
//! identical input topology since promotion walks bonds in storage order.

use crate::model::molecule::Molecule;
use crate::model::types::{BondOrder, Element};
use serde::Deserialize;
use std::fmt;

/// Hybridization descriptor derived from the resolved π-bond count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Hybridization {
    #[serde(rename = "sp")]
    Sp,
    #[serde(rename = "sp2")]
    Sp2,
    #[serde(rename = "sp3")]
    Sp3,
}

impl fmt::Display for Hybridization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hybridization::Sp => write!(f, "sp"),
            Hybridization::Sp2 => write!(f, "sp2"),
            Hybridization::Sp3 => write!(f, "sp3"),
        }
    }
}

/// An atom's bonding context, used to select its parameter entry.
///
/// Recomputed for every calculation; never stored on the molecule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValenceState {
    pub element: Element,
    /// Number of bonding partners.
    pub degree: usize,
    pub hybridization: Hybridization,
}

impl fmt::Display for ValenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} partner{}, {})",
            self.element,
            self.degree,
            if self.degree == 1 { "" } else { "s" },
            self.hybridization
        )
    }
}

/// Resolved integer orders per bond plus derived valence states per atom.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedTopology {
    /// Integer order of each bond, in the molecule's bond storage order.
    pub orders: Vec<u8>,
    /// Valence state of each atom, in atom order.
    pub states: Vec<ValenceState>,
}

/// Standard valence used as the bond-order budget during resolution.
///
/// Sulfur is hypervalent when it carries more than two partners; elements
/// without an entry resolve all their bonds as single.
fn standard_valence(element: Element, degree: usize) -> Option<u8> {
    match element {
        Element::H | Element::F | Element::Cl | Element::Br | Element::I => Some(1),
        Element::O => Some(2),
        Element::N => Some(3),
        Element::C | Element::Si => Some(4),
        Element::P => Some(5),
        Element::S => Some(if degree <= 2 { 2 } else { 6 }),
        _ => None,
    }
}

pub(crate) fn resolve(molecule: &Molecule) -> ResolvedTopology {
    let n_atoms = molecule.atom_count();
    let bonds = molecule.bonds();

    let mut incident: Vec<Vec<usize>> = vec![Vec::new(); n_atoms];
    for (b_idx, bond) in bonds.iter().enumerate() {
        incident[bond.i].push(b_idx);
        incident[bond.j].push(b_idx);
    }

    // Explicit orders are honored; aromatic and unknown bonds start single.
    let mut orders: Vec<u8> = bonds
        .iter()
        .map(|b| b.order.fixed_order().unwrap_or(1))
        .collect();

    let mut budget: Vec<u8> = (0..n_atoms)
        .map(|i| {
            let element = molecule.atoms[i].element;
            let degree = incident[i].len();
            let assigned: u8 = incident[i].iter().map(|&b| orders[b]).sum();
            standard_valence(element, degree)
                .map(|v| v.saturating_sub(assigned))
                .unwrap_or(0)
        })
        .collect();

    // Promote unresolved bonds one order at a time while both endpoints can
    // still accept it. Repeats until a full pass changes nothing, so a
    // triple bond forms over two passes.
    loop {
        let mut changed = false;
        for (b_idx, bond) in bonds.iter().enumerate() {
            let cap = match bond.order {
                BondOrder::Aromatic => 2,
                BondOrder::Unknown => 3,
                _ => continue,
            };
            if orders[b_idx] < cap && budget[bond.i] > 0 && budget[bond.j] > 0 {
                orders[b_idx] += 1;
                budget[bond.i] -= 1;
                budget[bond.j] -= 1;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    let states = (0..n_atoms)
        .map(|i| {
            let pi_bonds: u8 = incident[i].iter().map(|&b| orders[b] - 1).sum();
            let hybridization = match pi_bonds {
                0 => Hybridization::Sp3,
                1 => Hybridization::Sp2,
                _ => Hybridization::Sp,
            };
            ValenceState {
                element: molecule.atoms[i].element,
                degree: incident[i].len(),
                hybridization,
            }
        })
        .collect();

    ResolvedTopology { orders, states }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;
    use crate::model::types::Element;

    fn untyped_molecule(elements: &[Element], bonds: &[(usize, usize)]) -> Molecule {
        let mut mol = Molecule::new();
        for &el in elements {
            mol.atoms.push(Atom::new(el, [0.0, 0.0, 0.0]));
        }
        for &(i, j) in bonds {
            mol.add_bond(i, j, BondOrder::Unknown).unwrap();
        }
        mol
    }

    #[test]
    fn saturated_carbon_stays_single() {
        use Element::{C, H};
        let mol = untyped_molecule(&[C, H, H, H, H], &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        let resolved = resolve(&mol);
        assert!(resolved.orders.iter().all(|&o| o == 1));
        assert_eq!(resolved.states[0].hybridization, Hybridization::Sp3);
        assert_eq!(resolved.states[0].degree, 4);
    }

    #[test]
    fn ethylene_infers_double_bond() {
        use Element::{C, H};
        let mol = untyped_molecule(
            &[C, C, H, H, H, H],
            &[(0, 1), (0, 2), (0, 3), (1, 4), (1, 5)],
        );
        let resolved = resolve(&mol);
        assert_eq!(resolved.orders[0], 2);
        assert_eq!(resolved.states[0].hybridization, Hybridization::Sp2);
        assert_eq!(resolved.states[1].hybridization, Hybridization::Sp2);
    }

    #[test]
    fn acetylene_infers_triple_bond() {
        use Element::{C, H};
        let mol = untyped_molecule(&[C, C, H, H], &[(0, 1), (0, 2), (1, 3)]);
        let resolved = resolve(&mol);
        assert_eq!(resolved.orders[0], 3);
        assert_eq!(resolved.states[0].hybridization, Hybridization::Sp);
    }

    #[test]
    fn nitrile_nitrogen_is_sp() {
        use Element::{C, H, N};
        // Hydrogen cyanide: H-C#N
        let mol = untyped_molecule(&[C, N, H], &[(0, 1), (0, 2)]);
        let resolved = resolve(&mol);
        assert_eq!(resolved.orders[0], 3);
        assert_eq!(resolved.states[1].degree, 1);
        assert_eq!(resolved.states[1].hybridization, Hybridization::Sp);
    }

    #[test]
    fn carbonyl_oxygen_is_sp2() {
        use Element::{C, H, O};
        // Formaldehyde with connectivity only
        let mol = untyped_molecule(&[C, O, H, H], &[(0, 1), (0, 2), (0, 3)]);
        let resolved = resolve(&mol);
        assert_eq!(resolved.orders[0], 2);
        assert_eq!(resolved.states[1].hybridization, Hybridization::Sp2);
        assert_eq!(resolved.states[0].hybridization, Hybridization::Sp2);
    }

    #[test]
    fn explicit_orders_are_honored() {
        use Element::{C, O};
        let mut mol = Molecule::new();
        mol.atoms.push(Atom::new(C, [0.0, 0.0, 0.0]));
        mol.atoms.push(Atom::new(O, [1.2, 0.0, 0.0]));
        mol.add_bond(0, 1, BondOrder::Single).unwrap();
        let resolved = resolve(&mol);
        // Both endpoints have residual budget, but an explicit single bond
        // is never promoted.
        assert_eq!(resolved.orders[0], 1);
    }

    #[test]
    fn benzene_kekulizes_to_alternating_orders() {
        use Element::{C, H};
        let mut mol = Molecule::new();
        for _ in 0..6 {
            mol.atoms.push(Atom::new(C, [0.0, 0.0, 0.0]));
        }
        for _ in 0..6 {
            mol.atoms.push(Atom::new(H, [0.0, 0.0, 0.0]));
        }
        for i in 0..6 {
            mol.add_bond(i, (i + 1) % 6, BondOrder::Aromatic).unwrap();
        }
        for i in 0..6 {
            mol.add_bond(i, i + 6, BondOrder::Single).unwrap();
        }
        let resolved = resolve(&mol);
        let ring_orders: Vec<u8> = resolved.orders[..6].to_vec();
        assert_eq!(ring_orders.iter().filter(|&&o| o == 2).count(), 3);
        assert_eq!(ring_orders.iter().filter(|&&o| o == 1).count(), 3);
        for i in 0..6 {
            assert_eq!(resolved.states[i].hybridization, Hybridization::Sp2);
        }
    }

    #[test]
    fn zero_bond_atom_resolves_without_error() {
        let mol = untyped_molecule(&[Element::Na], &[]);
        let resolved = resolve(&mol);
        assert!(resolved.orders.is_empty());
        assert_eq!(resolved.states[0].degree, 0);
        assert_eq!(resolved.states[0].hybridization, Hybridization::Sp3);
    }

    #[test]
    fn unknown_element_bonds_stay_single() {
        use Element::{Fe, O};
        let mol = untyped_molecule(&[Fe, O, O], &[(0, 1), (0, 2)]);
        let resolved = resolve(&mol);
        assert!(resolved.orders.iter().all(|&o| o == 1));
    }

    #[test]
    fn hypervalent_sulfur_gets_extended_budget() {
        use Element::{O, S};
        // Sulfate-like: S with four oxygens, connectivity only
        let mol = untyped_molecule(&[S, O, O, O, O], &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        let resolved = resolve(&mol);
        let total: u8 = resolved.orders.iter().sum();
        assert_eq!(total, 6);
    }

    #[test]
    fn valence_state_display() {
        let state = ValenceState {
            element: Element::S,
            degree: 1,
            hybridization: Hybridization::Sp2,
        };
        assert_eq!(state.to_string(), "S (1 partner, sp2)");
    }
}
