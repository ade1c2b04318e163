use super::types::Element;

/// A single atom: element, Cartesian position, and formal charge.
///
/// The position is carried for downstream consumers (docking, file export)
/// but is never read by the charge algorithm, which operates on topology
/// alone.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub element: Element,
    pub position: [f64; 3],
    /// Integer formal charge, e.g. +1 for an ammonium nitrogen. Read-only
    /// input to the charge calculation.
    pub formal_charge: i32,
}

impl Atom {
    pub fn new(element: Element, position: [f64; 3]) -> Self {
        Self {
            element,
            position,
            formal_charge: 0,
        }
    }

    pub fn with_formal_charge(element: Element, position: [f64; 3], formal_charge: i32) -> Self {
        Self {
            element,
            position,
            formal_charge,
        }
    }
}
