//! Core data structures representing bonded molecular systems.
//!
//! - [`types`] – Periodic table elements and bond order classifications.
//! - [`atom`] – Atom representation with element, coordinates, and formal charge.
//! - [`molecule`] – Bonded atom collections with validated bond sets.
//!
//! The data model carries topology and formal charges only; everything the
//! charge pipeline derives from it (integer bond orders, valence states) is
//! transient and recomputed per calculation.

pub mod atom;
pub mod molecule;
pub mod types;
