//! Gasteiger-Marsili electronegativity parameters and TOML loading.
//!
//! Each entry carries the (a, b, c) coefficients of the quadratic
//! electronegativity function for one valence state of one element, keyed by
//! element, bonded-partner count, and hybridization. A separate ion set
//! flags non-covalent species whose partial charge is defined to equal their
//! formal charge. Element keys in the TOML are symbols and parse
//! case-insensitively.

use super::resolver::{Hybridization, ValenceState};
use crate::error::Error;
use crate::model::types::Element;
use serde::Deserialize;
use serde::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

/// Electronegativity coefficients for one valence state.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct StateParams {
    /// Number of bonded partners this entry applies to.
    pub degree: usize,
    /// Hybridization this entry applies to.
    pub hybridization: Hybridization,
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl StateParams {
    /// Evaluates χ(Q) = a + b·Q + c·Q² at the given charge.
    #[inline]
    pub fn electronegativity(&self, charge: f64) -> f64 {
        self.a + self.b * charge + self.c * charge * charge
    }

    /// Electronegativity of the +1 cation state, χ⁺ = a + b + c.
    ///
    /// Used as the normalization constant for charge transfer along a bond.
    #[inline]
    pub fn cation_electronegativity(&self) -> f64 {
        self.a + self.b + self.c
    }
}

/// The full parameter table: per-element valence state entries plus the set
/// of ion-flagged elements.
///
/// Immutable after loading and freely shareable across threads.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Parameters {
    /// Valence state entries, keyed by element.
    #[serde(deserialize_with = "deserialize_state_map")]
    pub elements: HashMap<Element, Vec<StateParams>>,
    /// Elements treated as non-covalent ions (partial charge = formal charge).
    #[serde(default, deserialize_with = "deserialize_ion_set")]
    pub ions: HashSet<Element>,
}

impl Parameters {
    /// Creates an empty table.
    pub fn new() -> Self {
        Parameters {
            elements: HashMap::new(),
            ions: HashSet::new(),
        }
    }

    /// Loads parameters from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::ParameterParse`] for invalid TOML content.
    pub fn load_from_file(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_from_str(&content)
    }

    /// Parses parameters from a TOML string.
    ///
    /// # Examples
    ///
    /// ```
    /// use peoe::Parameters;
    ///
    /// let toml_data = r#"
    /// ions = ["Na"]
    ///
    /// [[elements.H]]
    /// degree = 1
    /// hybridization = "sp3"
    /// a = 7.17
    /// b = 6.24
    /// c = -0.56
    /// "#;
    ///
    /// let params = Parameters::load_from_str(toml_data).unwrap();
    /// assert_eq!(params.elements.len(), 1);
    /// ```
    pub fn load_from_str(toml_str: &str) -> Result<Self, Error> {
        toml::from_str(toml_str).map_err(Error::from)
    }

    /// Looks up the entry for a valence state.
    ///
    /// A miss is not an error: for covalently bonded atoms the caller
    /// converts it into a diagnostic plus a NaN charge for that atom only.
    pub fn lookup(&self, state: &ValenceState) -> Option<&StateParams> {
        self.elements.get(&state.element)?.iter().find(|entry| {
            entry.degree == state.degree && entry.hybridization == state.hybridization
        })
    }

    /// Whether the element is flagged as a non-covalent ion species.
    #[inline]
    pub fn is_ion(&self, element: Element) -> bool {
        self.ions.contains(&element)
    }

    /// Whether at least one valence state of the element is parametrized.
    #[inline]
    pub fn has_element(&self, element: Element) -> bool {
        self.elements.contains_key(&element)
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self::new()
    }
}

/// Deserializes the per-element entry map with element-symbol keys.
///
/// Keys are matched case-insensitively so tables written with uppercase
/// symbols (a PDB habit) load unchanged.
fn deserialize_state_map<'de, D>(
    deserializer: D,
) -> Result<HashMap<Element, Vec<StateParams>>, D::Error>
where
    D: Deserializer<'de>,
{
    struct StateMapVisitor;

    impl<'de> Visitor<'de> for StateMapVisitor {
        type Value = HashMap<Element, Vec<StateParams>>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map from element symbol to valence state entries")
        }

        fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut elements = HashMap::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, Vec<StateParams>>()? {
                let element = Element::from_symbol(&key).ok_or_else(|| {
                    de::Error::custom(format!("invalid element key: '{}'", key))
                })?;
                elements.insert(element, value);
            }
            Ok(elements)
        }
    }

    deserializer.deserialize_map(StateMapVisitor)
}

/// Deserializes the ion list (element symbols) into an element set.
fn deserialize_ion_set<'de, D>(deserializer: D) -> Result<HashSet<Element>, D::Error>
where
    D: Deserializer<'de>,
{
    struct IonSetVisitor;

    impl<'de> Visitor<'de> for IonSetVisitor {
        type Value = HashSet<Element>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a list of element symbols")
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut ions = HashSet::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(symbol) = seq.next_element::<String>()? {
                let element = Element::from_symbol(&symbol).ok_or_else(|| {
                    de::Error::custom(format!("invalid ion element: '{}'", symbol))
                })?;
                ions.insert(element);
            }
            Ok(ions)
        }
    }

    deserializer.deserialize_seq(IonSetVisitor)
}
