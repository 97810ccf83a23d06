use crate::Chemistry::chem_errors::{ChemError, ChemResult};
use crate::Chemistry::element::Element;
use crate::Chemistry::molmass::parse_formula;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Charge tag of a species. Ions only differ from the neutral species by this tag.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Charge {
    #[default]
    Neutral,
    Cation,
    Anion,
}

/// Composition of elements. The order of elements is kept for iteration and display,
/// but equality, hashing and ordering only look at the multiset of elements and the charge tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "MoleculeRecord")]
pub struct Molecule {
    elements: Vec<Element>,
    charge: Charge,
}

/// serialized form, checked by `Molecule::new` on the way in
#[derive(Deserialize)]
struct MoleculeRecord {
    elements: Vec<Element>,
    #[serde(default)]
    charge: Charge,
}

impl TryFrom<MoleculeRecord> for Molecule {
    type Error = ChemError;

    fn try_from(record: MoleculeRecord) -> ChemResult<Self> {
        Ok(Self::new(record.elements)?.with_charge(record.charge))
    }
}

impl Molecule {
    pub fn new(elements: Vec<Element>) -> ChemResult<Self> {
        if elements.is_empty() {
            return Err(ChemError::InvalidComposition);
        }
        Ok(Self {
            elements,
            charge: Charge::Neutral,
        })
    }

    /// Parses formulas like "H2O", "Mg(OH)2", "Na+" or "OH-"
    pub fn from_formula(formula: &str) -> ChemResult<Self> {
        let trimmed = formula.trim();
        let (body, charge) = if let Some(body) = trimmed.strip_suffix('+') {
            (body, Charge::Cation)
        } else if let Some(body) = trimmed.strip_suffix('-') {
            (body, Charge::Anion)
        } else {
            (trimmed, Charge::Neutral)
        };
        let counts = parse_formula(body)?;
        let elements = counts
            .into_iter()
            .flat_map(|(element, count)| std::iter::repeat_n(element, count as usize))
            .collect();
        Ok(Self::new(elements)?.with_charge(charge))
    }

    pub fn with_charge(mut self, charge: Charge) -> Self {
        self.charge = charge;
        self
    }

    pub fn cation(self) -> Self {
        self.with_charge(Charge::Cation)
    }

    pub fn anion(self) -> Self {
        self.with_charge(Charge::Anion)
    }

    pub fn charge(&self) -> Charge {
        self.charge
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.elements.iter()
    }

    /// number of atoms of each element
    pub fn composition(&self) -> BTreeMap<Element, u32> {
        let mut counts = BTreeMap::new();
        for element in &self.elements {
            *counts.entry(*element).or_insert(0) += 1;
        }
        counts
    }

    pub fn count_of(&self, element: Element) -> u32 {
        self.elements.iter().filter(|e| **e == element).count() as u32
    }

    /// Sum of atomic masses, g/mol
    pub fn molar_mass(&self) -> ChemResult<f64> {
        self.elements
            .iter()
            .try_fold(0.0, |acc, element| Ok(acc + element.atomic_mass()?))
    }

    fn sorted_elements(&self) -> Vec<Element> {
        let mut sorted = self.elements.clone();
        sorted.sort();
        sorted
    }
}

impl From<Element> for Molecule {
    fn from(element: Element) -> Self {
        Self {
            elements: vec![element],
            charge: Charge::Neutral,
        }
    }
}

impl<'a> IntoIterator for &'a Molecule {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl PartialEq for Molecule {
    fn eq(&self, other: &Self) -> bool {
        self.charge == other.charge && self.composition() == other.composition()
    }
}

impl Eq for Molecule {}

impl Hash for Molecule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted_elements().hash(state);
        self.charge.hash(state);
    }
}

impl PartialOrd for Molecule {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Molecule {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sorted_elements()
            .cmp(&other.sorted_elements())
            .then(self.charge.cmp(&other.charge))
    }
}

impl fmt::Display for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // elements in order of first appearance
        let mut seen: Vec<(Element, u32)> = Vec::new();
        for element in &self.elements {
            match seen.iter_mut().find(|(e, _)| e == element) {
                Some((_, count)) => *count += 1,
                None => seen.push((*element, 1)),
            }
        }
        for (element, count) in seen {
            if count == 1 {
                write!(f, "{}", element)?;
            } else {
                write!(f, "{}{}", element, count)?;
            }
        }
        match self.charge {
            Charge::Neutral => Ok(()),
            Charge::Cation => write!(f, "+"),
            Charge::Anion => write!(f, "-"),
        }
    }
}
