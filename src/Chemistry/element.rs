use crate::Chemistry::chem_errors::{ChemError, ChemResult};
use crate::Chemistry::periodic_table::{ElementData, by_symbol, lookup};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Atomic species identified by its atomic number. Equality and ordering are by `Z`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "ElementRecord")]
pub struct Element {
    z: u32,
}

#[derive(Deserialize)]
struct ElementRecord {
    z: u32,
}

impl TryFrom<ElementRecord> for Element {
    type Error = ChemError;

    fn try_from(record: ElementRecord) -> ChemResult<Self> {
        if record.z == 0 {
            return Err(ChemError::UnknownElement(0));
        }
        Ok(Self::new(record.z))
    }
}

impl Element {
    /// Atomic numbers start at 1. `Element::new(0)` and numbers past the end of the periodic
    /// table are kept as unknown elements: no table data, symbol "Z(n)", and `atomic_mass`
    /// fails with `UnknownElement`. Deserialization rejects `z = 0`.
    pub const fn new(z: u32) -> Self {
        Self { z }
    }

    pub fn from_symbol(symbol: &str) -> ChemResult<Self> {
        by_symbol(symbol)
            .map(|data| Self::new(data.z))
            .ok_or_else(|| ChemError::InvalidFormula {
                formula: symbol.to_string(),
                reason: "unknown element symbol".to_string(),
            })
    }

    pub fn z(&self) -> u32 {
        self.z
    }

    pub fn data(&self) -> Option<ElementData> {
        lookup(self.z)
    }

    /// element symbol, or "Z(n)" if the atomic number is outside the table
    pub fn symbol(&self) -> String {
        match self.data() {
            Some(data) => data.symbol.to_string(),
            None => format!("Z({})", self.z),
        }
    }

    pub fn atomic_mass(&self) -> ChemResult<f64> {
        self.data()
            .map(|data| data.atomic_mass)
            .ok_or(ChemError::UnknownElement(self.z))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
