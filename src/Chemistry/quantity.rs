use crate::Chemistry::chem_errors::{ChemError, ChemResult};
use crate::Chemistry::molecule::Molecule;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountUnit {
    Moles,
    Grams,
}

impl AmountUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            AmountUnit::Moles => "mol",
            AmountUnit::Grams => "g",
        }
    }
}

/// right-hand side of quantity arithmetic
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    Scalar(f64),
    Quantity(&'a Quantity),
}

impl From<f64> for Operand<'_> {
    fn from(value: f64) -> Self {
        Operand::Scalar(value)
    }
}

impl<'a> From<&'a Quantity> for Operand<'a> {
    fn from(quantity: &'a Quantity) -> Self {
        Operand::Quantity(quantity)
    }
}

/// Amount of a molecule in moles or grams. The value is always finite and non-negative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "QuantityRecord")]
pub struct Quantity {
    molecule: Molecule,
    value: f64,
    unit: AmountUnit,
}

#[derive(Deserialize)]
struct QuantityRecord {
    molecule: Molecule,
    value: f64,
    unit: AmountUnit,
}

impl TryFrom<QuantityRecord> for Quantity {
    type Error = ChemError;

    fn try_from(record: QuantityRecord) -> ChemResult<Self> {
        Self::new(record.molecule, record.value, record.unit)
    }
}

fn checked_value(value: f64) -> ChemResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ChemError::InvalidAmount(value))
    }
}

impl Quantity {
    pub fn new(molecule: Molecule, value: f64, unit: AmountUnit) -> ChemResult<Self> {
        Ok(Self {
            molecule,
            value: checked_value(value)?,
            unit,
        })
    }

    pub fn moles(molecule: Molecule, value: f64) -> ChemResult<Self> {
        Self::new(molecule, value, AmountUnit::Moles)
    }

    pub fn grams(molecule: Molecule, value: f64) -> ChemResult<Self> {
        Self::new(molecule, value, AmountUnit::Grams)
    }

    pub fn zero(molecule: Molecule) -> Self {
        Self {
            molecule,
            value: 0.0,
            unit: AmountUnit::Moles,
        }
    }

    pub fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> AmountUnit {
        self.unit
    }

    /// Converts into the requested unit through the molar mass
    pub fn convert(&self, unit: AmountUnit) -> ChemResult<Self> {
        if unit == self.unit {
            return Ok(self.clone());
        }
        let molar_mass = self.molecule.molar_mass()?;
        let value = match unit {
            AmountUnit::Grams => self.value * molar_mass,
            AmountUnit::Moles => self.value / molar_mass,
        };
        Self::new(self.molecule.clone(), value, unit)
    }

    pub fn to_moles(&self) -> ChemResult<Self> {
        self.convert(AmountUnit::Moles)
    }

    pub fn to_grams(&self) -> ChemResult<Self> {
        self.convert(AmountUnit::Grams)
    }

    pub fn moles_value(&self) -> ChemResult<f64> {
        Ok(self.to_moles()?.value)
    }

    /// The same number of moles attributed to another species
    pub fn to(&self, molecule: Molecule) -> ChemResult<Self> {
        Self::moles(molecule, self.moles_value()?)
    }

    fn apply(&self, rhs: Operand<'_>, op: impl Fn(f64, f64) -> f64) -> ChemResult<Self> {
        let rhs_value = match rhs {
            Operand::Scalar(value) => value,
            Operand::Quantity(other) => {
                if other.molecule != self.molecule {
                    return Err(ChemError::MoleculeMismatch {
                        left: self.molecule.to_string(),
                        right: other.molecule.to_string(),
                    });
                }
                other.convert(self.unit)?.value
            }
        };
        Self::new(self.molecule.clone(), op(self.value, rhs_value), self.unit)
    }

    pub fn checked_add<'a>(&self, rhs: impl Into<Operand<'a>>) -> ChemResult<Self> {
        self.apply(rhs.into(), |a, b| a + b)
    }

    pub fn checked_sub<'a>(&self, rhs: impl Into<Operand<'a>>) -> ChemResult<Self> {
        self.apply(rhs.into(), |a, b| a - b)
    }

    pub fn checked_mul<'a>(&self, rhs: impl Into<Operand<'a>>) -> ChemResult<Self> {
        self.apply(rhs.into(), |a, b| a * b)
    }

    pub fn checked_div<'a>(&self, rhs: impl Into<Operand<'a>>) -> ChemResult<Self> {
        self.apply(rhs.into(), |a, b| a / b)
    }

    pub fn checked_pow<'a>(&self, rhs: impl Into<Operand<'a>>) -> ChemResult<Self> {
        self.apply(rhs.into(), f64::powf)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.3} {})",
            self.molecule,
            self.value,
            self.unit.symbol()
        )
    }
}

/// Amount of a substance in a volume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ConcentrationRecord")]
pub struct Concentration {
    size: f64,
    content: Quantity,
}

#[derive(Deserialize)]
struct ConcentrationRecord {
    size: f64,
    content: Quantity,
}

impl TryFrom<ConcentrationRecord> for Concentration {
    type Error = ChemError;

    fn try_from(record: ConcentrationRecord) -> ChemResult<Self> {
        Self::new(record.size, record.content)
    }
}

impl Concentration {
    pub fn new(size: f64, content: Quantity) -> ChemResult<Self> {
        if !(size.is_finite() && size > 0.0) {
            return Err(ChemError::InvalidVolume(size));
        }
        Ok(Self { size, content })
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn content(&self) -> &Quantity {
        &self.content
    }

    /// moles per unit of volume
    pub fn value(&self) -> ChemResult<f64> {
        Ok(self.content.moles_value()? / self.size)
    }
}

impl fmt::Display for Concentration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let molecule = self.content.molecule();
        match self.value() {
            Ok(value) => write!(f, "[{}] = {:.6} ({} in {})", molecule, value, self.content, self.size),
            Err(_) => write!(f, "[{}] = ? ({} in {})", molecule, self.content, self.size),
        }
    }
}
