//! Quantity ledger of one well-mixed solution.
//!
//! A [`Sieve`] holds a balanced equation, the volume shared by every species and the moles
//! of each measured species. Species that were not measured are derived through the
//! stoichiometric ratios of the equation. Every update returns a new sieve.
use crate::Chemistry::chem_errors::{ChemError, ChemResult};
use crate::Chemistry::equation::Equation;
use crate::Chemistry::molecule::Molecule;
use crate::Chemistry::quantity::{Concentration, Quantity};
use log::{debug, info};
use prettytable::{Cell, Row, Table};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Sieve {
    equation: Equation,
    size: f64,
    pool: BTreeMap<Molecule, Quantity>,
}

impl Sieve {
    pub fn new(
        equation: Equation,
        size: f64,
        quantities: impl IntoIterator<Item = Quantity>,
    ) -> ChemResult<Self> {
        if !equation.is_balanced() {
            return Err(ChemError::UnbalancedEquation(Box::new(equation)));
        }
        if !(size.is_finite() && size > 0.0) {
            return Err(ChemError::InvalidVolume(size));
        }
        let mut pool = BTreeMap::new();
        accumulate(&mut pool, quantities)?;
        info!("sieve created for '{}' with {} species", equation, pool.len());
        Ok(Self {
            equation,
            size,
            pool,
        })
    }

    /// New sieve with the quantities added to the pool; moles of equal species are summed
    pub fn merge(&self, quantities: impl IntoIterator<Item = Quantity>) -> ChemResult<Self> {
        let mut pool = self.pool.clone();
        accumulate(&mut pool, quantities)?;
        Ok(Self {
            equation: self.equation.clone(),
            size: self.size,
            pool,
        })
    }

    pub fn equation(&self) -> &Equation {
        &self.equation
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// measured species with their accumulated moles
    pub fn pool(&self) -> impl Iterator<Item = &Quantity> {
        self.pool.values()
    }

    /// Moles of `molecule`. If the molecule takes part in the equation and another species of the
    /// equation was measured, the amount is scaled from that species by the ratio of their
    /// coefficients. Otherwise the measured amount is returned, or zero if nothing is known.
    ///
    /// Derivation wins even when `molecule` was measured itself: the reference is the first other
    /// equation species of the pool in molecule order, so the stored amount of `molecule` only
    /// shows up when no other species of the equation was measured.
    pub fn quantity(&self, molecule: &Molecule) -> ChemResult<Quantity> {
        if let Some(unit) = self.equation.find_unit(molecule) {
            let reference = self.pool.iter().find_map(|(other, amount)| {
                if other == molecule {
                    return None;
                }
                self.equation.find_unit(other).map(|u| (u, amount))
            });
            if let Some((reference_unit, amount)) = reference {
                debug!(
                    "deriving {} from {} with ratio {}:{}",
                    molecule,
                    reference_unit.molecule(),
                    unit.ratio(),
                    reference_unit.ratio()
                );
                let moles =
                    amount.value() * unit.ratio() as f64 / reference_unit.ratio() as f64;
                return Quantity::moles(molecule.clone(), moles);
            }
        }
        match self.pool.get(molecule) {
            Some(amount) => Ok(amount.clone()),
            None => {
                debug!("{} is unknown to the sieve, reporting zero", molecule);
                Ok(Quantity::zero(molecule.clone()))
            }
        }
    }

    /// concentration of `molecule` in the shared volume
    pub fn query(&self, molecule: &Molecule) -> ChemResult<Concentration> {
        Concentration::new(self.size, self.quantity(molecule)?)
    }

    pub fn table(&self) -> ChemResult<Table> {
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new("Species"),
            Cell::new("n, mol"),
            Cell::new("m, g"),
            Cell::new("c, mol/V"),
        ]));
        for quantity in self.pool.values() {
            let grams = quantity.to_grams()?;
            table.add_row(Row::new(vec![
                Cell::new(&quantity.molecule().to_string()),
                Cell::new(&format!("{:.6}", quantity.value())),
                Cell::new(&format!("{:.6}", grams.value())),
                Cell::new(&format!("{:.6}", quantity.value() / self.size)),
            ]));
        }
        Ok(table)
    }

    pub fn pretty_print(&self) -> ChemResult<()> {
        println!("{} (V = {})", self.equation, self.size);
        self.table()?.printstd();
        Ok(())
    }
}

fn accumulate(
    pool: &mut BTreeMap<Molecule, Quantity>,
    quantities: impl IntoIterator<Item = Quantity>,
) -> ChemResult<()> {
    for quantity in quantities {
        let moles = quantity.to_moles()?;
        let total = match pool.get(moles.molecule()) {
            Some(existing) => existing.checked_add(&moles)?,
            None => moles,
        };
        pool.insert(total.molecule().clone(), total);
    }
    Ok(())
}

impl fmt::Display for Sieve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let contents: Vec<String> = self.pool.values().map(|q| q.to_string()).collect();
        write!(
            f,
            "Sieve[{}] (V = {}): {}",
            self.equation,
            self.size,
            contents.join(", ")
        )
    }
}
