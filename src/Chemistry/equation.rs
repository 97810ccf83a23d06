//! Symbolic reaction equations.
//!
//! One side of a reaction is a binary tree of terms: a leaf is a [`Unit`] (molecule with its
//! stoichiometric ratio), an inner node joins two terms of the same side with "+".
//! [`Reagent`] and [`Product`] wrap such a tree so that the two sides can not be mixed up;
//! an [`Equation`] is built from one of each.
use crate::Chemistry::chem_errors::{ChemError, ChemResult};
use crate::Chemistry::element::Element;
use crate::Chemistry::molecule::Molecule;
use crate::Chemistry::molmass::MAX_ATOMS;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::ops::Add;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Reagent,
    Product,
}

impl Role {
    /// sign of the term in the conservation balance
    pub fn sign(&self) -> i64 {
        match self {
            Role::Reagent => -1,
            Role::Product => 1,
        }
    }
}

/// Molecule with a stoichiometric ratio (>= 1)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Unit {
    molecule: Molecule,
    ratio: u32,
}

impl Unit {
    pub fn new(molecule: Molecule) -> Self {
        Self { molecule, ratio: 1 }
    }

    pub fn with_ratio(molecule: Molecule, ratio: u32) -> ChemResult<Self> {
        if ratio == 0 {
            return Err(ChemError::InvalidRatio);
        }
        Ok(Self { molecule, ratio })
    }

    pub fn molecule(&self) -> &Molecule {
        &self.molecule
    }

    pub fn ratio(&self) -> u32 {
        self.ratio
    }

    /// the same molecule with another ratio
    pub fn redefine(&self, ratio: u32) -> ChemResult<Self> {
        Self::with_ratio(self.molecule.clone(), ratio)
    }

    /// every element of the molecule, repeated `ratio` times
    pub fn atoms(&self) -> impl Iterator<Item = Element> + '_ {
        (0..self.ratio).flat_map(move |_| self.molecule.iter().copied())
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ratio == 1 {
            write!(f, "{}", self.molecule)
        } else {
            write!(f, "{}{}", self.ratio, self.molecule)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Leaf(Unit),
    Combine(Box<Term>, Box<Term>),
}

impl Term {
    pub fn combine(left: Term, right: Term) -> Term {
        Term::Combine(Box::new(left), Box::new(right))
    }

    /// leaf units, left to right
    pub fn leaves(&self) -> Vec<&Unit> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a Unit>) {
        match self {
            Term::Leaf(unit) => leaves.push(unit),
            Term::Combine(left, right) => {
                left.collect_leaves(leaves);
                right.collect_leaves(leaves);
            }
        }
    }

    /// first leaf (depth-first) whose molecule equals `molecule`
    pub fn find(&self, molecule: &Molecule) -> Option<&Unit> {
        match self {
            Term::Leaf(unit) => (unit.molecule() == molecule).then_some(unit),
            Term::Combine(left, right) => left.find(molecule).or_else(|| right.find(molecule)),
        }
    }

    pub fn atom_counts(&self) -> BTreeMap<Element, u64> {
        let mut counts = BTreeMap::new();
        for unit in self.leaves() {
            for atom in unit.atoms() {
                *counts.entry(atom).or_insert(0) += 1;
            }
        }
        counts
    }

    /// copy of the tree with leaf ratios taken from `ratios` in leaf order
    fn rebuild(&self, ratios: &mut impl Iterator<Item = u32>) -> ChemResult<Term> {
        match self {
            Term::Leaf(unit) => {
                let ratio = ratios.next().ok_or(ChemError::InvalidRatio)?;
                Ok(Term::Leaf(unit.redefine(ratio)?))
            }
            Term::Combine(left, right) => {
                let left = left.rebuild(ratios)?;
                let right = right.rebuild(ratios)?;
                Ok(Term::combine(left, right))
            }
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Leaf(unit) => write!(f, "{}", unit),
            Term::Combine(left, right) => write!(f, "{} + {}", left, right),
        }
    }
}

macro_rules! side {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name(Term);

        impl $name {
            pub fn new(molecule: impl Into<Molecule>) -> Self {
                Self(Term::Leaf(Unit::new(molecule.into())))
            }

            pub fn with_ratio(molecule: impl Into<Molecule>, ratio: u32) -> ChemResult<Self> {
                Ok(Self(Term::Leaf(Unit::with_ratio(molecule.into(), ratio)?)))
            }

            /// "+" of two terms of the same side
            pub fn combine(self, other: Self) -> Self {
                Self(Term::combine(self.0, other.0))
            }

            pub fn term(&self) -> &Term {
                &self.0
            }
        }

        impl From<Unit> for $name {
            fn from(unit: Unit) -> Self {
                Self(Term::Leaf(unit))
            }
        }

        impl Add for $name {
            type Output = $name;

            fn add(self, other: Self) -> Self {
                self.combine(other)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

side!(Reagent);
side!(Product);

impl Reagent {
    /// builds the equation `self -> product`
    pub fn yields(self, product: Product) -> Equation {
        Equation::new(self, product)
    }
}

/// Reagent side and product side of a reaction, balanced or not
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    reagent: Reagent,
    product: Product,
}

impl Equation {
    pub fn new(reagent: Reagent, product: Product) -> Self {
        Self { reagent, product }
    }

    pub fn reagent(&self) -> &Reagent {
        &self.reagent
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    /// all leaf units of both sides: reagents first, then products
    pub fn variables(&self) -> Vec<(Role, &Unit)> {
        let reagents = self.reagent.term().leaves().into_iter().map(|u| (Role::Reagent, u));
        let products = self.product.term().leaves().into_iter().map(|u| (Role::Product, u));
        reagents.chain(products).collect()
    }

    pub fn ratios(&self) -> Vec<u32> {
        self.variables().iter().map(|(_, unit)| unit.ratio()).collect()
    }

    pub fn atom_counts(&self, role: Role) -> BTreeMap<Element, u64> {
        match role {
            Role::Reagent => self.reagent.term().atom_counts(),
            Role::Product => self.product.term().atom_counts(),
        }
    }

    /// every element is conserved between the two sides
    pub fn is_balanced(&self) -> bool {
        self.atom_counts(Role::Reagent) == self.atom_counts(Role::Product)
    }

    /// unit of `molecule` in this equation, reagents searched first
    pub fn find_unit(&self, molecule: &Molecule) -> Option<&Unit> {
        self.reagent
            .term()
            .find(molecule)
            .or_else(|| self.product.term().find(molecule))
    }

    pub fn contains(&self, molecule: &Molecule) -> bool {
        self.find_unit(molecule).is_some()
    }

    /// New equation with the same shape and the given ratios, one per variable
    pub fn with_ratios(&self, ratios: &[u32]) -> ChemResult<Equation> {
        if ratios.len() != self.variables().len() {
            return Err(ChemError::InvalidRatio);
        }
        let mut iter = ratios.iter().copied();
        let reagent = Reagent(self.reagent.term().rebuild(&mut iter)?);
        let product = Product(self.product.term().rebuild(&mut iter)?);
        Ok(Equation::new(reagent, product))
    }

    /// Signed element composition matrix: one row per element, one column per variable,
    /// reagent columns negative. The equation is balanced iff `matrix * ratios == 0`.
    pub fn composition_matrix(&self) -> (DMatrix<i64>, Vec<Element>) {
        let variables = self.variables();
        let elements: Vec<Element> = variables
            .iter()
            .flat_map(|(_, unit)| unit.molecule().iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let mut matrix = DMatrix::zeros(elements.len(), variables.len());
        for (j, (role, unit)) in variables.iter().enumerate() {
            for (element, count) in unit.molecule().composition() {
                if let Some(i) = elements.iter().position(|e| *e == element) {
                    matrix[(i, j)] = role.sign() * count as i64;
                }
            }
        }
        (matrix, elements)
    }
}

fn parse_side(text: &str, source: &str) -> ChemResult<Vec<Unit>> {
    // terms are separated by " + " so that a trailing "+" of a cation stays with its formula
    text.split(" + ")
        .map(|term| {
            let term = term.trim();
            let digits = term.chars().take_while(|c| c.is_ascii_digit()).count();
            let (ratio, formula) = term.split_at(digits);
            let ratio: u32 = if ratio.is_empty() {
                1
            } else {
                ratio.parse().map_err(|_| ChemError::InvalidFormula {
                    formula: source.to_string(),
                    reason: format!("bad coefficient in '{}'", term),
                })?
            };
            let molecule = Molecule::from_formula(formula)?;
            if molecule.elements().len() as u64 * u64::from(ratio) > u64::from(MAX_ATOMS) {
                return Err(ChemError::InvalidFormula {
                    formula: source.to_string(),
                    reason: format!("more than {} atoms in '{}'", MAX_ATOMS, term),
                });
            }
            Unit::with_ratio(molecule, ratio)
        })
        .collect()
}

impl FromStr for Equation {
    type Err = ChemError;

    /// Parses "2H2 + O2 -> 2H2O"; "=" may be used instead of "->"
    fn from_str(s: &str) -> ChemResult<Self> {
        let (left, right) = s
            .split_once("->")
            .or_else(|| s.split_once('='))
            .ok_or_else(|| ChemError::InvalidFormula {
                formula: s.to_string(),
                reason: "expected '->' between reagents and products".to_string(),
            })?;
        let reagent = parse_side(left, s)?
            .into_iter()
            .map(Reagent::from)
            .reduce(Reagent::combine);
        let product = parse_side(right, s)?
            .into_iter()
            .map(Product::from)
            .reduce(Product::combine);
        match (reagent, product) {
            (Some(reagent), Some(product)) => Ok(Equation::new(reagent, product)),
            _ => Err(ChemError::InvalidFormula {
                formula: s.to_string(),
                reason: "both sides need at least one term".to_string(),
            }),
        }
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.reagent, self.product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DVector;

    const C: Element = Element::new(6);
    const O: Element = Element::new(8);

    fn co() -> Molecule {
        Molecule::new(vec![C, O]).unwrap()
    }

    fn o2() -> Molecule {
        Molecule::new(vec![O, O]).unwrap()
    }

    fn co_decomposition() -> Equation {
        Reagent::new(co()).yields(Product::new(C) + Product::new(o2()))
    }

    #[test]
    fn test_unit_atoms() {
        let unit = Unit::with_ratio(o2(), 3).unwrap();
        assert_eq!(unit.atoms().count(), 6);
        assert!(unit.atoms().all(|e| e == O));
        assert_eq!(Unit::with_ratio(o2(), 0), Err(ChemError::InvalidRatio));
    }

    #[test]
    fn test_tree_traversal_visits_both_children() {
        let co2 = Molecule::new(vec![C, O, O]).unwrap();
        let product = (Product::new(C) + Product::new(o2())) + Product::new(co2.clone());
        let molecules: Vec<String> = product
            .term()
            .leaves()
            .iter()
            .map(|u| u.molecule().to_string())
            .collect();
        assert_eq!(molecules, vec!["C", "O2", "CO2"]);
        assert!(product.term().find(&co2).is_some());
    }

    #[test]
    fn test_unbalanced_and_balanced() {
        let eq = co_decomposition();
        assert!(!eq.is_balanced());
        let balanced = eq.with_ratios(&[2, 2, 1]).unwrap();
        assert!(balanced.is_balanced());
        assert_eq!(balanced.to_string(), "2CO -> 2C + O2");
        // the original is untouched
        assert_eq!(eq.ratios(), vec![1, 1, 1]);
    }

    #[test]
    fn test_with_ratios_validation() {
        let eq = co_decomposition();
        assert!(eq.with_ratios(&[1, 1]).is_err());
        assert!(eq.with_ratios(&[1, 0, 1]).is_err());
    }

    #[test]
    fn test_find_unit() {
        let eq = co_decomposition().with_ratios(&[2, 2, 1]).unwrap();
        assert_eq!(eq.find_unit(&Molecule::from(C)).unwrap().ratio(), 2);
        assert_eq!(eq.find_unit(&o2()).unwrap().ratio(), 1);
        assert!(eq.find_unit(&Molecule::from(Element::new(1))).is_none());
    }

    #[test]
    fn test_parse_equation() {
        let eq: Equation = "2CO -> 2C + O2".parse().unwrap();
        assert_eq!(eq, co_decomposition().with_ratios(&[2, 2, 1]).unwrap());
        let ions: Equation = "Mg(OH)2 = Mg+ + 2OH-".parse().unwrap();
        assert!(ions.is_balanced());
        assert_eq!(ions.to_string(), "MgO2H2 -> Mg+ + 2OH-");
        assert!("H2 + O2".parse::<Equation>().is_err());
        assert!("H2 -> ".parse::<Equation>().is_err());
        assert!("0H2 -> H2".parse::<Equation>().is_err());
        assert!("4000000000H2 -> H2".parse::<Equation>().is_err());
        assert!("(H4294967295)2 -> H2".parse::<Equation>().is_err());
    }

    #[test]
    fn test_composition_matrix() {
        let eq = co_decomposition();
        let (matrix, elements) = eq.composition_matrix();
        assert_eq!(elements, vec![C, O]);
        assert_eq!(matrix.nrows(), 2);
        assert_eq!(matrix.ncols(), 3);
        assert_eq!(matrix[(0, 0)], -1);
        assert_eq!(matrix[(1, 2)], 2);
        let residual = &matrix * DVector::from_vec(vec![2i64, 2, 1]);
        assert!(residual.iter().all(|v| *v == 0));
    }
}
