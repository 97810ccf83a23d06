//! Balancing of reaction equations by backtracking search.
//!
//! Every leaf of the equation is a variable. Candidate ratios (the domain) are the declared
//! ratios of the leaves together with the atom counts found in their molecules, optionally widened
//! with `1..=max_coefficient`. The search walks assignments depth-first in ascending order of values,
//! keeping partial assignments on an explicit stack, and accepts the first complete assignment under
//! which the signed composition matrix maps the ratio vector to zero. The accepted ratios are divided
//! by their greatest common divisor.
use crate::Chemistry::chem_errors::{ChemError, ChemResult};
use crate::Chemistry::equation::Equation;
use log::{debug, info, warn};
use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BalancerSettings {
    /// adds every value in 1..=max_coefficient to the search domain
    pub max_coefficient: Option<u32>,
    /// maximal number of visited assignments (partial ones included)
    pub max_steps: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct Balancer {
    settings: BalancerSettings,
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}

impl Balancer {
    pub fn new(settings: BalancerSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &BalancerSettings {
        &self.settings
    }

    /// candidate ratio values, ascending
    pub fn domain(&self, equation: &Equation) -> Vec<u32> {
        let mut domain = BTreeSet::new();
        for (_, unit) in equation.variables() {
            domain.insert(unit.ratio());
            let mut counts: HashMap<_, u32> = HashMap::new();
            for atom in unit.atoms() {
                *counts.entry(atom).or_insert(0) += 1;
            }
            domain.extend(counts.into_values());
        }
        if let Some(max) = self.settings.max_coefficient {
            domain.extend(1..=max);
        }
        domain.into_iter().collect()
    }

    /// Returns a new equation with solved ratios. The input equation is never modified.
    pub fn balance(&self, equation: &Equation) -> ChemResult<Equation> {
        let n = equation.variables().len();
        let (matrix, _elements) = equation.composition_matrix();
        let domain = self.domain(equation);
        info!(
            "balancing '{}': {} variables, domain {:?}",
            equation, n, domain
        );

        let mut stack: Vec<Vec<u32>> = vec![Vec::new()];
        let mut steps: u64 = 0;
        while let Some(assignment) = stack.pop() {
            steps += 1;
            if let Some(limit) = self.settings.max_steps {
                if steps > limit {
                    warn!("balancing '{}' hit the limit of {} steps", equation, limit);
                    return Err(ChemError::SearchLimitExceeded(limit));
                }
            }
            if assignment.len() == n {
                if conserves(&matrix, &assignment) {
                    let divisor = assignment.iter().copied().fold(0, gcd).max(1);
                    let ratios: Vec<u32> = assignment.iter().map(|r| r / divisor).collect();
                    let balanced = equation.with_ratios(&ratios)?;
                    info!("balanced in {} steps: {}", steps, balanced);
                    return Ok(balanced);
                }
                continue;
            }
            // reversed so that the smallest value is popped first
            for value in domain.iter().rev() {
                let mut next = assignment.clone();
                next.push(*value);
                stack.push(next);
            }
        }
        debug!("search space of '{}' exhausted after {} steps", equation, steps);
        warn!("equation '{}' cannot be balanced", equation);
        Err(ChemError::Unbalanceable(Box::new(equation.clone())))
    }
}

fn conserves(matrix: &DMatrix<i64>, ratios: &[u32]) -> bool {
    let vector = DVector::from_iterator(ratios.len(), ratios.iter().map(|r| *r as i64));
    (matrix * vector).iter().all(|v| *v == 0)
}

impl Equation {
    /// balances with default settings
    pub fn balance(&self) -> ChemResult<Equation> {
        Balancer::default().balance(self)
    }
}
