use crate::Chemistry::chem_errors::{ChemError, ChemResult};
use crate::Chemistry::element::Element;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

/// Upper bound on the number of atoms in one parsed formula.
pub const MAX_ATOMS: u32 = 100_000;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z][a-z]?)|(\d+)|(\()|(\))").expect("token pattern is valid")
});

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Symbol(String),
    Number(u32),
    Open,
    Close,
}

fn filter_phases_marks(formula: &str) -> String {
    let mut formula = formula.replace(' ', "");
    for phase in ["(aq)", "(g)", "(l)", "(s)", "(c)"] {
        formula = formula.replace(phase, "");
    }
    formula
}

fn tokenize(formula: &str) -> ChemResult<Vec<Token>> {
    let invalid = |reason: String| ChemError::InvalidFormula {
        formula: formula.to_string(),
        reason,
    };
    let mut tokens = Vec::new();
    let mut position = 0;
    for caps in TOKEN.captures_iter(formula) {
        let whole = caps.get(0).ok_or_else(|| invalid("empty match".to_string()))?;
        if whole.start() != position {
            return Err(invalid(format!(
                "unexpected character at position {}",
                position
            )));
        }
        position = whole.end();
        let token = if let Some(symbol) = caps.get(1) {
            Token::Symbol(symbol.as_str().to_string())
        } else if let Some(number) = caps.get(2) {
            let n: u32 = number
                .as_str()
                .parse()
                .map_err(|_| invalid(format!("bad multiplier '{}'", number.as_str())))?;
            if n == 0 {
                return Err(invalid("multiplier cannot be zero".to_string()));
            }
            Token::Number(n)
        } else if caps.get(3).is_some() {
            Token::Open
        } else {
            Token::Close
        };
        tokens.push(token);
    }
    if position != formula.len() {
        return Err(invalid(format!(
            "unexpected character at position {}",
            position
        )));
    }
    Ok(tokens)
}

fn merge(into: &mut Vec<(Element, u32)>, element: Element, count: u32) -> Option<()> {
    match into.iter_mut().find(|(e, _)| *e == element) {
        Some((_, n)) => *n = n.checked_add(count)?,
        None => into.push((element, count)),
    }
    Some(())
}

/// Parses a chemical formula into element counts, in order of first appearance.
/// Brackets may be nested: "Ca(NO3)2", "K4(Fe(CN)6)". Phase marks like "(g)" are dropped.
pub fn parse_formula(formula: &str) -> ChemResult<Vec<(Element, u32)>> {
    let cleaned = filter_phases_marks(formula);
    let invalid = |reason: &str| ChemError::InvalidFormula {
        formula: formula.to_string(),
        reason: reason.to_string(),
    };
    if cleaned.is_empty() {
        return Err(invalid("formula is empty"));
    }
    let tokens = tokenize(&cleaned)?;
    // one frame per open bracket
    let mut stack: Vec<Vec<(Element, u32)>> = vec![Vec::new()];
    let mut i = 0;
    while i < tokens.len() {
        let multiplier = match tokens.get(i + 1) {
            Some(Token::Number(n)) => Some(*n),
            _ => None,
        };
        match &tokens[i] {
            Token::Symbol(symbol) => {
                let element = Element::from_symbol(symbol).map_err(|_| {
                    invalid(&format!("unknown element symbol '{}'", symbol))
                })?;
                let frame = stack.last_mut().ok_or_else(|| invalid("unbalanced brackets"))?;
                merge(frame, element, multiplier.unwrap_or(1))
                    .ok_or_else(|| invalid("atom count overflow"))?;
            }
            Token::Open => stack.push(Vec::new()),
            Token::Close => {
                if stack.len() < 2 {
                    return Err(invalid("unbalanced brackets"));
                }
                let group = stack.pop().ok_or_else(|| invalid("unbalanced brackets"))?;
                if group.is_empty() {
                    return Err(invalid("empty brackets"));
                }
                let frame = stack.last_mut().ok_or_else(|| invalid("unbalanced brackets"))?;
                for (element, count) in group {
                    count
                        .checked_mul(multiplier.unwrap_or(1))
                        .and_then(|count| merge(frame, element, count))
                        .ok_or_else(|| invalid("atom count overflow"))?;
                }
            }
            Token::Number(_) => return Err(invalid("multiplier without element")),
        }
        i += if multiplier.is_some() { 2 } else { 1 };
    }
    if stack.len() != 1 {
        return Err(invalid("unbalanced brackets"));
    }
    let counts = stack.pop().unwrap_or_default();
    let total = counts
        .iter()
        .try_fold(0u32, |acc, (_, count)| acc.checked_add(*count))
        .filter(|total| *total <= MAX_ATOMS)
        .ok_or_else(|| invalid(&format!("more than {} atoms", MAX_ATOMS)))?;
    debug!("parsed formula {} into {:?} ({} atoms)", formula, counts, total);
    Ok(counts)
}

/// molar mass of a substance given by its formula, g/mol
pub fn molar_mass_of_formula(formula: &str) -> ChemResult<f64> {
    parse_formula(formula)?
        .into_iter()
        .try_fold(0.0, |acc, (element, count)| {
            Ok(acc + element.atomic_mass()? * count as f64)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn counts_by_symbol(formula: &str) -> HashMap<String, u32> {
        parse_formula(formula)
            .unwrap()
            .into_iter()
            .map(|(e, n)| (e.symbol(), n))
            .collect()
    }

    #[test]
    fn test_parse_formula() {
        let expected = HashMap::from([
            ("C".to_string(), 6),
            ("H".to_string(), 8),
            ("O".to_string(), 6),
        ]);
        assert_eq!(counts_by_symbol("C6H8O6"), expected);

        let expected = HashMap::from([
            ("Na".to_string(), 1),
            ("N".to_string(), 2),
            ("O".to_string(), 6),
        ]);
        assert_eq!(counts_by_symbol("Na(NO3)2"), expected);

        let expected = HashMap::from([("H".to_string(), 2), ("O".to_string(), 1)]);
        assert_eq!(counts_by_symbol("H2O(g)"), expected);

        let expected = HashMap::from([
            ("K".to_string(), 4),
            ("Fe".to_string(), 1),
            ("C".to_string(), 6),
            ("N".to_string(), 6),
        ]);
        assert_eq!(counts_by_symbol("K4(Fe(CN)6)"), expected);
    }

    #[test]
    fn test_order_of_first_appearance() {
        let symbols: Vec<String> = parse_formula("Mg(OH)2")
            .unwrap()
            .into_iter()
            .map(|(e, _)| e.symbol())
            .collect();
        assert_eq!(symbols, vec!["Mg", "O", "H"]);
    }

    #[test]
    fn test_invalid_formulas() {
        for formula in ["", "h2o", "Xx2", "(OH", "OH)", "2H", "H0", "()", "H2O!"] {
            assert!(
                matches!(parse_formula(formula), Err(ChemError::InvalidFormula { .. })),
                "formula {:?} should be rejected",
                formula
            );
        }
    }

    #[test]
    fn test_multiplier_overflow_is_rejected() {
        for formula in ["(H4294967295)2", "((H65536)65536)2", "H4294967295H1"] {
            assert!(
                matches!(parse_formula(formula), Err(ChemError::InvalidFormula { .. })),
                "formula {:?} should be rejected",
                formula
            );
        }
    }

    #[test]
    fn test_atom_count_is_bounded() {
        assert!(matches!(
            parse_formula("H4000000000"),
            Err(ChemError::InvalidFormula { .. })
        ));
        assert!(parse_formula(&format!("H{}", MAX_ATOMS)).is_ok());
        assert!(parse_formula(&format!("H{}O", MAX_ATOMS)).is_err());
    }

    #[test]
    fn test_calculate_molar_mass() {
        let cases = [
            ("H2O", 18.01528),
            ("NaCl", 58.44),
            ("C6H8O6", 176.12),
            ("Ca(NO3)2", 164.09),
        ];
        for (formula, expected) in cases {
            let molar_mass = molar_mass_of_formula(formula).unwrap();
            assert!((molar_mass - expected).abs() < 1e-2, "{}", formula);
        }
    }
}
