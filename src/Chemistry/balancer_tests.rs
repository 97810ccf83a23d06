#[cfg(test)]
mod tests {
    use crate::Chemistry::balancer::{Balancer, BalancerSettings};
    use crate::Chemistry::chem_errors::ChemError;
    use crate::Chemistry::element::Element;
    use crate::Chemistry::equation::{Equation, Product, Reagent, Role};
    use crate::Chemistry::molecule::Molecule;

    fn m(formula: &str) -> Molecule {
        Molecule::from_formula(formula).unwrap()
    }

    fn co_decomposition() -> Equation {
        Reagent::new(m("CO")).yields(Product::new(Element::new(6)) + Product::new(m("O2")))
    }

    fn assert_conserved(equation: &Equation) {
        let reagents = equation.atom_counts(Role::Reagent);
        let products = equation.atom_counts(Role::Product);
        assert_eq!(reagents, products, "{} is not conserved", equation);
    }

    #[test]
    fn test_domain() {
        let domain = Balancer::default().domain(&co_decomposition());
        assert_eq!(domain, vec![1, 2]);
        let widened = Balancer::new(BalancerSettings {
            max_coefficient: Some(4),
            max_steps: None,
        })
        .domain(&co_decomposition());
        assert_eq!(widened, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_co_decomposition() {
        let eq = co_decomposition();
        let balanced = eq.balance().unwrap();
        assert_eq!(balanced.ratios(), vec![2, 2, 1]);
        assert_eq!(balanced.to_string(), "2CO -> 2C + O2");
        assert!(balanced.is_balanced());
        // the unbalanced equation is left as it was
        assert_eq!(eq.ratios(), vec![1, 1, 1]);
    }

    #[test]
    fn test_water_synthesis() {
        let eq = (Reagent::new(m("H2")) + Reagent::new(m("O2"))).yields(Product::new(m("H2O")));
        let balanced = eq.balance().unwrap();
        assert_eq!(balanced.ratios(), vec![2, 1, 2]);
        assert_conserved(&balanced);
    }

    #[test]
    fn test_dissociation_into_ions() {
        let mg = Molecule::from(Element::new(12)).cation();
        let oh = m("OH").anion();
        let eq = Reagent::new(m("Mg(OH)2")).yields(Product::new(mg) + Product::new(oh));
        let balanced = eq.balance().unwrap();
        assert_eq!(balanced.ratios(), vec![1, 1, 2]);
        assert_conserved(&balanced);
    }

    #[test]
    fn test_methane_combustion() {
        let eq = (Reagent::new(m("CH4")) + Reagent::new(m("O2")))
            .yields(Product::new(m("CO2")) + Product::new(m("H2O")));
        let balanced = eq.balance().unwrap();
        assert_eq!(balanced.ratios(), vec![1, 2, 1, 2]);
        assert_conserved(&balanced);
    }

    #[test]
    fn test_propane_needs_wider_domain() {
        let eq = (Reagent::new(m("C3H8")) + Reagent::new(m("O2")))
            .yields(Product::new(m("CO2")) + Product::new(m("H2O")));
        assert!(matches!(eq.balance(), Err(ChemError::Unbalanceable(_))));

        let balancer = Balancer::new(BalancerSettings {
            max_coefficient: Some(5),
            max_steps: None,
        });
        let balanced = balancer.balance(&eq).unwrap();
        assert_eq!(balanced.ratios(), vec![1, 5, 3, 4]);
        assert_conserved(&balanced);
    }

    #[test]
    fn test_unbalanceable_carries_original_equation() {
        // oxygen never appears on the product side
        let eq = Reagent::new(m("CO")).yields(Product::new(Element::new(6)));
        match eq.balance() {
            Err(ChemError::Unbalanceable(original)) => assert_eq!(*original, eq),
            other => panic!("expected Unbalanceable, got {:?}", other),
        }
    }

    #[test]
    fn test_search_limit() {
        let eq = (Reagent::new(m("C3H8")) + Reagent::new(m("O2")))
            .yields(Product::new(m("CO2")) + Product::new(m("H2O")));
        let balancer = Balancer::new(BalancerSettings {
            max_coefficient: Some(5),
            max_steps: Some(10),
        });
        assert_eq!(
            balancer.balance(&eq),
            Err(ChemError::SearchLimitExceeded(10))
        );
    }

    #[test]
    fn test_balancing_is_deterministic() {
        let eq = (Reagent::new(m("Fe")) + Reagent::new(m("O2"))).yields(Product::new(m("Fe2O3")));
        let balancer = Balancer::new(BalancerSettings {
            max_coefficient: Some(4),
            max_steps: None,
        });
        let first = balancer.balance(&eq).unwrap();
        let second = balancer.balance(&eq).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.ratios(), vec![4, 3, 2]);
        assert_conserved(&first);
    }

    #[test]
    fn test_solution_is_reduced() {
        // declared ratio 4 enters the domain, the answer is still the smallest one
        let eq = Reagent::with_ratio(m("O2"), 4)
            .unwrap()
            .yields(Product::new(Element::new(8)));
        let balanced = eq.balance().unwrap();
        assert_eq!(balanced.ratios(), vec![1, 2]);
    }
}
