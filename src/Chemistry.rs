/// read-only table of elements: symbol, atomic mass, group and period by atomic number
pub mod periodic_table;
/// atomic species identified by atomic number
pub mod element;
/// compositions of elements, compared as multisets; ions are molecules with a charge tag
///
/// # Examples
/// ```
/// use ChemSieve::Chemistry::molecule::Molecule;
/// let water = Molecule::from_formula("H2O").unwrap();
/// let same = Molecule::from_formula("OH2").unwrap();
/// assert_eq!(water, same);
/// println!("Molar mass: {:?} g/mol", water.molar_mass());
/// ```
pub mod molecule;
/// Module to parse chemical formulas into element counts and calculate molar mass
///
///  # Examples
/// ```
/// use ChemSieve::Chemistry::molmass::{molar_mass_of_formula, parse_formula};
/// let counts = parse_formula("Na(NO3)2").unwrap();
/// println!("{:?}", counts);
/// let molar_mass = molar_mass_of_formula("C6H8O6").unwrap();
/// assert!((molar_mass - 176.12).abs() < 1e-2);
/// ```
pub mod molmass;
/// amounts of a molecule in moles or grams, and concentrations
pub mod quantity;
/// reagent and product terms and the equations built from them
pub mod equation;
/// integer balancing of equations
///
/// # Examples
/// ```
/// use ChemSieve::Chemistry::element::Element;
/// use ChemSieve::Chemistry::equation::{Product, Reagent};
/// use ChemSieve::Chemistry::molecule::Molecule;
/// let co = Molecule::from_formula("CO").unwrap();
/// let o2 = Molecule::from_formula("O2").unwrap();
/// let eq = Reagent::new(co).yields(Product::new(Element::new(6)) + Product::new(o2));
/// let balanced = eq.balance().unwrap();
/// assert_eq!(balanced.to_string(), "2CO -> 2C + O2");
/// ```
pub mod balancer;
/// ledger of species quantities in one solution, tied to a balanced equation
///
/// # Examples
/// ```
/// use ChemSieve::Chemistry::element::Element;
/// use ChemSieve::Chemistry::equation::{Product, Reagent};
/// use ChemSieve::Chemistry::molecule::Molecule;
/// use ChemSieve::Chemistry::quantity::Quantity;
/// use ChemSieve::Chemistry::sieve::Sieve;
/// let co = Molecule::from_formula("CO").unwrap();
/// let c = Molecule::from(Element::new(6));
/// let eq = Reagent::new(co.clone())
///     .yields(Product::new(c.clone()) + Product::new(Molecule::from_formula("O2").unwrap()))
///     .balance()
///     .unwrap();
/// let sieve = Sieve::new(eq, 100.0, vec![Quantity::grams(co.clone(), 20.0).unwrap()]).unwrap();
/// let sieve = sieve.merge(vec![Quantity::grams(co, 70.0).unwrap()]).unwrap();
/// println!("{}", sieve.query(&c).unwrap());
/// ```
pub mod sieve;
/// error types
pub mod chem_errors;

mod balancer_tests;
