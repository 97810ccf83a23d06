use crate::Chemistry::chem_errors::ChemResult;
use crate::Chemistry::element::Element;
use crate::Chemistry::equation::{Product, Reagent};
use crate::Chemistry::molecule::Molecule;
use crate::Chemistry::quantity::{Concentration, Quantity};
use crate::Chemistry::sieve::Sieve;
use crate::settings::SettingsManager;
use log::info;

pub fn sieve_examples(task: usize, settings: &SettingsManager) -> ChemResult<()> {
    let balancer = settings.balancer();
    match task {
        0 => {
            // CO decomposition: balance and track CO through the ledger
            let c = Molecule::from(Element::new(6));
            let co = Molecule::from_formula("CO")?;
            let o2 = Molecule::from_formula("O2")?;
            let eq = Reagent::new(co.clone()).yields(Product::new(c.clone()) + Product::new(o2));
            println!("{}", eq);
            let balanced = balancer.balance(&eq)?;
            println!("{}", balanced);

            let sieve = Sieve::new(balanced, 100.0, vec![Quantity::grams(co.clone(), 20.0)?])?;
            println!("{}", sieve);
            let sieve = sieve.merge(vec![Quantity::grams(co.clone(), 70.0)?])?;
            sieve.pretty_print()?;
            println!("{}", sieve.query(&c)?);
            println!("{}", sieve.query(&co)?);
        }
        1 => {
            // titration of Mg(OH)2 with HCl
            let mg = Molecule::from(Element::new(12)).cation();
            let oh = Molecule::from_formula("OH")?.anion();
            let mg_oh2 = Molecule::from_formula("Mg(OH)2")?;
            let hcl = Molecule::from_formula("HCl")?;

            // 0.010 M = n / 11.1 ml
            let c_hcl = Concentration::new(11.1e-3, Quantity::moles(hcl, 0.010 * 11.1e-3)?)?;
            let eq = Reagent::new(mg_oh2).yields(Product::new(mg.clone()) + Product::new(oh.clone()));
            let balanced = balancer.balance(&eq)?;
            info!("titration equation: {}", balanced);

            // HCl is a strong acid, it removes all OH- from the solution
            let sieve = Sieve::new(balanced, 5e-3, vec![c_hcl.content().to(oh.clone())?])?;
            let c_mg = sieve.query(&mg)?;
            let c_oh = sieve.query(&oh)?;
            println!("{}", c_mg);
            println!("{}", c_oh);
            println!(
                "Ks = [Mg+][OH-]^2 = {}",
                c_mg.value()? * c_oh.value()?.powi(2)
            );
        }
        2 => {
            // combustion of propane needs coefficients beyond the atom counts
            let eq = (Reagent::new(Molecule::from_formula("C3H8")?)
                + Reagent::new(Molecule::from_formula("O2")?))
            .yields(
                Product::new(Molecule::from_formula("CO2")?)
                    + Product::new(Molecule::from_formula("H2O")?),
            );
            let balanced = balancer.balance(&eq)?;
            println!("{}", balanced);
            let size = settings.get_config().default_sieve_size;
            let sieve = Sieve::new(
                balanced,
                size,
                vec![Quantity::grams(Molecule::from_formula("C3H8")?, 44.1)?],
            )?;
            sieve.pretty_print()?;
            println!("{}", sieve.query(&Molecule::from_formula("H2O")?)?);
        }
        _ => println!("Unknown example {}", task),
    }
    Ok(())
}
