use super::cli_examples::{examples_menu, get_user_input};
use crate::Chemistry::equation::Equation;
use crate::settings::SettingsManager;
use std::io::{self, Write};

pub fn run_interactive_menu(settings: &mut SettingsManager) {
    loop {
        show_main_menu();
        let choice = get_user_input();

        match choice.trim() {
            "1" => balance_menu(settings),
            "2" => examples_menu(settings),
            "3" => settings_menu(settings),
            // end of input
            "0" | "" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}
/* colors
Blue (\x1b[34m) - Welcome header text
Yellow (\x1b[33m) - Menu options
Cyan (\x1b[36m) - "Enter your choice:" prompt
Reset (\x1b[0m) - Returns to normal color after each colored section
*/
fn show_main_menu() {
    println!("\x1b[34m\n Welcome to ChemSieve: balancing of reaction equations and stoichiometric ledgers\n \x1b[0m");
    println!("\x1b[33m1. Balance an equation\x1b[0m");
    println!("\x1b[33m2. Examples\x1b[0m");
    println!("\x1b[33m3. Settings\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    let _ = io::stdout().flush();
}

fn balance_menu(settings: &SettingsManager) {
    print!("Equation (e.g. H2 + O2 -> H2O): ");
    let _ = io::stdout().flush();
    let input = get_user_input();
    let balanced = input
        .trim()
        .parse::<Equation>()
        .and_then(|eq| settings.balancer().balance(&eq));
    match balanced {
        Ok(eq) => println!("{}", eq),
        Err(e) => println!("{}", e),
    }
}

fn settings_menu(settings: &mut SettingsManager) {
    println!("\n=== Settings ({}) ===", settings.config_file());
    println!("{:#?}", settings.get_config());
    print!("New max coefficient (empty to keep): ");
    let _ = io::stdout().flush();
    let input = get_user_input();
    let input = input.trim();
    if input.is_empty() {
        return;
    }
    let result = match input.parse::<u32>() {
        Ok(max) => settings.set_max_coefficient(Some(max)),
        Err(e) => Err(e.into()),
    };
    if let Err(e) = result {
        println!("Settings not changed: {}", e);
    }
}
