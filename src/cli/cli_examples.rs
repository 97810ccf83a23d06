use crate::Examples::sieve_examples::sieve_examples;
use crate::settings::SettingsManager;
use std::io::{self, Write};

pub fn examples_menu(settings: &SettingsManager) {
    loop {
        println!("\n=== Examples ===");
        println!("1. CO decomposition ledger");
        println!("2. Titration of Mg(OH)2");
        println!("3. Propane combustion");
        println!("0. Back to main menu");
        print!("Enter your choice: ");
        let _ = io::stdout().flush();

        let choice = get_user_input();
        let task = match choice.trim() {
            "1" => 0,
            "2" => 1,
            "3" => 2,
            "0" => break,
            _ => {
                println!("Invalid choice. Please try again.");
                continue;
            }
        };
        if let Err(e) = sieve_examples(task, settings) {
            println!("Example failed: {}", e);
        }
    }
}

pub(crate) fn get_user_input() -> String {
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        input.clear();
    }
    input
}
