use ChemSieve::cli::cli_main::run_interactive_menu;
use ChemSieve::settings::SettingsManager;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

pub fn main() {
    let mut settings = SettingsManager::new();
    if let Err(e) = TermLogger::init(
        settings.log_level(),
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logger is not initialised: {}", e);
    }
    run_interactive_menu(&mut settings);
}
