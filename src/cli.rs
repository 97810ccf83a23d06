/// interactive menu of the binary
pub mod cli_main;
/// menu of worked examples
pub mod cli_examples;
