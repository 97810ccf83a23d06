#[allow(non_snake_case)]
pub mod Chemistry;
#[allow(non_snake_case)]
pub mod Examples;
pub mod cli;
pub mod settings;
