/// interactive main menu
pub mod cli_main;
/// running simulations from the terminal
pub mod cli_simulation;
