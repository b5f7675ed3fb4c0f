use super::cli_simulation::{
    print_config_from_file, run_default_simulation, run_from_file_dialog, write_default_config,
};
use std::io::{self, Write};

pub fn run_interactive_menu() {
    loop {
        show_main_menu();
        let Some(choice) = get_user_input() else {
            break;
        };

        match choice.trim() {
            "1" => run_default_simulation(),
            "2" => run_from_file_dialog(),
            "3" => print_config_from_file(),
            "4" => write_default_config(),
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("\x1b[31mUnknown option '{}'\x1b[0m", choice.trim()),
        }
    }
}

fn show_main_menu() {
    println!(
        "\x1b[34m\n FoamFlow: two-layer foam displacement simulator\n
    water-gas flow with foam mobility reduction and interlayer crossflow \n \x1b[0m"
    );
    println!("\x1b[33m1. Run with default parameters\x1b[0m");
    println!("\x1b[33m2. Run from configuration file\x1b[0m");
    println!("\x1b[33m3. Show configuration file\x1b[0m");
    println!("\x1b[33m4. Write default configuration\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    let _ = io::stdout().flush();
}

/// One line from stdin, `None` once stdin is closed.
pub(crate) fn get_user_input() -> Option<String> {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input),
        Err(_) => Some(String::new()),
    }
}
