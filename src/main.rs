use FoamFlow::cli::cli_main::run_interactive_menu;
use FoamFlow::cli::cli_simulation::run_from_args;
use log::{LevelFilter, error};
use simplelog::{ColorChoice, Config, SimpleLogger, TermLogger, TerminalMode};

fn init_logging() {
    if TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .is_err()
    {
        let _ = SimpleLogger::init(LevelFilter::Info, Config::default());
    }
}

pub fn main() {
    init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        run_interactive_menu();
        return;
    }
    if let Err(e) = run_from_args(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
