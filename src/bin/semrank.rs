use clap::Parser;
use colored::Colorize;
use semrank_core::cli::{self, Cli};
use semrank_core::exit::PlanExit;

fn main() -> PlanExit {
    let cli = Cli::parse();
    cli::logging::init(cli.verbose);

    let result = if let Some(cmd) = cli.command {
        cli::dispatch::execute(cmd)
    } else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        Ok(PlanExit::Success)
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            PlanExit::from_error(&e)
        }
    }
}
