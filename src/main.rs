use clap::Parser;
use todo_app::cli::commands::Cli;
use todo_app::cli::handlers;

fn main() {
    let cli = Cli::parse();
    // No subcommand launches the terminal UI
    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
