use anyhow::Result;
use colored::Colorize;

use book_review_backend::cli::Command;
use book_review_backend::{handle_reset_db, handle_seed_admin, handle_serve, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("{} {e:#}", "Error:".red());
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::ResetDb => handle_reset_db(),
        Command::SeedAdmin { username, password } => handle_seed_admin(username, password),
    }
}
