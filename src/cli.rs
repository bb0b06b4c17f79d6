use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "book-review backend")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Apply the database schema, wiping any existing data
    ResetDb,
    /// Create the admin account if it does not exist yet
    SeedAdmin {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
}
