pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod pagination;
pub mod rating;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::services::admin::{AdminSeeder, SeedOutcome};
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_reset_db() -> Result<()> {
    let pool = database::create_pool(&database::database_path())?;
    let mut conn = database::get_connection(&pool)?;
    database::setup::reset_database(&mut conn)
}

pub fn handle_seed_admin(username: &str, password: &str) -> Result<()> {
    let pool = database::create_pool(&database::database_path())?;
    let seeder = AdminSeeder::new(pool, AppConfig::new());

    match seeder.run(username, password)? {
        SeedOutcome::Created => println!("Admin user created"),
        SeedOutcome::AlreadyExists => println!("Admin user already exists"),
    }

    Ok(())
}
