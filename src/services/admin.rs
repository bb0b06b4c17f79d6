use anyhow::{Result, ensure};
use log::info;

use crate::auth::password;
use crate::config::settings::AppConfig;
use crate::database::{self, DbPool};

#[derive(Debug, PartialEq, Eq)]
pub enum SeedOutcome {
    Created,
    AlreadyExists,
}

/// Seeds the admin account used by the user-management routes.
/// Idempotent: an existing account is left untouched.
pub struct AdminSeeder {
    pool: DbPool,
    config: AppConfig,
}

impl AdminSeeder {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        Self { pool, config }
    }

    pub fn run(&self, username: &str, password_plain: &str) -> Result<SeedOutcome> {
        let settings = &self.config.auth;
        let username = username.trim().to_lowercase();

        ensure!(
            username.chars().count() >= settings.min_username_len,
            "Username must be at least {} characters",
            settings.min_username_len
        );
        ensure!(
            password_plain.chars().count() >= settings.min_password_len,
            "Password must be at least {} characters",
            settings.min_password_len
        );

        let mut conn = database::get_connection(&self.pool)?;
        if database::users::find_by_username(&mut conn, &username)?.is_some() {
            info!("Admin user '{}' already exists", username);
            return Ok(SeedOutcome::AlreadyExists);
        }

        let hash = password::hash_password(password_plain, settings.bcrypt_cost)?;
        let user = database::users::insert_user(&mut conn, &username, &hash, true)?;
        info!("Admin user '{}' created (id {})", user.username, user.id);

        Ok(SeedOutcome::Created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{test_pool, users};

    fn config() -> AppConfig {
        let mut config = AppConfig::new();
        // Minimum bcrypt cost keeps the test fast.
        config.auth.bcrypt_cost = 4;
        config
    }

    #[test]
    fn seeding_is_idempotent() {
        let pool = test_pool();
        let seeder = AdminSeeder::new(pool.clone(), config());

        assert_eq!(
            seeder.run("Gandalf", "speakfriend").unwrap(),
            SeedOutcome::Created
        );
        assert_eq!(
            seeder.run("gandalf", "speakfriend").unwrap(),
            SeedOutcome::AlreadyExists
        );

        let mut conn = pool.get().unwrap();
        let user = users::find_by_username(&mut conn, "gandalf")
            .unwrap()
            .unwrap();
        assert!(user.is_admin);
        assert!(password::verify_password("speakfriend", &user.password_hash).unwrap());
    }

    #[test]
    fn short_credentials_are_rejected() {
        let pool = test_pool();
        let seeder = AdminSeeder::new(pool, config());

        assert!(seeder.run("ab", "speakfriend").is_err());
        assert!(seeder.run("gandalf", "short").is_err());
    }
}
