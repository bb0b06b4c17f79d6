use anyhow::{Context, Result};
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use crate::domain::{User, UserId};

pub fn insert_user(
    conn: &mut DbConn,
    username: &str,
    password_hash: &str,
    is_admin: bool,
) -> Result<User> {
    let sql = "INSERT INTO users (username, password_hash, is_admin) VALUES (?1, ?2, ?3) RETURNING id, username, password_hash, is_admin, created_at";

    conn.query_row(sql, params![username, password_hash, is_admin], parse_user_row)
        .context("Failed to insert new user")
}

pub fn find_by_username(conn: &mut DbConn, username: &str) -> Result<Option<User>> {
    let sql = "SELECT id, username, password_hash, is_admin, created_at FROM users WHERE username = ?1";

    conn.query_row(sql, params![username], parse_user_row)
        .optional()
        .context("Failed to query user by username")
}

pub fn find_by_id(conn: &mut DbConn, id: UserId) -> Result<Option<User>> {
    let sql = "SELECT id, username, password_hash, is_admin, created_at FROM users WHERE id = ?1";

    conn.query_row(sql, params![id], parse_user_row)
        .optional()
        .context("Failed to query user by id")
}

pub fn list_all(conn: &mut DbConn) -> Result<Vec<User>> {
    let sql = "SELECT id, username, password_hash, is_admin, created_at FROM users ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_user_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

fn parse_user_row(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        is_admin: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    #[test]
    fn insert_and_find_back() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();

        let user = insert_user(&mut conn, "frodo", "hash", false).unwrap();
        assert!(!user.is_admin);

        let found = find_by_username(&mut conn, "frodo").unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.password_hash, "hash");

        assert!(find_by_id(&mut conn, user.id).unwrap().is_some());
        assert!(find_by_username(&mut conn, "sam").unwrap().is_none());
    }

    #[test]
    fn duplicate_username_is_rejected_by_the_unique_index() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();

        insert_user(&mut conn, "frodo", "hash", false).unwrap();
        assert!(insert_user(&mut conn, "frodo", "other", false).is_err());
    }

    #[test]
    fn list_all_returns_every_account() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();

        insert_user(&mut conn, "frodo", "hash", false).unwrap();
        insert_user(&mut conn, "gandalf", "hash", true).unwrap();

        let users = list_all(&mut conn).unwrap();
        assert_eq!(users.len(), 2);
        assert!(users.iter().any(|u| u.username == "gandalf" && u.is_admin));
    }
}
