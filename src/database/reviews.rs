use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{OptionalExtension, params};

use super::connection::DbConn;
use crate::domain::{BookId, Review, ReviewId, UserId};

pub fn insert_review(
    conn: &mut DbConn,
    book_id: BookId,
    reviewer_id: UserId,
    rating: i64,
    review_text: &str,
    created_at: NaiveDateTime,
) -> Result<Review> {
    let sql = "INSERT INTO reviews (book_id, reviewer_id, rating, review_text, created_at) VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id, book_id, reviewer_id, rating, review_text, created_at";

    conn.query_row(
        sql,
        params![book_id, reviewer_id, rating, review_text, created_at],
        parse_review_row,
    )
    .context("Failed to insert new review")
}

pub fn find_by_id(conn: &mut DbConn, id: ReviewId) -> Result<Option<Review>> {
    let sql = "SELECT id, book_id, reviewer_id, rating, review_text, created_at FROM reviews WHERE id = ?1";

    conn.query_row(sql, params![id], parse_review_row)
        .optional()
        .context("Failed to query review by id")
}

pub fn list_by_book(conn: &mut DbConn, book_id: BookId) -> Result<Vec<Review>> {
    let sql = "SELECT id, book_id, reviewer_id, rating, review_text, created_at FROM reviews WHERE book_id = ?1 ORDER BY created_at DESC, id DESC";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![book_id], parse_review_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Reviews for a book joined with the reviewer's username, newest first.
pub fn list_by_book_with_reviewer(
    conn: &mut DbConn,
    book_id: BookId,
) -> Result<Vec<(Review, String)>> {
    let sql = "
        SELECT r.id, r.book_id, r.reviewer_id, r.rating, r.review_text, r.created_at, u.username
        FROM reviews r
        JOIN users u ON r.reviewer_id = u.id
        WHERE r.book_id = ?1
        ORDER BY r.created_at DESC, r.id DESC
    ";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params![book_id], |row| {
            Ok((parse_review_row(row)?, row.get::<_, String>(6)?))
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn delete(conn: &mut DbConn, id: ReviewId) -> Result<()> {
    conn.execute("DELETE FROM reviews WHERE id = ?1", params![id])
        .context("Failed to delete review")
        .map(|_| ())
}

fn parse_review_row(row: &rusqlite::Row) -> rusqlite::Result<Review> {
    Ok(Review {
        id: row.get(0)?,
        book_id: row.get(1)?,
        reviewer_id: row.get(2)?,
        rating: row.get(3)?,
        review_text: row.get(4)?,
        created_at: row.get(5)?,
    })
}
