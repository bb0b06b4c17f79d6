use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use rusqlite::{OptionalExtension, ToSql, params};

use super::connection::DbConn;
use crate::domain::{Book, BookFilter, BookId, UserId};

pub fn insert_book(
    conn: &mut DbConn,
    title: &str,
    author: &str,
    genre: &str,
    created_by: UserId,
    created_at: NaiveDateTime,
) -> Result<Book> {
    let sql = "INSERT INTO books (title, author, genre, created_by, created_at) VALUES (?1, ?2, ?3, ?4, ?5) RETURNING id, title, author, genre, created_by, created_at";

    conn.query_row(
        sql,
        params![title, author, genre, created_by, created_at],
        parse_book_row,
    )
    .context("Failed to insert new book")
}

pub fn find_by_id(conn: &mut DbConn, id: BookId) -> Result<Option<Book>> {
    let sql = "SELECT id, title, author, genre, created_by, created_at FROM books WHERE id = ?1";

    conn.query_row(sql, params![id], parse_book_row)
        .optional()
        .context("Failed to query book by id")
}

/// One window of the filtered listing, newest first (id breaks ties so
/// same-second inserts page deterministically).
pub fn find_page(
    conn: &mut DbConn,
    filter: &BookFilter,
    skip: usize,
    limit: usize,
) -> Result<Vec<Book>> {
    let (clause, mut args) = filter_clause(filter);
    let sql = format!(
        "SELECT id, title, author, genre, created_by, created_at FROM books{clause} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
    );
    args.push(Box::new(limit as i64));
    args.push(Box::new(skip as i64));

    let mut stmt = conn.prepare(&sql)?;
    let param_refs: Vec<&dyn ToSql> = args.iter().map(|arg| arg.as_ref()).collect();
    let rows = stmt
        .query_map(&param_refs[..], parse_book_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

/// Size of the filtered set, ignoring pagination.
pub fn count(conn: &mut DbConn, filter: &BookFilter) -> Result<usize> {
    let (clause, args) = filter_clause(filter);
    let sql = format!("SELECT COUNT(*) FROM books{clause}");

    let param_refs: Vec<&dyn ToSql> = args.iter().map(|arg| arg.as_ref()).collect();
    let total: i64 = conn
        .query_row(&sql, &param_refs[..], |row| row.get(0))
        .context("Failed to count books")?;

    Ok(total as usize)
}

/// Reviews referencing the book go with it (ON DELETE CASCADE).
pub fn delete(conn: &mut DbConn, id: BookId) -> Result<()> {
    conn.execute("DELETE FROM books WHERE id = ?1", params![id])
        .context("Failed to delete book")
        .map(|_| ())
}

fn filter_clause(filter: &BookFilter) -> (String, Vec<Box<dyn ToSql>>) {
    let mut conditions: Vec<&str> = Vec::new();
    let mut args: Vec<Box<dyn ToSql>> = Vec::new();

    if let Some(genre) = &filter.genre {
        conditions.push("LOWER(genre) LIKE '%' || LOWER(?) || '%'");
        args.push(Box::new(genre.clone()));
    }
    if let Some(author) = &filter.author {
        conditions.push("LOWER(author) LIKE '%' || LOWER(?) || '%'");
        args.push(Box::new(author.clone()));
    }

    let clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    (clause, args)
}

fn parse_book_row(row: &rusqlite::Row) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        genre: row.get(3)?,
        created_by: row.get(4)?,
        created_at: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::database::{reviews, test_pool, users};

    fn day(n: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, n)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn seed_books(conn: &mut DbConn) -> UserId {
        let user = users::insert_user(conn, "frodo", "hash", false).unwrap();
        insert_book(conn, "The Hobbit", "Tolkien", "Fantasy", user.id, day(1)).unwrap();
        insert_book(conn, "Persuasion", "Austen", "Romance", user.id, day(2)).unwrap();
        insert_book(conn, "The Silmarillion", "Tolkien", "Fantasy", user.id, day(3)).unwrap();
        user.id
    }

    #[test]
    fn page_window_is_newest_first() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();
        seed_books(&mut conn);

        let filter = BookFilter::default();
        let window = find_page(&mut conn, &filter, 0, 2).unwrap();
        let titles: Vec<&str> = window.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["The Silmarillion", "Persuasion"]);

        let rest = find_page(&mut conn, &filter, 2, 2).unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].title, "The Hobbit");
    }

    #[test]
    fn filters_match_case_insensitive_substrings() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();
        seed_books(&mut conn);

        let filter = BookFilter {
            genre: Some("fan".to_string()),
            author: None,
        };
        assert_eq!(count(&mut conn, &filter).unwrap(), 2);

        let fantasy = find_page(&mut conn, &filter, 0, 10).unwrap();
        assert!(fantasy.iter().all(|b| b.genre == "Fantasy"));

        let filter = BookFilter {
            genre: Some("fan".to_string()),
            author: Some("TOLK".to_string()),
        };
        assert_eq!(count(&mut conn, &filter).unwrap(), 2);

        let filter = BookFilter {
            genre: Some("romance".to_string()),
            author: Some("tolkien".to_string()),
        };
        assert_eq!(count(&mut conn, &filter).unwrap(), 0);
    }

    #[test]
    fn deleting_a_book_cascades_to_its_reviews() {
        let pool = test_pool();
        let mut conn = pool.get().unwrap();
        let user_id = seed_books(&mut conn);

        let book = find_page(&mut conn, &BookFilter::default(), 0, 1).unwrap()[0].clone();
        reviews::insert_review(&mut conn, book.id, user_id, 5, "a keeper", day(4)).unwrap();
        assert_eq!(reviews::list_by_book(&mut conn, book.id).unwrap().len(), 1);

        delete(&mut conn, book.id).unwrap();

        assert!(find_by_id(&mut conn, book.id).unwrap().is_none());
        assert!(reviews::list_by_book(&mut conn, book.id).unwrap().is_empty());
    }
}
