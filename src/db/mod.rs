//! Catalog persistence on SQLite.
//!
//! Uses SQLx with SQLite for lightweight, embedded storage of the music
//! catalog: tracks, albums, artists, their join tables, and the backlog of
//! unresolved ISRCs.
//!
//! Row access is split per entity (`artists`, `albums`, `tracks`, `backlog`).
//! Every row function takes a `&mut SqliteConnection` so that a dedup lookup
//! and the insert that follows it compose inside one caller-owned
//! transaction; services decide where transactions begin and end.
//!
//! # Example
//!
//! ```ignore
//! use isrc_minder::db::{self, tracks};
//!
//! let pool = db::init_db("sqlite:catalog.db").await?;
//! let mut conn = pool.acquire().await?;
//! let track = tracks::get_track_by_isrc(&mut conn, &isrc).await?;
//! ```

pub mod albums;
pub mod artists;
pub mod backlog;
pub mod tracks;

use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

/// Default database filename.
pub const DEFAULT_DB_NAME: &str = "isrc_minder.db";

/// Build a SQLite database URL from an optional path.
///
/// If no path is provided, uses [`DEFAULT_DB_NAME`] in the current directory.
pub fn db_url(path: Option<&std::path::Path>) -> String {
    match path {
        Some(p) => format!("sqlite:{}", p.display()),
        None => format!("sqlite:{}", DEFAULT_DB_NAME),
    }
}

/// Initialize the database connection pool and run migrations.
///
/// Creates the database file if it doesn't exist, establishes a connection
/// pool with up to 5 connections, and runs all pending migrations.
///
/// # Errors
///
/// Returns an error if:
/// - Database creation fails
/// - Connection cannot be established
/// - Migration fails
pub async fn init_db(db_url: &str) -> Result<SqlitePool, sqlx::Error> {
    if !sqlx::Sqlite::database_exists(db_url).await.unwrap_or(false) {
        sqlx::Sqlite::create_database(db_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(db_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
