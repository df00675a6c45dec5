//! Backlog of ISRC codes awaiting resolution.

use sqlx::SqliteConnection;

use crate::domain::Isrc;

/// All pending codes, ordered for deterministic processing.
///
/// Codes come back as raw strings: the store does not guarantee validity,
/// the sync pass revalidates each one.
pub async fn get_backlog(conn: &mut SqliteConnection) -> sqlx::Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as("SELECT code FROM missing_isrcs ORDER BY code")
        .fetch_all(conn)
        .await?;
    Ok(rows.into_iter().map(|(code,)| code).collect())
}

/// Add a code to the backlog. Returns false if it was already pending.
pub async fn insert_backlog_entry(conn: &mut SqliteConnection, isrc: &Isrc) -> sqlx::Result<bool> {
    let result = sqlx::query("INSERT INTO missing_isrcs (code) VALUES (?) ON CONFLICT DO NOTHING")
        .bind(isrc.as_str())
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Remove a resolved code from the backlog.
pub async fn delete_backlog_entry(conn: &mut SqliteConnection, isrc: &Isrc) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM missing_isrcs WHERE code = ?")
        .bind(isrc.as_str())
        .execute(conn)
        .await?;
    Ok(())
}
