//! Artist row operations.

use sqlx::SqliteConnection;

use crate::domain::{Artist, ValidationError};

/// Stored artist row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ArtistRow {
    pub id: i64,
    pub name: String,
}

impl ArtistRow {
    /// Map the row into the domain entity, revalidating at the boundary.
    pub fn into_artist(self) -> Result<Artist, ValidationError> {
        Ok(Artist::new(self.name)?.with_id(self.id))
    }
}

/// Look up an artist by exact name match.
pub async fn find_artist_by_name(
    conn: &mut SqliteConnection,
    name: &str,
) -> sqlx::Result<Option<ArtistRow>> {
    sqlx::query_as::<_, ArtistRow>("SELECT id, name FROM artists WHERE name = ?")
        .bind(name)
        .fetch_optional(conn)
        .await
}

/// Insert an artist row and return its id.
///
/// Tolerates a conflicting insert of the same name: the stored id is
/// returned either way, so a lost dedup race cannot duplicate the row.
pub async fn insert_artist(conn: &mut SqliteConnection, name: &str) -> sqlx::Result<i64> {
    let row: (i64,) = sqlx::query_as(
        r#"
        INSERT INTO artists (name) VALUES (?)
        ON CONFLICT(name) DO UPDATE SET name = excluded.name
        RETURNING id
        "#,
    )
    .bind(name)
    .fetch_one(conn)
    .await?;

    Ok(row.0)
}
