//! Catalog domain model: value objects and entities.
//!
//! These types are OUR types - provider payloads and database rows get
//! converted into them at the boundaries, so code holding a [`Track`] or an
//! [`Isrc`] never re-checks invariants. Construction is the only way in, and
//! construction validates.

pub mod album;
pub mod artist;
pub mod duration;
pub mod isrc;
pub mod track;

pub use album::{Album, AlbumKey};
pub use artist::Artist;
pub use duration::Duration;
pub use isrc::Isrc;
pub use track::Track;

/// Errors from constructing or linking domain values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid ISRC code: {0:?}")]
    InvalidIsrc(String),

    #[error("duration cannot be negative, got {0}")]
    NegativeDuration(i64),

    #[error("artist name cannot be empty")]
    EmptyArtistName,

    #[error("{entity} must credit at least one artist")]
    NoArtists { entity: &'static str },

    #[error("{entity} must be persisted before it can be linked")]
    MissingIdentity { entity: &'static str },
}
