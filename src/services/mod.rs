//! Catalog services
//!
//! The services own the transaction boundaries: each public operation is
//! atomic on its own, and the `pub(crate)` connection-level helpers let a
//! larger operation compose several steps inside one transaction.

pub mod album;
pub mod artist;
pub mod sync;
pub mod track;

pub use album::AlbumService;
pub use artist::ArtistService;
pub use sync::{SyncReport, SyncService};
pub use track::{TrackListing, TrackService};

use crate::domain::ValidationError;

/// Storage id of an entity that must already have been persisted.
pub(crate) fn require_id(id: Option<i64>, entity: &'static str) -> Result<i64, ValidationError> {
    id.ok_or(ValidationError::MissingIdentity { entity })
}
