//! Performing artist entity.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// An artist, deduplicated in the catalog by exact (case-sensitive) name.
///
/// The storage id is assigned when the ensure-existent operation first
/// persists the artist; it never appears in serialized output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artist {
    #[serde(skip_serializing)]
    id: Option<i64>,
    name: String,
}

impl Artist {
    /// Build an unstored artist. The name must be non-empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ValidationError::EmptyArtistName);
        }
        Ok(Self { id: None, name })
    }

    /// Attach the storage id assigned by the catalog.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// Accepts both the entity form ({"name": ...}, optionally with an id) and the
// bare name strings that flattened track records carry
impl<'de> Deserialize<'de> for Artist {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Entity {
                #[serde(default)]
                id: Option<i64>,
                name: String,
            },
            Name(String),
        }

        let (id, name) = match Repr::deserialize(deserializer)? {
            Repr::Entity { id, name } => (id, name),
            Repr::Name(name) => (None, name),
        };
        let artist = Artist::new(name).map_err(serde::de::Error::custom)?;
        Ok(match id {
            Some(id) => artist.with_id(id),
            None => artist,
        })
    }
}
