//! Resource descriptors: one per catalog table, consumed by the generic accessor.

use crate::database::schema::Schema;

pub mod album;
pub mod artist;
pub mod label;
pub mod song;
pub mod user;

pub use album::ALBUMS;
pub use artist::ARTISTS;
pub use label::LABELS;
pub use song::SONGS;
pub use user::USERS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Songs,
    Albums,
    Artists,
    Labels,
    Users,
}

/// Everything the accessor and routes need to know about one resource.
#[derive(Debug)]
pub struct Resource {
    pub kind: ResourceKind,
    /// Route segment, and the key holding rows in a page envelope
    pub name: &'static str,
    /// Key used for the link to a single record
    pub singular: &'static str,
    pub table: &'static str,
    pub schema: Schema,
    pub owner_column: Option<&'static str>,
}

impl Resource {
    /// Base path of the collection, e.g. `/songs`
    pub fn path(&self) -> String {
        format!("/{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_schema_declares_id() {
        for resource in [&SONGS, &ALBUMS, &ARTISTS, &LABELS, &USERS] {
            assert!(resource.schema.contains("id"), "{} lacks id", resource.name);
        }
    }

    #[test]
    fn owner_columns() {
        assert_eq!(SONGS.owner_column, Some("ownerid"));
        assert_eq!(ALBUMS.owner_column, Some("ownerid"));
        assert_eq!(ARTISTS.owner_column, Some("ownerid"));
        assert_eq!(LABELS.owner_column, Some("ownerID"));
        assert_eq!(USERS.owner_column, None);
    }
}
