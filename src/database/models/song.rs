use super::{Resource, ResourceKind};
use crate::database::schema::{Field, Schema};

pub const SONG_SCHEMA: Schema = Schema::new(&[
    Field::required("id"),
    Field::required("name"),
    Field::optional("popularity"),
    Field::required("duration"),
    Field::required("date"),
]);

pub static SONGS: Resource = Resource {
    kind: ResourceKind::Songs,
    name: "songs",
    singular: "song",
    table: "song",
    schema: SONG_SCHEMA,
    owner_column: Some("ownerid"),
};
