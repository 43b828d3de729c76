use super::{Resource, ResourceKind};
use crate::database::schema::{Field, Schema};

pub const ALBUM_SCHEMA: Schema = Schema::new(&[
    Field::required("id"),
    Field::required("date"),
    Field::optional("name"),
    Field::required("songs"),
    Field::required("cover"),
]);

pub static ALBUMS: Resource = Resource {
    kind: ResourceKind::Albums,
    name: "albums",
    singular: "album",
    table: "album",
    schema: ALBUM_SCHEMA,
    owner_column: Some("ownerid"),
};
