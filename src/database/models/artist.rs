use super::{Resource, ResourceKind};
use crate::database::schema::{Field, Schema};

pub const ARTIST_SCHEMA: Schema = Schema::new(&[
    Field::required("name"),
    Field::required("id"),
    Field::required("album"),
]);

pub static ARTISTS: Resource = Resource {
    kind: ResourceKind::Artists,
    name: "artists",
    singular: "artist",
    table: "artist",
    schema: ARTIST_SCHEMA,
    owner_column: Some("ownerid"),
};
