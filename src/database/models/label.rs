use super::{Resource, ResourceKind};
use crate::database::schema::{Field, Schema};

pub const LABEL_SCHEMA: Schema = Schema::new(&[
    Field::required("name"),
    Field::required("id"),
    Field::required("ownerID"),
    Field::required("artistsSigned"),
]);

// The owner column doubles as a schema field, so it keeps its mixed case.
pub static LABELS: Resource = Resource {
    kind: ResourceKind::Labels,
    name: "labels",
    singular: "label",
    table: "labels",
    schema: LABEL_SCHEMA,
    owner_column: Some("ownerID"),
};
