use serde_json::Value;

use super::{Resource, ResourceKind};
use crate::database::schema::{Field, Record, Schema};

pub const USER_SCHEMA: Schema = Schema::new(&[
    Field::required("id"),
    Field::required("username"),
    Field::required("password"),
    Field::optional("albums"),
    Field::optional("songs"),
    Field::optional("artists"),
]);

pub static USERS: Resource = Resource {
    kind: ResourceKind::Users,
    name: "users",
    singular: "user",
    table: "user",
    schema: USER_SCHEMA,
    owner_column: None,
};

/// List columns a user may replace one at a time.
pub const USER_LIST_FIELDS: [&str; 3] = ["albums", "artists", "songs"];

/// Plaintext comparison against the stored password.
// TODO: switch to salted hashes once existing user rows can be migrated.
pub fn password_matches(user: &Record, password: &str) -> bool {
    matches!(user.get("password"), Some(Value::String(stored)) if stored == password)
}
