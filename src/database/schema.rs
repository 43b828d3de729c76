use serde_json::{Map, Value};

/// A flat record as it travels between the HTTP layer and the store.
pub type Record = Map<String, Value>;

/// One declared field of a resource schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub required: bool,
}

impl Field {
    pub const fn required(name: &'static str) -> Self {
        Self { name, required: true }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self { name, required: false }
    }
}

/// Field whitelist with required/optional flags.
///
/// Only presence is checked; a value of the wrong type passes and is left
/// for the store to accept or reject.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    fields: &'static [Field],
}

impl Schema {
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static Field> {
        self.fields.iter()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// True when every required field is present (and not null).
    /// Unknown extra fields are allowed here; they are dropped on write.
    pub fn validate(&self, record: &Record) -> bool {
        self.missing_fields(record).is_empty()
    }

    pub fn missing_fields(&self, record: &Record) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.required && record.get(f.name).map_or(true, Value::is_null))
            .map(|f| f.name)
            .collect()
    }

    /// Copy of `record` reduced to the keys this schema declares.
    pub fn extract_valid_fields(&self, record: &Record) -> Record {
        self.fields
            .iter()
            .filter_map(|f| record.get(f.name).map(|v| (f.name.to_string(), v.clone())))
            .collect()
    }
}
