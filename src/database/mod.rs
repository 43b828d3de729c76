pub mod accessor;
pub mod manager;
pub mod models;
pub mod pagination;
pub mod postgres;
pub mod schema;
pub mod store;

pub use accessor::Accessor;
pub use manager::{DatabaseError, DatabaseManager};
pub use pagination::{Page, PageWindow};
pub use postgres::PgStore;
pub use schema::{Field, Record, Schema};
pub use store::Store;
