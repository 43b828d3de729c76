pub mod format;

pub use format::{page_envelope, record_link, PageLinks};
