mod db;
mod error;
mod records;
mod schema;

pub use db::TraceStore;
pub use error::{Error, Result};
pub use records::{PackRecord, RequestStatus, RequestStatusRecord};
pub use schema::SCHEMA_VERSION;
