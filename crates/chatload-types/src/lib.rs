mod config;
mod error;
mod message;
mod piece;
mod request;
mod response;
mod visit;
mod workload;

pub use config::RunConfig;
pub use error::{Error, Result};
pub use message::{Message, Role};
pub use piece::{ResPiece, ERROR_INDEX};
pub use request::{GenParams, SimReq};
pub use response::{ReqResponse, VisitResponse};
pub use visit::{ScheduledReq, Visit};
pub use workload::{ScheduledVisit, Workload};
