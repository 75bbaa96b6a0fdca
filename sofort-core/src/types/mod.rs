//! Core types used across the SOFORT client.

mod notification;
mod params;
mod problem;
mod query;
mod response;
mod transaction;
mod value;

pub use notification::*;
pub use params::*;
pub use problem::*;
pub use query::*;
pub use response::*;
pub use transaction::*;
pub use value::*;
