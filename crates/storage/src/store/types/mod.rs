#![forbid(unsafe_code)]

mod audit;
mod tags;
mod tasks;
mod users;

pub use audit::*;
pub use tags::*;
pub use tasks::*;
pub use users::*;
