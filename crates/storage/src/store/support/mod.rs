#![forbid(unsafe_code)]

mod fields;
mod task_tx;
mod time;

pub(crate) use fields::*;
pub(crate) use task_tx::*;
pub(crate) use time::now_ts;
