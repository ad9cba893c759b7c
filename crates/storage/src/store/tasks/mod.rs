#![forbid(unsafe_code)]

mod create;
mod delete;
mod edit;
mod get;
mod restore;
mod search;
mod toggle;
