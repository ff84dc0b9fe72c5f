//! Persistence layer — one SQL statement per operation over the four
//! entities. No transactions span multiple entities.

pub mod evaluations;
pub mod interviews;
pub mod questions;
pub mod users;
