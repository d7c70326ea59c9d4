//! Route handlers organized by resource

pub mod gifts;
pub mod health;
pub mod posts;
