//! Application services orchestrating domain logic and the post store.

pub mod clock;
pub mod error;
pub mod posts;
pub mod repos;
