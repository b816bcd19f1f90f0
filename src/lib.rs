//! Masthead: a small blog board that keeps every post in one JSON file and
//! renders server-side HTML.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
pub mod util;
