//! Burndown Core Library
//!
//! Domain models and the burndown pipeline: remote board access, sprint
//! calendar, label scoring and the ideal/actual projection.

pub mod board;
pub mod burndown;
pub mod config;
pub mod error;
pub mod scoring;
pub mod sprint;
pub mod trello;

pub use error::{BurndownError, BurndownResult};
