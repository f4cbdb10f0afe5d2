//! Route handlers.

pub mod burndown;
