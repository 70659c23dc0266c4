//! Horse show schedule builder.
//!
//! Looks up a list of riders on a Fox Village show roster and collects
//! their ride times into one schedule, ready to publish as JSON.

pub mod app;
pub mod config;
pub mod foxvillage;
pub mod output;
pub mod schedule;
