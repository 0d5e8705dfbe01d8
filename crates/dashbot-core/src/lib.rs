//! Core domain types for dashbot: screen geometry, the closed action set,
//! pattern bindings and startup configuration.

pub mod action;
pub mod binding;
pub mod config;
pub mod geometry;

pub use action::{ActionKind, Swipe};
pub use binding::PatternBinding;
pub use config::BotConfig;
pub use geometry::{Point, Region};
