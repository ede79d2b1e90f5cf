//! Command handlers for the Capsule CLI.

pub mod account;
pub mod entries;
pub mod misc;
