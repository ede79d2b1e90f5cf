//! Application wiring for the Capsule CLI.

mod context;
mod session_file;

pub use context::AppContext;
