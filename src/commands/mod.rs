//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and runs against a [`NotesSource`](crate::api::NotesSource).

pub mod browse;
pub mod config;
pub mod create;
pub mod list;

// Re-export execute functions for convenience
pub use browse::execute as browse;
pub use config::execute as config;
pub use create::execute as create;
pub use list::execute as list;
