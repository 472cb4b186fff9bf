// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs parses arguments,
// loads the campus graph once, and dispatches to these handlers.

pub mod listing;
pub mod route;
pub mod traffic;
