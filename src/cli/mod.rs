// CLI module
// Public interface for the interactive assistant

mod commands;
mod repl;

pub use commands::{
    format_health, format_reply, format_suggestions, suggestions_for, Command, Suggestion,
};
pub use repl::{load_mode_state, save_mode_state, Repl};
