// Chat modes
//
// Customer-support and technical-expert personalities and the state that
// tracks which one is active.

pub mod config;
pub mod preferences;
pub mod state;

pub use config::{
    quick_actions, welcome_message, ChatMode, ChatModeConfig, QuickAction, ResponseFormat,
    ResponseStyle, Tone, Verbosity,
};
pub use preferences::{EmployeeRole, PreferencesPatch, TechnicalLevel, UserPreferences};
pub use state::{
    ApiMethodRef, ChatMessage, ChatModeState, CustomerSupportContext, MessageMetadata,
    TechnicalContext,
};
