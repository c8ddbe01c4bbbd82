// Contextual prompts
//
// Suggested next questions ranked against conversation progress, the
// current page and template availability.

pub mod database;
pub mod detector;
pub mod engine;
pub mod template;
pub mod types;

pub use database::{PromptDatabase, PromptPool};
pub use detector::{KeywordClassifier, StateClassifier, StateSignals};
pub use engine::{ContextualPromptService, ScoredPrompt, StateKey, DEFAULT_MAX_PROMPTS};
pub use template::{TemplateStatus, TemplateSummary};
pub use types::{
    ContextualPrompt, ConversationState, Page, PromptCategory, QueryStatus, TemplateContext,
};
