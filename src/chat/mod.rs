// Chat orchestration and query context

pub mod context;
pub mod service;

pub use context::{extract_context_from_history, extract_query_context, history_before, QueryContext};
pub use service::{AssistantReply, ChatService, ReplySource};
