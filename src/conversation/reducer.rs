// Conversation state reducer
//
// Pure transitions over the session's conversation bookkeeping. No I/O
// happens here; persistence is scheduled separately by the session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::prompts::{ConversationState, Page, QueryStatus, StateClassifier, TemplateContext};

/// Layout version of the persisted state. Stored state with any other
/// version is discarded on load; state without one is read as current.
pub const STATE_VERSION: u32 = 1;

fn current_version() -> u32 {
    STATE_VERSION
}

/// Who sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One message in the rendered history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "type")]
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

/// Everything the hosting UI tracks about the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationContextState {
    #[serde(default = "current_version")]
    pub version: u32,
    #[serde(default)]
    pub conversation_state: ConversationState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_context: Option<TemplateContext>,
    #[serde(default)]
    pub current_page: Page,
    #[serde(default)]
    pub message_history: Vec<HistoryEntry>,
}

impl Default for ConversationContextState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION,
            conversation_state: ConversationState::default(),
            template_context: None,
            current_page: Page::Home,
            message_history: Vec::new(),
        }
    }
}

/// Partial update of `ConversationState`; `None` leaves a field alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversationStatePatch {
    pub has_viewed_templates: Option<bool>,
    pub has_submitted_query: Option<bool>,
    pub has_active_query: Option<bool>,
    pub has_completed_query: Option<bool>,
    pub has_viewed_results: Option<bool>,
    pub last_query_status: Option<QueryStatus>,
    pub available_templates: Option<u32>,
    pub ready_templates: Option<u32>,
    pub recent_template_categories: Option<Vec<String>>,
    pub current_page: Option<Page>,
    pub conversation_length: Option<usize>,
}

impl ConversationStatePatch {
    pub fn apply(self, state: &mut ConversationState) {
        if let Some(v) = self.has_viewed_templates {
            state.has_viewed_templates = v;
        }
        if let Some(v) = self.has_submitted_query {
            state.has_submitted_query = v;
        }
        if let Some(v) = self.has_active_query {
            state.has_active_query = v;
        }
        if let Some(v) = self.has_completed_query {
            state.has_completed_query = v;
        }
        if let Some(v) = self.has_viewed_results {
            state.has_viewed_results = v;
        }
        if let Some(v) = self.last_query_status {
            state.last_query_status = Some(v);
        }
        if let Some(v) = self.available_templates {
            state.available_templates = v;
        }
        if let Some(v) = self.ready_templates {
            state.ready_templates = v;
        }
        if let Some(v) = self.recent_template_categories {
            state.recent_template_categories = v;
        }
        if let Some(v) = self.current_page {
            state.current_page = v;
        }
        if let Some(v) = self.conversation_length {
            state.conversation_length = v;
        }
    }
}

/// State transitions
#[derive(Debug, Clone, PartialEq)]
pub enum ConversationAction {
    UpdateConversationState(ConversationStatePatch),
    UpdateTemplateContext(TemplateContext),
    SetCurrentPage(Page),
    AddMessage {
        role: Role,
        content: String,
        timestamp: DateTime<Utc>,
    },
    ResetConversation,
}

/// Apply one action.
///
/// `AddMessage` runs the message text through `classifier` and bumps the
/// running message count. Reset keeps the current page.
pub fn reduce(
    mut state: ConversationContextState,
    action: ConversationAction,
    classifier: &dyn StateClassifier,
) -> ConversationContextState {
    match action {
        ConversationAction::UpdateConversationState(patch) => {
            patch.apply(&mut state.conversation_state);
        }
        ConversationAction::UpdateTemplateContext(ctx) => {
            state.conversation_state.available_templates = ctx.total_templates;
            state.conversation_state.ready_templates = ctx.ready_templates;
            state.conversation_state.recent_template_categories =
                ctx.categories.iter().cloned().collect();
            state.template_context = Some(ctx);
        }
        ConversationAction::SetCurrentPage(page) => {
            state.current_page = page;
            state.conversation_state.current_page = page;
        }
        ConversationAction::AddMessage {
            role,
            content,
            timestamp,
        } => {
            classifier
                .classify(&content)
                .apply(&mut state.conversation_state);
            state.conversation_state.conversation_length += 1;
            state.message_history.push(HistoryEntry {
                role,
                content,
                timestamp,
            });
        }
        ConversationAction::ResetConversation => {
            let page = state.current_page;
            state = ConversationContextState::default();
            state.current_page = page;
            state.conversation_state.current_page = page;
        }
    }
    state
}
