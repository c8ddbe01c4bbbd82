// Prompt engine data model
//
// Conversation progress, template availability and the static prompt
// records the scoring engine ranks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Page the user is currently looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Cleanrooms,
    ApiExplorer,
    Architecture,
    SystemHealth,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::Cleanrooms,
        Page::ApiExplorer,
        Page::Architecture,
        Page::SystemHealth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Cleanrooms => "cleanrooms",
            Page::ApiExplorer => "api_explorer",
            Page::Architecture => "architecture",
            Page::SystemHealth => "system_health",
        }
    }

    /// Map a route path or loose tag onto a page (substring match, first hit wins)
    pub fn from_path(path: &str) -> Self {
        let path = path.to_lowercase();
        if path.contains("cleanrooms") {
            Page::Cleanrooms
        } else if path.contains("api") {
            Page::ApiExplorer
        } else if path.contains("architecture") {
            Page::Architecture
        } else if path.contains("health") {
            Page::SystemHealth
        } else {
            Page::Home
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last query status token extracted from message text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryStatus {
    Submitted,
    Running,
    Completed,
    Failed,
    Queued,
}

impl QueryStatus {
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_lowercase().as_str() {
            "submitted" => Some(QueryStatus::Submitted),
            "running" => Some(QueryStatus::Running),
            "completed" => Some(QueryStatus::Completed),
            "failed" => Some(QueryStatus::Failed),
            "queued" => Some(QueryStatus::Queued),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QueryStatus::Submitted => "SUBMITTED",
            QueryStatus::Running => "RUNNING",
            QueryStatus::Completed => "COMPLETED",
            QueryStatus::Failed => "FAILED",
            QueryStatus::Queued => "QUEUED",
        }
    }
}

/// What the user has done so far in this session
///
/// Serialized in camelCase so persisted state keeps the field names the
/// browser front-end wrote.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversationState {
    pub has_viewed_templates: bool,
    pub has_submitted_query: bool,
    pub has_active_query: bool,
    pub has_completed_query: bool,
    pub has_viewed_results: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_query_status: Option<QueryStatus>,
    pub available_templates: u32,
    pub ready_templates: u32,
    pub recent_template_categories: Vec<String>,
    pub current_page: Page,
    /// Running message count; independent of how much history is retained
    pub conversation_length: usize,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_page(mut self, page: Page) -> Self {
        self.current_page = page;
        self
    }
}

/// Summary of which analytics templates exist and what they cover
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateContext {
    pub total_templates: u32,
    pub ready_templates: u32,
    pub missing_dataset_templates: u32,
    pub categories: BTreeSet<String>,
    pub has_location_data: bool,
    pub has_sentiment_analysis: bool,
    pub has_pattern_of_life: bool,
    pub has_combined_analysis: bool,
}

impl TemplateContext {
    /// Context describing an environment with no templates at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// `ready + missing <= total`
    pub fn is_consistent(&self) -> bool {
        self.ready_templates as u64 + self.missing_dataset_templates as u64
            <= self.total_templates as u64
    }
}

/// Coarse purpose of a prompt; drives the workflow score adjustments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptCategory {
    Discovery,
    Execution,
    Monitoring,
    Results,
    Exploration,
    Workflow,
}

/// A suggested next question, as stored in the prompt table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualPrompt {
    pub text: String,
    pub emoji: String,
    /// Higher = more important
    pub priority: i32,
    pub category: PromptCategory,
    #[serde(default)]
    pub requires_templates: bool,
    #[serde(default)]
    pub requires_active_query: bool,
    /// Page tags; matches when the current page tag contains any of them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_specific: Option<Vec<String>>,
}

impl ContextualPrompt {
    pub fn new(
        emoji: impl Into<String>,
        text: impl Into<String>,
        priority: i32,
        category: PromptCategory,
    ) -> Self {
        Self {
            text: text.into(),
            emoji: emoji.into(),
            priority,
            category,
            requires_templates: false,
            requires_active_query: false,
            page_specific: None,
        }
    }

    pub fn requiring_templates(mut self) -> Self {
        self.requires_templates = true;
        self
    }

    pub fn requiring_active_query(mut self) -> Self {
        self.requires_active_query = true;
        self
    }

    pub fn only_on(mut self, pages: &[Page]) -> Self {
        self.page_specific = Some(pages.iter().map(|p| p.as_str().to_string()).collect());
        self
    }

    /// Whether this prompt may be shown for the given state
    pub fn is_applicable(&self, state: &ConversationState) -> bool {
        if self.requires_templates && state.available_templates == 0 {
            return false;
        }
        if self.requires_active_query && !state.has_active_query {
            return false;
        }
        match &self.page_specific {
            Some(tags) => {
                let current = state.current_page.as_str();
                tags.iter().any(|tag| current.contains(tag.as_str()))
            }
            None => true,
        }
    }

    /// Display form: `"{emoji} {text}"`
    pub fn format(&self) -> String {
        format!("{} {}", self.emoji, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_from_path() {
        assert_eq!(Page::from_path("/cleanrooms/123"), Page::Cleanrooms);
        assert_eq!(Page::from_path("/api-explorer"), Page::ApiExplorer);
        assert_eq!(Page::from_path("/architecture"), Page::Architecture);
        assert_eq!(Page::from_path("/system-health"), Page::SystemHealth);
        assert_eq!(Page::from_path("/"), Page::Home);
    }

    #[test]
    fn test_page_serializes_as_tag() {
        let json = serde_json::to_string(&Page::ApiExplorer).unwrap();
        assert_eq!(json, "\"api_explorer\"");
    }

    #[test]
    fn test_prompt_format() {
        let prompt = ContextualPrompt::new("📊", "Show me my templates", 9, PromptCategory::Discovery);
        assert_eq!(prompt.format(), "📊 Show me my templates");
    }

    #[test]
    fn test_applicability_requirements() {
        let state = ConversationState::new();
        let needs_templates =
            ContextualPrompt::new("🎯", "Run it", 10, PromptCategory::Execution).requiring_templates();
        let needs_query = ContextualPrompt::new("⏱️", "Status?", 10, PromptCategory::Monitoring)
            .requiring_active_query();

        assert!(!needs_templates.is_applicable(&state));
        assert!(!needs_query.is_applicable(&state));

        let ready = ConversationState {
            available_templates: 3,
            has_active_query: true,
            ..ConversationState::new()
        };
        assert!(needs_templates.is_applicable(&ready));
        assert!(needs_query.is_applicable(&ready));
    }

    #[test]
    fn test_page_specific_prompt() {
        let prompt = ContextualPrompt::new("💓", "Check health", 5, PromptCategory::Monitoring)
            .only_on(&[Page::SystemHealth]);

        assert!(!prompt.is_applicable(&ConversationState::new()));
        assert!(prompt.is_applicable(&ConversationState::new().on_page(Page::SystemHealth)));
    }

    #[test]
    fn test_page_tag_matches_substring() {
        let prompt: ContextualPrompt = serde_json::from_str(
            r#"{"text": "Try an endpoint", "emoji": "🔧", "priority": 4, "category": "exploration", "pageSpecific": ["api"]}"#,
        )
        .unwrap();

        assert!(prompt.is_applicable(&ConversationState::new().on_page(Page::ApiExplorer)));
        assert!(!prompt.is_applicable(&ConversationState::new().on_page(Page::Cleanrooms)));
    }

    #[test]
    fn test_template_context_consistency() {
        let ctx = TemplateContext {
            total_templates: 4,
            ready_templates: 3,
            missing_dataset_templates: 1,
            ..TemplateContext::empty()
        };
        assert!(ctx.is_consistent());

        let broken = TemplateContext {
            missing_dataset_templates: 2,
            ..ctx
        };
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_conversation_state_camel_case() {
        let state = ConversationState {
            has_viewed_templates: true,
            conversation_length: 3,
            last_query_status: Some(QueryStatus::Running),
            ..ConversationState::new()
        };
        let value = serde_json::to_value(&state).unwrap();
        assert_eq!(value["hasViewedTemplates"], true);
        assert_eq!(value["conversationLength"], 3);
        assert_eq!(value["lastQueryStatus"], "RUNNING");
        assert_eq!(value["currentPage"], "home");
    }
}
