// Chat mode state container
//
// Current mode, the mode-tagged message history, optional per-mode
// context and the user's preferences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::config::{ChatMode, ChatModeConfig};
use super::preferences::{PreferencesPatch, UserPreferences};
use crate::conversation::{Role, MAX_PERSISTED_MESSAGES};
use crate::technical::CodeExample;

/// Background for customer-support answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSupportContext {
    pub common_questions: Vec<String>,
    pub industry_focus: Vec<String>,
    pub customer_tier: String,
    pub support_level: String,
    pub escalation_threshold: u32,
    pub last_update: DateTime<Utc>,
}

/// Background for technical answers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalContext {
    pub available_tools: Vec<String>,
    pub api_version: String,
    pub limitations: Vec<String>,
    pub recent_changes: Vec<String>,
    pub documentation_version: String,
    pub integration_patterns: Vec<String>,
}

/// API method reference attached to a reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMethodRef {
    pub name: String,
    pub endpoint: String,
    pub method: String,
    pub description: String,
}

/// Extra details shown alongside a reply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessageMetadata {
    pub is_ai_powered: bool,
    pub query_executed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,
    pub tools_used: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_validation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_impact: Option<String>,
    pub competitive_advantages: Vec<String>,
    pub suggested_actions: Vec<String>,
    pub code_examples: Vec<CodeExample>,
    pub api_methods: Vec<ApiMethodRef>,
    pub implementation_steps: Vec<String>,
    pub performance_considerations: Vec<String>,
    pub security_guidance: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    #[serde(rename = "type")]
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Mode active when the message was added
    pub mode: ChatMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MessageMetadata>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatModeState {
    pub current_mode: ChatMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_context: Option<CustomerSupportContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technical_context: Option<TechnicalContext>,
    #[serde(default)]
    pub conversation_history: Vec<ChatMessage>,
    #[serde(default)]
    pub preferences: UserPreferences,
}

impl ChatModeState {
    /// Fresh state starting in the preferred mode
    pub fn new(preferences: UserPreferences) -> Self {
        Self {
            current_mode: preferences.default_mode,
            support_context: None,
            technical_context: None,
            conversation_history: Vec::new(),
            preferences,
        }
    }

    /// History is kept across switches
    pub fn switch_mode(&mut self, mode: ChatMode) {
        if mode != self.current_mode {
            tracing::info!("Switching chat mode: {} -> {}", self.current_mode, mode);
            self.current_mode = mode;
        }
    }

    /// Append a message stamped with the current mode
    pub fn add_message(
        &mut self,
        role: Role,
        content: impl Into<String>,
        metadata: Option<MessageMetadata>,
    ) -> &ChatMessage {
        let message = ChatMessage {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            mode: self.current_mode,
            metadata,
        };
        self.conversation_history.push(message);
        &self.conversation_history[self.conversation_history.len() - 1]
    }

    pub fn update_preferences(&mut self, patch: PreferencesPatch) {
        self.preferences.apply(patch);
    }

    pub fn set_support_context(&mut self, context: CustomerSupportContext) {
        self.support_context = Some(context);
    }

    pub fn set_technical_context(&mut self, context: TechnicalContext) {
        self.technical_context = Some(context);
    }

    pub fn current_config(&self) -> ChatModeConfig {
        self.current_mode.config()
    }

    /// Mode system prompt plus whatever context the current mode has
    pub fn system_prompt(&self) -> String {
        let mut prompt = self.current_config().system_prompt.to_string();

        match self.current_mode {
            ChatMode::CustomerSupport => {
                if let Some(ctx) = &self.support_context {
                    prompt.push_str(&format!(
                        "\n\nCurrent Customer Context:\n\
                         - Industry Focus: {}\n\
                         - Customer Tier: {}\n\
                         - Support Level: {}\n\
                         - Escalation Threshold: {}\n\
                         - Last Update: {}",
                        join_or_none(&ctx.industry_focus),
                        ctx.customer_tier,
                        ctx.support_level,
                        ctx.escalation_threshold,
                        ctx.last_update.to_rfc3339()
                    ));
                }
            }
            ChatMode::TechnicalExpert => {
                if let Some(ctx) = &self.technical_context {
                    prompt.push_str(&format!(
                        "\n\nCurrent API Context:\n\
                         - Available Tools: {}\n\
                         - API Version: {}\n\
                         - Recent Changes: {}",
                        ctx.available_tools.len(),
                        ctx.api_version,
                        join_or_none(&ctx.recent_changes)
                    ));
                }
            }
        }

        prompt
    }

    /// Copy suitable for storage: only the most recent messages are kept
    pub fn persisted(&self) -> Self {
        let skip = self
            .conversation_history
            .len()
            .saturating_sub(MAX_PERSISTED_MESSAGES);
        Self {
            conversation_history: self.conversation_history[skip..].to_vec(),
            ..self.clone()
        }
    }
}

impl Default for ChatModeState {
    fn default() -> Self {
        Self::new(UserPreferences::default())
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}
