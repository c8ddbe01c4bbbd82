// Wire types for the demo API

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::modes::{ApiMethodRef, MessageMetadata};
use crate::prompts::TemplateSummary;
use crate::technical::CodeExample;

pub const ENHANCED_CHAT_PATH: &str = "/api/enhanced-chat";
pub const SUPPORT_ASSESS_PATH: &str = "/api/customer-support/assess";
pub const TECHNICAL_QUERY_PATH: &str = "/api/technical-expert/query";
pub const LIST_TEMPLATES_PATH: &str = "/api/mcp/habu_list_templates";
pub const ENHANCED_TEMPLATES_PATH: &str = "/api/mcp/habu_enhanced_templates";
pub const LIST_PARTNERS_PATH: &str = "/api/mcp/habu_list_partners";
pub const HEALTH_PATH: &str = "/api/health";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnhancedChatRequest {
    pub user_input: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportAssessRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_size: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalRequestContext {
    pub programming_language: String,
    pub use_case: String,
    pub error_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TechnicalQueryRequest {
    pub query: String,
    pub context: TechnicalRequestContext,
}

/// One body per chat endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum ChatRequest {
    Enhanced(EnhancedChatRequest),
    Support(SupportAssessRequest),
    Technical(TechnicalQueryRequest),
}

impl ChatRequest {
    pub fn path(&self) -> &'static str {
        match self {
            ChatRequest::Enhanced(_) => ENHANCED_CHAT_PATH,
            ChatRequest::Support(_) => SUPPORT_ASSESS_PATH,
            ChatRequest::Technical(_) => TECHNICAL_QUERY_PATH,
        }
    }

    pub(crate) fn body(&self) -> serde_json::Result<Value> {
        match self {
            ChatRequest::Enhanced(r) => serde_json::to_value(r),
            ChatRequest::Support(r) => serde_json::to_value(r),
            ChatRequest::Technical(r) => serde_json::to_value(r),
        }
    }
}

/// Reply from any of the chat endpoints. Every field is optional on the
/// wire; unknown shapes inside the lists are skipped.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ChatReply {
    pub summary: Option<String>,
    pub response: Option<String>,
    pub tools_used: Vec<String>,
    pub confidence_score: Option<f64>,
    pub business_impact: Option<String>,
    pub competitive_advantages: Vec<String>,
    pub suggested_actions: Vec<String>,
    pub code_examples: Vec<Value>,
    pub api_methods: Vec<Value>,
    pub implementation_steps: Vec<String>,
    pub performance_considerations: Vec<String>,
    pub security_guidance: Vec<String>,
}

fn parse_all<T: serde::de::DeserializeOwned>(values: &[Value]) -> Vec<T> {
    values
        .iter()
        .filter_map(|v| serde_json::from_value(v.clone()).ok())
        .collect()
}

impl ChatReply {
    /// Text to display, given which endpoint produced the reply
    pub fn content(&self, request: &ChatRequest) -> String {
        match request {
            ChatRequest::Support(_) => self
                .summary
                .clone()
                .unwrap_or_else(|| "Customer support response".to_string()),
            ChatRequest::Technical(_) => self
                .summary
                .clone()
                .unwrap_or_else(|| "Technical response".to_string()),
            ChatRequest::Enhanced(_) => self
                .response
                .clone()
                .unwrap_or_else(|| "Standard response".to_string()),
        }
    }

    pub fn metadata(&self, processing_time_ms: u64) -> MessageMetadata {
        MessageMetadata {
            is_ai_powered: true,
            query_executed: true,
            processing_time_ms: Some(processing_time_ms),
            tools_used: self.tools_used.clone(),
            confidence_score: self.confidence_score,
            business_impact: self.business_impact.clone(),
            competitive_advantages: self.competitive_advantages.clone(),
            suggested_actions: self.suggested_actions.clone(),
            code_examples: parse_all::<CodeExample>(&self.code_examples),
            api_methods: parse_all::<ApiMethodRef>(&self.api_methods),
            implementation_steps: self.implementation_steps.clone(),
            performance_considerations: self.performance_considerations.clone(),
            security_guidance: self.security_guidance.clone(),
            ..MessageMetadata::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TemplateListing {
    pub count: usize,
    pub templates: Vec<TemplateSummary>,
    pub summary: Option<String>,
    pub mock_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Partner {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PartnerListing {
    pub count: usize,
    pub partners: Vec<Partner>,
    pub summary: Option<String>,
    pub mock_mode: bool,
}

/// Body of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthReport {
    pub status: Option<String>,
    pub mcp_server: Option<String>,
    pub openai_available: bool,
    pub openai_configured: bool,
    pub real_api_mode: bool,
    pub mock_mode: bool,
}
