// Chat orchestration
//
// Answers a message either locally, from the support and technical
// generators, or by forwarding it to the mode's remote endpoint.

use std::time::Instant;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::context::{extract_context_from_history, extract_query_context, history_before};
use crate::client::{
    ApiClient, ChatRequest, ClientError, EnhancedChatRequest, SupportAssessRequest, TechnicalQueryRequest,
    TechnicalRequestContext,
};
use crate::modes::{ChatMessage, ChatMode, MessageMetadata, UserPreferences};
use crate::support::{
    format_support_response, parse_intent, support_metadata, SupportQuery,
    SupportResponseGenerator,
};
use crate::technical::{format_technical_response, technical_metadata, TechnicalExpertGenerator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    Local,
    Remote,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssistantReply {
    pub content: String,
    pub metadata: MessageMetadata,
    pub source: ReplySource,
}

pub struct ChatService {
    support: SupportResponseGenerator,
    technical: TechnicalExpertGenerator,
    client: Option<ApiClient>,
}

impl ChatService {
    pub fn new(client: Option<ApiClient>) -> Self {
        Self {
            support: SupportResponseGenerator::builtin(),
            technical: TechnicalExpertGenerator::builtin(),
            client,
        }
    }

    /// Local answers only
    pub fn offline() -> Self {
        Self::new(None)
    }

    pub fn is_online(&self) -> bool {
        self.client.is_some()
    }

    pub fn client(&self) -> Option<&ApiClient> {
        self.client.as_ref()
    }

    pub fn support(&self) -> &SupportResponseGenerator {
        &self.support
    }

    pub fn technical(&self) -> &TechnicalExpertGenerator {
        &self.technical
    }

    /// Answer from the built-in generators
    pub fn process_locally(
        &self,
        message: &str,
        mode: ChatMode,
        preferences: &UserPreferences,
        history: &[ChatMessage],
    ) -> AssistantReply {
        let started = Instant::now();
        let (content, mut metadata) = match mode {
            ChatMode::CustomerSupport => {
                let intent = parse_intent(message, self.support.library());
                let ctx = extract_query_context(message);

                let mut query = SupportQuery::new(message)
                    .with_size(ctx.customer_size)
                    .with_technical_level(preferences.technical_level());
                if let Some(industry) = ctx.industry.or(intent.industry) {
                    query = query.with_industry(industry);
                }
                let recent = extract_context_from_history(history_before(history, message));
                if !recent.is_empty() {
                    query = query.with_context(recent);
                }

                let response = self.support.generate_response(&query);
                (
                    format_support_response(&response, &intent),
                    support_metadata(&response, &intent),
                )
            }
            ChatMode::TechnicalExpert => {
                let response = self.technical.generate_response(message);
                (
                    format_technical_response(&response),
                    technical_metadata(&response),
                )
            }
        };

        metadata.processing_time_ms = Some(started.elapsed().as_millis() as u64);
        tracing::debug!(mode = %mode, "Answered locally");
        AssistantReply {
            content,
            metadata,
            source: ReplySource::Local,
        }
    }

    /// Request body for the mode's endpoint. `None` selects the generic
    /// enhanced-chat endpoint.
    pub fn build_request(message: &str, mode: Option<ChatMode>) -> ChatRequest {
        let ctx = extract_query_context(message);
        match mode {
            Some(ChatMode::CustomerSupport) => ChatRequest::Support(SupportAssessRequest {
                query: message.to_string(),
                industry: Some(ctx.industry_or_general().to_string()),
                customer_size: Some(ctx.customer_size.as_str().to_string()),
            }),
            Some(ChatMode::TechnicalExpert) => ChatRequest::Technical(TechnicalQueryRequest {
                query: message.to_string(),
                context: TechnicalRequestContext {
                    programming_language: ctx.programming_language.to_string(),
                    use_case: ctx.use_case.to_string(),
                    error_type: ctx.error_type.to_string(),
                },
            }),
            None => ChatRequest::Enhanced(EnhancedChatRequest {
                user_input: message.to_string(),
            }),
        }
    }

    /// Forward a message to the remote API. Without a client this falls
    /// back to the local generators.
    pub async fn send(
        &self,
        message: &str,
        mode: ChatMode,
        preferences: &UserPreferences,
        history: &[ChatMessage],
        cancel: &CancellationToken,
    ) -> Result<AssistantReply, ClientError> {
        let Some(client) = &self.client else {
            return Ok(self.process_locally(message, mode, preferences, history));
        };

        let started = Instant::now();
        let request = Self::build_request(message, Some(mode));
        let reply = client.send_chat(&request, cancel).await?;
        let elapsed = started.elapsed().as_millis() as u64;

        Ok(AssistantReply {
            content: reply.content(&request),
            metadata: reply.metadata(elapsed),
            source: ReplySource::Remote,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Role;
    use crate::modes::ChatModeState;

    #[test]
    fn test_local_support_reply() {
        let service = ChatService::offline();
        let reply = service.process_locally(
            "Can we do lookalike modeling for a retail brand?",
            ChatMode::CustomerSupport,
            &UserPreferences::default(),
            &[],
        );
        assert_eq!(reply.source, ReplySource::Local);
        assert!(reply.content.contains("**📋 Requirements**"));
        assert!(reply.content.ends_with("specific industry considerations."));
        assert_eq!(reply.metadata.tools_used, vec!["lookalike"]);
        assert!(reply.metadata.processing_time_ms.is_some());
    }

    #[test]
    fn test_local_technical_reply() {
        let service = ChatService::offline();
        let reply = service.process_locally(
            "Show me the identity resolution API",
            ChatMode::TechnicalExpert,
            &UserPreferences::default(),
            &[],
        );
        assert!(reply.content.starts_with("🔧 **Identity Resolution**"));
        assert_eq!(reply.metadata.api_methods.len(), 1);
    }

    #[test]
    fn test_build_request_per_mode() {
        let support = ChatService::build_request("small finance team", Some(ChatMode::CustomerSupport));
        match support {
            ChatRequest::Support(body) => {
                assert_eq!(body.industry.as_deref(), Some("finance"));
                assert_eq!(body.customer_size.as_deref(), Some("small"));
            }
            other => panic!("unexpected request {:?}", other),
        }

        let technical =
            ChatService::build_request("429 from segment api in ruby", Some(ChatMode::TechnicalExpert));
        match technical {
            ChatRequest::Technical(body) => {
                assert_eq!(body.context.programming_language, "ruby");
                assert_eq!(body.context.use_case, "audience_segmentation");
                assert_eq!(body.context.error_type, "429_rate_limit");
            }
            other => panic!("unexpected request {:?}", other),
        }

        let generic = ChatService::build_request("hi", None);
        assert_eq!(generic.path(), "/api/enhanced-chat");
    }

    #[tokio::test]
    async fn test_send_without_client_is_local() {
        let service = ChatService::offline();
        let mut state = ChatModeState::default();
        state.add_message(Role::User, "earlier question", None);

        let reply = service
            .send(
                "What does identity resolution cost?",
                ChatMode::CustomerSupport,
                &state.preferences,
                &state.conversation_history,
                &CancellationToken::new(),
            )
            .await
            .unwrap();
        assert_eq!(reply.source, ReplySource::Local);
        assert!(reply.content.contains("Pricing Guidance"));
    }
}
