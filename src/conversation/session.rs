// Conversation session
//
// Owns the current conversation state, runs actions through the reducer
// and hands every new state to the debounced writer when persistence is on.

use anyhow::Result;
use chrono::Utc;

use super::reducer::{
    reduce, ConversationAction, ConversationContextState, ConversationStatePatch, Role,
};
use super::writer::DebouncedWriter;
use crate::prompts::{ConversationState, KeywordClassifier, Page, StateClassifier, TemplateContext};

pub struct ConversationSession {
    state: ConversationContextState,
    classifier: Box<dyn StateClassifier>,
    writer: Option<DebouncedWriter>,
}

impl ConversationSession {
    /// Session over `initial` with the per-message keyword rules
    pub fn new(initial: ConversationContextState) -> Self {
        Self {
            state: initial,
            classifier: Box::new(KeywordClassifier::message_rules()),
            writer: None,
        }
    }

    pub fn with_classifier(mut self, classifier: Box<dyn StateClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Persist every change through `writer`
    pub fn with_writer(mut self, writer: DebouncedWriter) -> Self {
        self.writer = Some(writer);
        self
    }

    pub fn state(&self) -> &ConversationContextState {
        &self.state
    }

    pub fn conversation_state(&self) -> &ConversationState {
        &self.state.conversation_state
    }

    pub fn template_context(&self) -> Option<&TemplateContext> {
        self.state.template_context.as_ref()
    }

    pub fn current_page(&self) -> Page {
        self.state.current_page
    }

    pub fn dispatch(&mut self, action: ConversationAction) {
        let current = std::mem::take(&mut self.state);
        self.state = reduce(current, action, self.classifier.as_ref());

        if let Some(writer) = &self.writer {
            writer.schedule(self.state.clone());
        }
    }

    pub fn add_message(&mut self, role: Role, content: impl Into<String>) {
        self.dispatch(ConversationAction::AddMessage {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        });
    }

    pub fn set_current_page(&mut self, page: Page) {
        if page != self.state.current_page {
            tracing::debug!("Page changed: {} -> {}", self.state.current_page, page);
            self.dispatch(ConversationAction::SetCurrentPage(page));
        }
    }

    pub fn update_template_context(&mut self, ctx: TemplateContext) {
        self.dispatch(ConversationAction::UpdateTemplateContext(ctx));
    }

    pub fn update_conversation_state(&mut self, patch: ConversationStatePatch) {
        self.dispatch(ConversationAction::UpdateConversationState(patch));
    }

    pub fn reset(&mut self) {
        self.dispatch(ConversationAction::ResetConversation);
    }

    /// Write pending state and stop the writer
    pub async fn close(self) -> Result<()> {
        match self.writer {
            Some(writer) => writer.shutdown().await,
            None => Ok(()),
        }
    }
}
