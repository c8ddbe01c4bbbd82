// Integration tests for contextual prompt ranking

use std::io::Write;

use anyhow::Result;
use tempfile::NamedTempFile;

use habu_assistant::cli::suggestions_for;
use habu_assistant::conversation::{ConversationContextState, ConversationSession, Role};
use habu_assistant::modes::ChatMode;
use habu_assistant::prompts::{
    ContextualPromptService, ConversationState, Page, PromptDatabase, TemplateContext,
    TemplateStatus, TemplateSummary,
};

fn top(engine: &ContextualPromptService, session: &ConversationSession) -> String {
    engine
        .generate_contextual_prompts(session.conversation_state(), session.template_context(), 1)
        .into_iter()
        .next()
        .unwrap_or_default()
}

#[test]
fn test_suggestions_follow_the_workflow() {
    let engine = ContextualPromptService::builtin();
    let mut session = ConversationSession::new(ConversationContextState::default());

    let first = engine.generate_contextual_prompts(session.conversation_state(), None, 5);
    assert_eq!(first.len(), 5);
    assert_eq!(first[0], "🤔 What can I do with this cleanroom?");

    session.add_message(Role::User, "What can I do here?");
    session.add_message(Role::Assistant, "Here are your available templates");
    assert!(session.conversation_state().has_viewed_templates);

    session.add_message(Role::Assistant, "Your query was submitted and is running");
    assert!(session.conversation_state().has_active_query);
    assert_eq!(top(&engine, &session), "⏱️ Check my query status");

    session.add_message(
        Role::Assistant,
        "The job completed, here are the results and insights",
    );
    let state = session.conversation_state();
    assert!(state.has_completed_query);
    assert!(!state.has_active_query);
    assert_eq!(top(&engine, &session), "📥 Export my analysis results");
}

#[test]
fn test_template_context_drives_category_pools() {
    let engine = ContextualPromptService::builtin();
    let mut session = ConversationSession::new(ConversationContextState::default());
    session.set_current_page(Page::Cleanrooms);
    session.add_message(Role::Assistant, "Here are the analytics templates available");

    let templates = vec![
        TemplateSummary::new("Brand Sentiment", "Sentiment Analysis", TemplateStatus::Ready),
        TemplateSummary::new("Store Visits", "Location Data", TemplateStatus::MissingDatasets),
    ];
    session.update_template_context(TemplateContext::from_templates(&templates));
    assert_eq!(session.conversation_state().available_templates, 2);

    let prompts = engine.generate_contextual_prompts(
        session.conversation_state(),
        session.template_context(),
        10,
    );
    assert!(prompts.contains(&"📝 Analyze brand sentiment and mentions".to_string()));
    assert!(prompts.contains(&"📱 Analyze mobile location patterns".to_string()));
    assert!(prompts.contains(&"🎯 Run a sentiment analysis".to_string()));
}

#[test]
fn test_prompt_table_from_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"{{"pools": {{"home_welcome": [
            {{"text": "Custom hello", "emoji": "👋", "priority": 5, "category": "discovery"}},
            {{"text": "Needs templates", "emoji": "📦", "priority": 9, "category": "execution", "requiresTemplates": true}}
        ]}}}}"#
    )?;

    let engine = ContextualPromptService::new(PromptDatabase::load_from_file(file.path())?);
    let prompts = engine.generate_contextual_prompts(&ConversationState::new(), None, 5);
    assert_eq!(prompts, vec!["👋 Custom hello".to_string()]);
    Ok(())
}

#[test]
fn test_prompt_table_rejects_unknown_pool() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    write!(file, r#"{{"pools": {{"not_a_pool": []}}}}"#)?;

    let err = PromptDatabase::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse prompt table"));
    Ok(())
}

#[test]
fn test_quick_actions_when_table_is_empty() {
    let engine = ContextualPromptService::new(PromptDatabase::empty());
    let suggestions = suggestions_for(
        &engine,
        &ConversationState::new(),
        None,
        ChatMode::CustomerSupport,
        5,
    );
    let labels: Vec<&str> = suggestions.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "🎯 Lookalike Modeling",
            "⚡ Real-time Attribution",
            "📊 Audience Segmentation",
            "🛡️ Privacy Compliance"
        ]
    );
}
