// Integration tests for conversation persistence

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use habu_assistant::conversation::{
    load_or_default, ConversationContextState, ConversationSession, DebouncedWriter,
    FileStateStore, Role, StateStore, STATE_VERSION,
};
use habu_assistant::prompts::{ContextualPromptService, Page, TemplateContext};

fn file_session(dir: &std::path::Path, delay: Duration) -> (Arc<FileStateStore>, ConversationSession) {
    let store = Arc::new(FileStateStore::in_dir(dir));
    let initial = load_or_default(store.as_ref());
    let writer = DebouncedWriter::spawn(store.clone(), delay, 10);
    (store, ConversationSession::new(initial).with_writer(writer))
}

#[tokio::test]
async fn test_round_trip_keeps_counters() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (store, mut session) = file_session(dir.path(), Duration::from_millis(1000));

    session.set_current_page(Page::Cleanrooms);
    session.update_template_context(TemplateContext {
        total_templates: 3,
        ready_templates: 2,
        ..TemplateContext::empty()
    });
    for i in 0..14 {
        let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
        session.add_message(role, format!("message {}", i));
    }
    session.add_message(Role::User, "Show me the available templates");
    let before = session.conversation_state().clone();
    session.close().await?;

    assert!(store.path().exists());
    let reloaded = load_or_default(store.as_ref());
    assert_eq!(reloaded.message_history.len(), 10);
    assert_eq!(reloaded.message_history[9].content, "Show me the available templates");
    assert_eq!(reloaded.conversation_state, before);
    assert_eq!(reloaded.conversation_state.conversation_length, 15);
    assert_eq!(reloaded.current_page, Page::Cleanrooms);

    // Reloaded state ranks exactly like the live one
    let engine = ContextualPromptService::builtin();
    assert_eq!(
        engine.generate_contextual_prompts(&reloaded.conversation_state, reloaded.template_context.as_ref(), 5),
        engine.generate_contextual_prompts(&before, reloaded.template_context.as_ref(), 5)
    );
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_writes_after_quiet_period() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (store, mut session) = file_session(dir.path(), Duration::from_millis(1000));

    session.add_message(Role::User, "hello");
    session.add_message(Role::User, "what analytics can I run?");
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!store.path().exists());

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert!(store.path().exists());
    let saved = store.load()?.expect("state saved");
    assert_eq!(saved.conversation_state.conversation_length, 2);

    session.close().await
}

#[test]
fn test_corrupt_file_falls_back_to_defaults() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileStateStore::in_dir(dir.path());
    std::fs::write(store.path(), "{ definitely not json")?;

    let state = load_or_default(&store);
    assert_eq!(state, ConversationContextState::default());
    Ok(())
}

#[test]
fn test_other_version_is_discarded() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileStateStore::in_dir(dir.path());

    let mut stale = ConversationContextState::default();
    stale.version = STATE_VERSION + 1;
    stale.conversation_state.conversation_length = 42;
    store.save(&stale)?;

    let state = load_or_default(&store);
    assert_eq!(state.version, STATE_VERSION);
    assert_eq!(state.conversation_state.conversation_length, 0);
    Ok(())
}

#[test]
fn test_loads_state_written_by_browser_app() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileStateStore::in_dir(dir.path());
    std::fs::write(
        store.path(),
        r#"{
            "conversationState": {
                "hasViewedTemplates": true,
                "hasSubmittedQuery": false,
                "hasActiveQuery": false,
                "hasCompletedQuery": false,
                "hasViewedResults": false,
                "availableTemplates": 3,
                "readyTemplates": 2,
                "currentPage": "cleanrooms",
                "conversationLength": 4,
                "recentTemplateCategories": ["Sentiment Analysis"]
            },
            "currentPage": "cleanrooms",
            "messageHistory": [
                {"type": "user", "content": "Show me templates", "timestamp": "2024-05-01T12:00:00.000Z"}
            ]
        }"#,
    )?;

    let state = load_or_default(&store);
    assert_eq!(state.version, STATE_VERSION);
    assert!(state.conversation_state.has_viewed_templates);
    assert_eq!(state.conversation_state.conversation_length, 4);
    assert_eq!(state.conversation_state.available_templates, 3);
    assert_eq!(state.current_page, Page::Cleanrooms);
    assert_eq!(state.message_history.len(), 1);
    assert_eq!(state.message_history[0].role, Role::User);
    Ok(())
}

#[test]
fn test_clear_removes_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileStateStore::in_dir(dir.path());
    store.save(&ConversationContextState::default())?;
    assert!(store.path().exists());

    store.clear()?;
    assert!(!store.path().exists());
    assert!(store.load()?.is_none());
    Ok(())
}
