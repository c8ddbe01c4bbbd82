// Conversation state persistence
//
// Stores a JSON snapshot of the conversation under a single key. Failures
// never reach the user: loading falls back to defaults, saving logs.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::reducer::{ConversationContextState, STATE_VERSION};

/// Storage key (file stem) of the persisted state
pub const STORAGE_KEY: &str = "habu-conversation-state";

/// Messages kept in a persisted snapshot
pub const MAX_PERSISTED_MESSAGES: usize = 10;

/// Where the conversation snapshot lives
pub trait StateStore: Send + Sync {
    /// Stored state, or `None` when nothing has been saved
    fn load(&self) -> Result<Option<ConversationContextState>>;

    fn save(&self, state: &ConversationContextState) -> Result<()>;

    fn clear(&self) -> Result<()>;
}

/// JSON file store
#[derive(Debug, Clone)]
pub struct FileStateStore {
    path: PathBuf,
}

impl FileStateStore {
    /// Store at `<dir>/habu-conversation-state.json`
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(format!("{}.json", STORAGE_KEY)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> Result<Option<ConversationContextState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read conversation state from {}", self.path.display()))?;
        let state = serde_json::from_str(&raw).context("Failed to parse conversation state JSON")?;
        Ok(Some(state))
    }

    fn save(&self, state: &ConversationContextState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create state directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(state).context("Failed to serialize conversation state")?;
        std::fs::write(&self.path, json)
            .with_context(|| format!("Failed to write conversation state to {}", self.path.display()))?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }
}

/// In-process store holding the serialized JSON, for tests and
/// persistence-disabled sessions
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    slot: Mutex<Option<String>>,
    saves: Mutex<usize>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with raw JSON
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(raw.into())),
            saves: Mutex::new(0),
        }
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|n| *n).unwrap_or(0)
    }

    /// Raw JSON currently stored
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|s| s.clone())
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self) -> Result<Option<ConversationContextState>> {
        let raw = self.raw();
        match raw {
            Some(raw) => {
                let state =
                    serde_json::from_str(&raw).context("Failed to parse conversation state JSON")?;
                Ok(Some(state))
            }
            None => Ok(None),
        }
    }

    fn save(&self, state: &ConversationContextState) -> Result<()> {
        let json = serde_json::to_string(state).context("Failed to serialize conversation state")?;
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow::anyhow!("State store lock poisoned"))?;
        *slot = Some(json);
        if let Ok(mut saves) = self.saves.lock() {
            *saves += 1;
        }
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
        Ok(())
    }
}

/// Load the stored state, falling back to defaults when it is missing,
/// unreadable or written by a different layout version
pub fn load_or_default(store: &dyn StateStore) -> ConversationContextState {
    match store.load() {
        Ok(Some(state)) if state.version == STATE_VERSION => {
            tracing::info!(
                "Loaded conversation state from storage ({} messages)",
                state.message_history.len()
            );
            state
        }
        Ok(Some(state)) => {
            tracing::info!(
                "Discarding stored conversation state (version {}, expected {})",
                state.version,
                STATE_VERSION
            );
            ConversationContextState::default()
        }
        Ok(None) => ConversationContextState::default(),
        Err(e) => {
            tracing::warn!("Failed to load persisted state: {:#}", e);
            ConversationContextState::default()
        }
    }
}

/// Copy of `state` with history cut to the last `max_history` messages.
/// Counters in the conversation state are left untouched.
pub fn snapshot_for_persistence(
    state: &ConversationContextState,
    max_history: usize,
) -> ConversationContextState {
    let skip = state.message_history.len().saturating_sub(max_history);
    ConversationContextState {
        message_history: state.message_history[skip..].to_vec(),
        ..state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::reducer::{HistoryEntry, Role};
    use chrono::Utc;

    fn with_messages(n: usize) -> ConversationContextState {
        let mut state = ConversationContextState::default();
        for i in 0..n {
            state.message_history.push(HistoryEntry {
                role: Role::User,
                content: format!("message {}", i),
                timestamp: Utc::now(),
            });
        }
        state.conversation_state.conversation_length = n;
        state
    }

    #[test]
    fn test_snapshot_truncates_history_only() {
        let state = with_messages(14);
        let snapshot = snapshot_for_persistence(&state, MAX_PERSISTED_MESSAGES);

        assert_eq!(snapshot.message_history.len(), 10);
        assert_eq!(snapshot.message_history[0].content, "message 4");
        assert_eq!(snapshot.conversation_state.conversation_length, 14);
    }

    #[test]
    fn test_snapshot_short_history_untouched() {
        let state = with_messages(3);
        assert_eq!(snapshot_for_persistence(&state, 10), state);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStateStore::new();
        assert!(store.load().unwrap().is_none());

        let state = with_messages(2);
        store.save(&state).unwrap();
        assert_eq!(store.load().unwrap(), Some(state));
        assert_eq!(store.save_count(), 1);

        store.clear().unwrap();
        assert!(store.raw().is_none());
    }

    #[test]
    fn test_corrupt_state_loads_defaults() {
        let store = MemoryStateStore::with_raw("{not json");
        assert_eq!(load_or_default(&store), ConversationContextState::default());
    }

    #[test]
    fn test_version_mismatch_loads_defaults() {
        let store = MemoryStateStore::with_raw(
            r#"{"version": 0, "conversationState": {"hasViewedTemplates": true}, "currentPage": "cleanrooms", "messageHistory": []}"#,
        );
        let state = load_or_default(&store);
        assert!(!state.conversation_state.has_viewed_templates);
        assert_eq!(state.current_page, crate::prompts::Page::Home);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStateStore::in_dir(&dir.path().join("nested"));
        assert!(store.load().unwrap().is_none());

        let state = with_messages(1);
        store.save(&state).unwrap();
        assert!(store.path().ends_with("habu-conversation-state.json"));
        assert_eq!(load_or_default(&store), state);

        store.clear().unwrap();
        assert!(!store.path().exists());
    }
}
