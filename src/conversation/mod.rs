// Conversation state management
//
// Reducer, persistence and the session that ties them together.

pub mod reducer;
pub mod session;
pub mod store;
pub mod writer;

pub use reducer::{
    reduce, ConversationAction, ConversationContextState, ConversationStatePatch, HistoryEntry,
    Role, STATE_VERSION,
};
pub use session::ConversationSession;
pub use store::{
    load_or_default, snapshot_for_persistence, FileStateStore, MemoryStateStore, StateStore,
    MAX_PERSISTED_MESSAGES, STORAGE_KEY,
};
pub use writer::DebouncedWriter;
