// Conversation progress detection
//
// Keyword heuristics that turn message text into progress signals. The
// matching is approximate: false positives and negatives are expected, so
// the classifier sits behind a trait and can be swapped out.

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{ConversationState, QueryStatus};

static STATUS_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(submitted|running|completed|failed|queued)").expect("status regex is valid")
});

/// Progress signals extracted from a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateSignals {
    pub viewed_templates: bool,
    pub submitted_query: bool,
    pub completed_query: bool,
    pub viewed_results: bool,
    pub query_status: Option<QueryStatus>,
}

impl StateSignals {
    /// Fold these signals into a state.
    ///
    /// Progress flags are only ever raised. `has_active_query` is set on
    /// submission and cleared on completion, completion winning when both
    /// appear in the same text.
    pub fn apply(&self, state: &mut ConversationState) {
        if self.viewed_templates {
            state.has_viewed_templates = true;
        }
        if self.submitted_query {
            state.has_submitted_query = true;
            state.has_active_query = true;
        }
        if self.completed_query {
            state.has_completed_query = true;
            state.has_active_query = false;
        }
        if self.viewed_results {
            state.has_viewed_results = true;
        }
        if let Some(status) = self.query_status {
            state.last_query_status = Some(status);
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == StateSignals::default()
    }
}

/// Turns message text into progress signals
pub trait StateClassifier: Send + Sync {
    fn classify(&self, text: &str) -> StateSignals;
}

/// Substring-based classifier
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    viewed_templates: Vec<String>,
    submitted: Vec<String>,
    completed: Vec<String>,
    viewed_results: Vec<String>,
    extract_status: bool,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

impl KeywordClassifier {
    /// Rules applied to each message as it is added to the conversation
    pub fn message_rules() -> Self {
        Self {
            viewed_templates: words(&["template", "analytics", "available", "enhanced"]),
            submitted: words(&["submitted", "executed", "query id", "running"]),
            completed: words(&["completed", "finished", "success", "ready"]),
            viewed_results: words(&["results", "insights", "findings", "analysis"]),
            extract_status: true,
        }
    }

    /// Rules applied to a window of recent transcript text
    pub fn transcript_rules() -> Self {
        Self {
            viewed_templates: words(&["template", "analytics", "available"]),
            submitted: words(&["submitted", "executed", "running"]),
            completed: words(&["completed", "finished", "results"]),
            viewed_results: words(&["results", "insights", "findings"]),
            extract_status: false,
        }
    }

    fn any_of(text: &str, keywords: &[String]) -> bool {
        keywords.iter().any(|k| text.contains(k.as_str()))
    }

    fn status_token(text: &str) -> Option<QueryStatus> {
        if !(text.contains("status") || text.contains("progress")) {
            return None;
        }
        STATUS_TOKEN
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| QueryStatus::parse(m.as_str()))
    }
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::message_rules()
    }
}

impl StateClassifier for KeywordClassifier {
    fn classify(&self, text: &str) -> StateSignals {
        let text = text.to_lowercase();

        StateSignals {
            viewed_templates: Self::any_of(&text, &self.viewed_templates),
            submitted_query: Self::any_of(&text, &self.submitted),
            completed_query: Self::any_of(&text, &self.completed),
            viewed_results: Self::any_of(&text, &self.viewed_results),
            query_status: if self.extract_status {
                Self::status_token(&text)
            } else {
                None
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_detection() {
        let classifier = KeywordClassifier::message_rules();
        let signals = classifier.classify("Here are your available Templates");
        assert!(signals.viewed_templates);
        assert!(!signals.submitted_query);
    }

    #[test]
    fn test_submission_sets_active() {
        let classifier = KeywordClassifier::message_rules();
        let mut state = ConversationState::new();
        classifier.classify("Query submitted, query ID abc").apply(&mut state);

        assert!(state.has_submitted_query);
        assert!(state.has_active_query);
    }

    #[test]
    fn test_completion_clears_active() {
        let classifier = KeywordClassifier::message_rules();
        let mut state = ConversationState::new();
        classifier.classify("your query is running").apply(&mut state);
        classifier.classify("the query finished").apply(&mut state);

        assert!(state.has_submitted_query);
        assert!(state.has_completed_query);
        assert!(!state.has_active_query);
    }

    #[test]
    fn test_flags_never_revert() {
        let classifier = KeywordClassifier::message_rules();
        let mut state = ConversationState::new();
        classifier.classify("show templates").apply(&mut state);
        classifier.classify("hello there").apply(&mut state);

        assert!(state.has_viewed_templates);
    }

    #[test]
    fn test_status_extraction_requires_status_word() {
        let classifier = KeywordClassifier::message_rules();

        let with_status = classifier.classify("Status update: query is queued");
        assert_eq!(with_status.query_status, Some(QueryStatus::Queued));

        let without = classifier.classify("query is queued");
        assert_eq!(without.query_status, None);
    }

    #[test]
    fn test_status_uses_first_token() {
        let classifier = KeywordClassifier::message_rules();
        let signals = classifier.classify("progress: was running, now completed");
        assert_eq!(signals.query_status, Some(QueryStatus::Running));
    }

    #[test]
    fn test_transcript_rules_differ() {
        let transcript = KeywordClassifier::transcript_rules();
        let message = KeywordClassifier::message_rules();

        // "results" counts as completion only in the transcript rules
        assert!(transcript.classify("here are the results").completed_query);
        assert!(!message.classify("here are the results").completed_query);

        // "enhanced" counts as template viewing only in the message rules
        assert!(message.classify("enhanced listing").viewed_templates);
        assert!(!transcript.classify("enhanced listing").viewed_templates);
    }

    #[test]
    fn test_empty_signals() {
        let classifier = KeywordClassifier::default();
        assert!(classifier.classify("hello").is_empty());
    }
}
