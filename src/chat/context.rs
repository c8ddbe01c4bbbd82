// Query context extraction
//
// Pulls industry, company size, language, use case and error hints out of
// a single message so mode endpoints get structured context.

use serde::Serialize;

use crate::conversation::Role;
use crate::modes::ChatMessage;
use crate::support::CustomerSize;

const INDUSTRIES: &[&str] = &[
    "retail",
    "finance",
    "automotive",
    "healthcare",
    "media",
    "entertainment",
];

const LANGUAGES: &[&str] = &["python", "javascript", "java", "curl", "php", "ruby"];

/// Use-case tags and the words that select them, checked in order
const USE_CASES: &[(&str, &[&str])] = &[
    ("identity_resolution", &["identity", "resolution"]),
    ("audience_segmentation", &["audience", "segment"]),
    ("lookalike_modeling", &["lookalike", "similar"]),
    ("attribution", &["attribution", "tracking"]),
];

const ERROR_TYPES: &[(&str, &[&str])] = &[
    ("401_authentication", &["401", "unauthorized"]),
    ("403_authorization", &["403", "forbidden"]),
    ("429_rate_limit", &["429", "rate limit"]),
    ("timeout", &["timeout", "slow"]),
];

/// Messages of history passed along with a support query
const HISTORY_WINDOW: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryContext {
    pub industry: Option<&'static str>,
    pub customer_size: CustomerSize,
    pub programming_language: &'static str,
    pub use_case: &'static str,
    pub error_type: &'static str,
}

impl QueryContext {
    /// Industry as sent on the wire
    pub fn industry_or_general(&self) -> &'static str {
        self.industry.unwrap_or("general")
    }
}

fn first_tagged(lower: &str, table: &[(&'static str, &[&str])], fallback: &'static str) -> &'static str {
    table
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(tag, _)| *tag)
        .unwrap_or(fallback)
}

pub fn extract_query_context(message: &str) -> QueryContext {
    let lower = message.to_lowercase();

    let customer_size = if lower.contains("enterprise") || lower.contains("large") {
        CustomerSize::Enterprise
    } else if lower.contains("small") || lower.contains("startup") {
        CustomerSize::Small
    } else {
        CustomerSize::Medium
    };

    QueryContext {
        industry: INDUSTRIES.iter().copied().find(|i| lower.contains(i)),
        customer_size,
        programming_language: LANGUAGES
            .iter()
            .copied()
            .find(|l| lower.contains(l))
            .unwrap_or("python"),
        use_case: first_tagged(&lower, USE_CASES, "general_api_integration"),
        error_type: first_tagged(&lower, ERROR_TYPES, "general_error"),
    }
}

/// The last few messages as `role: content` lines
pub fn extract_context_from_history(history: &[ChatMessage]) -> String {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    history[start..]
        .iter()
        .map(|m| format!("{}: {}", m.role.as_str(), m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// History preceding `message`. Drops the trailing entry when it is the
/// user's copy of the message being answered.
pub fn history_before<'a>(history: &'a [ChatMessage], message: &str) -> &'a [ChatMessage] {
    match history.split_last() {
        Some((last, rest)) if last.role == Role::User && last.content == message => rest,
        _ => history,
    }
}
