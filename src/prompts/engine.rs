// Contextual prompt scoring engine
//
// Picks the suggested next questions to show for the current conversation
// state, page and template availability. Ranking is a pure function of its
// inputs and the immutable prompt table.

use super::database::{PromptDatabase, PromptPool};
use super::detector::{KeywordClassifier, StateClassifier};
use super::types::{ContextualPrompt, ConversationState, Page, PromptCategory, TemplateContext};

/// Default number of suggestions returned
pub const DEFAULT_MAX_PROMPTS: usize = 5;

/// Context bonus for the page pool
pub const PAGE_BONUS: i32 = 5;
/// Context bonus for the conversation stage pool
pub const STATE_BONUS: i32 = 8;
/// Context bonus for guidance when no templates exist
pub const NO_TEMPLATES_BONUS: i32 = 9;
/// Context bonus for guidance when templates need datasets
pub const SETUP_BONUS: i32 = 6;
/// Context bonus for template category pools
pub const CATEGORY_BONUS: i32 = 7;
/// Added to monitoring prompts while a query is active
pub const MONITORING_BOOST: i32 = 3;
/// Added to results prompts when a query finished but results are unseen
pub const RESULTS_BOOST: i32 = 4;

/// Number of trailing messages scanned by `update_conversation_state`
const TRANSCRIPT_WINDOW: usize = 5;

/// Conversation stage used to pick the stage pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKey {
    FirstInteraction,
    PostTemplateView,
    PostQuerySubmission,
    PostResults,
}

impl StateKey {
    /// First matching rule wins. A conversation that matches none of the
    /// later rules stays at `FirstInteraction`, even when it has messages.
    pub fn derive(state: &ConversationState) -> Self {
        if state.conversation_length == 0 {
            StateKey::FirstInteraction
        } else if state.has_viewed_templates && !state.has_submitted_query {
            StateKey::PostTemplateView
        } else if state.has_submitted_query && state.has_active_query {
            StateKey::PostQuerySubmission
        } else if state.has_completed_query && state.has_viewed_results {
            StateKey::PostResults
        } else {
            StateKey::FirstInteraction
        }
    }

    pub fn pool(&self) -> PromptPool {
        match self {
            StateKey::FirstInteraction => PromptPool::FirstInteraction,
            StateKey::PostTemplateView => PromptPool::PostTemplateView,
            StateKey::PostQuerySubmission => PromptPool::PostQuerySubmission,
            StateKey::PostResults => PromptPool::PostResults,
        }
    }
}

/// Pool shown for a page
pub fn page_pool(page: Page) -> PromptPool {
    match page {
        Page::Cleanrooms => PromptPool::CleanroomsPage,
        Page::ApiExplorer => PromptPool::ApiExplorer,
        _ => PromptPool::HomeWelcome,
    }
}

/// A candidate prompt with its context score
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPrompt<'a> {
    pub prompt: &'a ContextualPrompt,
    pub pool: PromptPool,
    pub score: i32,
}

impl ScoredPrompt<'_> {
    /// Ranking key: prompt priority plus context score
    pub fn total(&self) -> i32 {
        self.prompt.priority + self.score
    }
}

/// Ranks suggestions from the prompt table
pub struct ContextualPromptService {
    database: PromptDatabase,
    classifier: Box<dyn StateClassifier>,
}

impl ContextualPromptService {
    /// Engine over `database`, detecting progress with the transcript rules
    pub fn new(database: PromptDatabase) -> Self {
        Self::with_classifier(database, Box::new(KeywordClassifier::transcript_rules()))
    }

    /// Engine over the built-in table
    pub fn builtin() -> Self {
        Self::new(PromptDatabase::builtin())
    }

    pub fn with_classifier(database: PromptDatabase, classifier: Box<dyn StateClassifier>) -> Self {
        Self {
            database,
            classifier,
        }
    }

    pub fn database(&self) -> &PromptDatabase {
        &self.database
    }

    /// Collect, score, filter and sort the candidates
    pub fn rank<'a>(
        &'a self,
        state: &ConversationState,
        templates: Option<&TemplateContext>,
    ) -> Vec<ScoredPrompt<'a>> {
        let mut candidates: Vec<ScoredPrompt<'a>> = Vec::new();

        self.push_pool(&mut candidates, page_pool(state.current_page), PAGE_BONUS);
        self.push_pool(&mut candidates, StateKey::derive(state).pool(), STATE_BONUS);

        if let Some(ctx) = templates {
            self.push_template_pools(&mut candidates, ctx);
        }

        for candidate in candidates.iter_mut() {
            match candidate.prompt.category {
                PromptCategory::Monitoring if state.has_active_query => {
                    candidate.score += MONITORING_BOOST;
                }
                PromptCategory::Results if state.has_completed_query && !state.has_viewed_results => {
                    candidate.score += RESULTS_BOOST;
                }
                _ => {}
            }
        }

        let collected = candidates.len();
        candidates.retain(|c| c.prompt.is_applicable(state));

        // Stable: equal totals keep pool insertion order
        candidates.sort_by(|a, b| b.total().cmp(&a.total()));

        tracing::debug!(
            "Ranked {} of {} candidate prompts for page {}",
            candidates.len(),
            collected,
            state.current_page
        );

        candidates
    }

    /// Up to `max_prompts` suggestions formatted for display.
    ///
    /// Returns an empty list when nothing applies; callers supply their
    /// own fallback.
    pub fn generate_contextual_prompts(
        &self,
        state: &ConversationState,
        templates: Option<&TemplateContext>,
        max_prompts: usize,
    ) -> Vec<String> {
        self.rank(state, templates)
            .into_iter()
            .take(max_prompts)
            .map(|c| c.prompt.format())
            .collect()
    }

    /// Re-derive progress flags from the tail of the transcript.
    ///
    /// Sets the page (home when none is given) and the message count, then
    /// scans the last few messages. Flags are only ever raised.
    pub fn update_conversation_state<S: AsRef<str>>(
        &self,
        current: &ConversationState,
        recent_messages: &[S],
        page: Option<Page>,
    ) -> ConversationState {
        let mut updated = current.clone();
        updated.current_page = page.unwrap_or_default();
        updated.conversation_length = recent_messages.len();

        let start = recent_messages.len().saturating_sub(TRANSCRIPT_WINDOW);
        let transcript = recent_messages[start..]
            .iter()
            .map(|m| m.as_ref())
            .collect::<Vec<_>>()
            .join(" ");

        self.classifier.classify(&transcript).apply(&mut updated);
        updated
    }

    fn push_pool<'a>(&'a self, out: &mut Vec<ScoredPrompt<'a>>, pool: PromptPool, score: i32) {
        out.extend(
            self.database
                .pool(pool)
                .iter()
                .map(|prompt| ScoredPrompt { prompt, pool, score }),
        );
    }

    fn push_template_pools<'a>(&'a self, out: &mut Vec<ScoredPrompt<'a>>, ctx: &TemplateContext) {
        if ctx.total_templates == 0 {
            self.push_pool(out, PromptPool::NoTemplates, NO_TEMPLATES_BONUS);
            return;
        }

        if ctx.missing_dataset_templates > 0 {
            self.push_pool(out, PromptPool::TemplatesNeedSetup, SETUP_BONUS);
        }
        if ctx.has_sentiment_analysis {
            self.push_pool(out, PromptPool::SentimentAvailable, CATEGORY_BONUS);
        }
        if ctx.has_location_data {
            self.push_pool(out, PromptPool::LocationAvailable, CATEGORY_BONUS);
        }
        if ctx.has_combined_analysis {
            self.push_pool(out, PromptPool::CombinedAvailable, CATEGORY_BONUS);
        }
    }
}

impl Default for ContextualPromptService {
    fn default() -> Self {
        Self::builtin()
    }
}
