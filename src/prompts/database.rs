// Prompt database
//
// Static table of suggestion pools keyed by page, conversation stage and
// template availability. Built once at startup and read-only afterwards.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::types::{ContextualPrompt, PromptCategory};

use PromptCategory::{Discovery, Execution, Exploration, Monitoring, Results, Workflow};

/// Identifier of one pool of prompts in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptPool {
    // Page pools
    HomeWelcome,
    CleanroomsPage,
    ApiExplorer,
    // Conversation stage pools
    FirstInteraction,
    PostTemplateView,
    PostQuerySubmission,
    PostResults,
    // Template category pools
    SentimentAvailable,
    LocationAvailable,
    CombinedAvailable,
    // Template availability pools
    NoTemplates,
    TemplatesNeedSetup,
}

impl PromptPool {
    pub fn key(&self) -> &'static str {
        match self {
            PromptPool::HomeWelcome => "home_welcome",
            PromptPool::CleanroomsPage => "cleanrooms_page",
            PromptPool::ApiExplorer => "api_explorer",
            PromptPool::FirstInteraction => "first_interaction",
            PromptPool::PostTemplateView => "post_template_view",
            PromptPool::PostQuerySubmission => "post_query_submission",
            PromptPool::PostResults => "post_results",
            PromptPool::SentimentAvailable => "sentiment_available",
            PromptPool::LocationAvailable => "location_available",
            PromptPool::CombinedAvailable => "combined_available",
            PromptPool::NoTemplates => "no_templates",
            PromptPool::TemplatesNeedSetup => "templates_need_setup",
        }
    }
}

/// The prompt table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptDatabase {
    pools: HashMap<PromptPool, Vec<ContextualPrompt>>,
}

impl PromptDatabase {
    /// An empty table; every pool lookup yields nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace (or add) one pool
    pub fn with_pool(mut self, pool: PromptPool, prompts: Vec<ContextualPrompt>) -> Self {
        self.pools.insert(pool, prompts);
        self
    }

    /// Prompts of a pool, in table order. Unknown pools are empty.
    pub fn pool(&self, pool: PromptPool) -> &[ContextualPrompt] {
        self.pools.get(&pool).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of prompts across all pools
    pub fn len(&self) -> usize {
        self.pools.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load a table from a JSON file shaped `{"pools": {"<pool_key>": [...]}}`
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read prompt table: {}", path.display()))?;

        let database: PromptDatabase = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse prompt table: {}", path.display()))?;

        tracing::info!(
            "Loaded prompt table from {} ({} prompts)",
            path.display(),
            database.len()
        );

        Ok(database)
    }

    /// The built-in table
    pub fn builtin() -> Self {
        Self::empty()
            .with_pool(
                PromptPool::HomeWelcome,
                vec![
                    ContextualPrompt::new("🔍", "What analytics can I run in my cleanroom?", 10, Discovery),
                    ContextualPrompt::new("📊", "Show me my available templates", 9, Discovery),
                    ContextualPrompt::new("🚀", "How do I get started with data collaboration?", 8, Discovery),
                    ContextualPrompt::new("🏢", "What's my cleanroom status?", 7, Exploration),
                ],
            )
            .with_pool(
                PromptPool::CleanroomsPage,
                vec![
                    ContextualPrompt::new("🎯", "Run a sentiment analysis", 10, Execution)
                        .requiring_templates(),
                    ContextualPrompt::new("📍", "Analyze location patterns", 9, Execution)
                        .requiring_templates(),
                    ContextualPrompt::new("🔧", "Execute combined intelligence", 8, Execution)
                        .requiring_templates(),
                    ContextualPrompt::new("⚙️", "What parameters do these templates need?", 7, Exploration)
                        .requiring_templates(),
                ],
            )
            .with_pool(
                PromptPool::ApiExplorer,
                vec![
                    ContextualPrompt::new("🔬", "Test the templates API", 10, Exploration),
                    ContextualPrompt::new("💓", "Check API health status", 8, Monitoring),
                    ContextualPrompt::new("📋", "Show me raw API responses", 7, Exploration),
                    ContextualPrompt::new("🎛️", "Explore advanced API features", 6, Exploration),
                ],
            )
            .with_pool(
                PromptPool::FirstInteraction,
                vec![
                    ContextualPrompt::new("🤔", "What can I do with this cleanroom?", 10, Discovery),
                    ContextualPrompt::new("📈", "Show me what analytics are available", 9, Discovery),
                    ContextualPrompt::new("🏠", "How does LiveRamp clean room work?", 8, Discovery),
                    ContextualPrompt::new("🎯", "Get me started with my first analysis", 7, Workflow),
                ],
            )
            .with_pool(
                PromptPool::PostTemplateView,
                vec![
                    ContextualPrompt::new("😊", "Run the sentiment analysis template", 10, Execution)
                        .requiring_templates(),
                    ContextualPrompt::new("🗺️", "Execute location pattern analysis", 9, Execution)
                        .requiring_templates(),
                    ContextualPrompt::new("🌐", "Start combined data intelligence", 8, Execution)
                        .requiring_templates(),
                    ContextualPrompt::new("💾", "What data do I need for these templates?", 7, Exploration),
                ],
            )
            .with_pool(
                PromptPool::PostQuerySubmission,
                vec![
                    ContextualPrompt::new("⏱️", "Check my query status", 10, Monitoring)
                        .requiring_active_query(),
                    ContextualPrompt::new("⏳", "How long will my analysis take?", 8, Monitoring)
                        .requiring_active_query(),
                    ContextualPrompt::new("🔄", "What happens while my query runs?", 6, Exploration)
                        .requiring_active_query(),
                    ContextualPrompt::new("⚡", "Can I run another analysis while this runs?", 5, Workflow),
                ],
            )
            .with_pool(
                PromptPool::PostResults,
                vec![
                    ContextualPrompt::new("📥", "Export my analysis results", 10, Results),
                    ContextualPrompt::new("🔄", "Run another analysis with different data", 9, Workflow),
                    ContextualPrompt::new("💡", "What insights can I get from these results?", 8, Results),
                    ContextualPrompt::new("📤", "How do I share these findings?", 7, Results),
                ],
            )
            .with_pool(
                PromptPool::SentimentAvailable,
                vec![
                    ContextualPrompt::new("📝", "Analyze brand sentiment and mentions", 10, Execution),
                    ContextualPrompt::new("🌍", "Run global sentiment analysis", 9, Execution),
                    ContextualPrompt::new("💭", "What sentiment insights can I get?", 7, Exploration),
                ],
            )
            .with_pool(
                PromptPool::LocationAvailable,
                vec![
                    ContextualPrompt::new("📱", "Analyze mobile location patterns", 10, Execution),
                    ContextualPrompt::new("🚶", "Study pattern of life data", 9, Execution),
                    ContextualPrompt::new("🗺️", "What location insights are available?", 7, Exploration),
                ],
            )
            .with_pool(
                PromptPool::CombinedAvailable,
                vec![
                    ContextualPrompt::new("🧠", "Run comprehensive behavioral analysis", 10, Execution),
                    ContextualPrompt::new("🎯", "Execute multi-dimensional intelligence", 9, Execution),
                    ContextualPrompt::new("🔍", "What combined insights can I discover?", 7, Exploration),
                ],
            )
            .with_pool(
                PromptPool::NoTemplates,
                vec![
                    ContextualPrompt::new("❓", "How do I get analytics templates?", 10, Discovery),
                    ContextualPrompt::new("👥", "Contact admin about template setup", 8, Workflow),
                    ContextualPrompt::new("🔧", "What do I need to start analytics?", 7, Discovery),
                ],
            )
            .with_pool(
                PromptPool::TemplatesNeedSetup,
                vec![
                    ContextualPrompt::new("⚙️", "How do I configure missing datasets?", 10, Workflow),
                    ContextualPrompt::new("📞", "Contact admin about dataset setup", 9, Workflow),
                    ContextualPrompt::new("✅", "What templates can I use right now?", 8, Discovery),
                ],
            )
    }
}
