// Slash command handling and terminal rendering

use chrono::Local;

use crate::chat::{AssistantReply, ReplySource};
use crate::client::{PartnerListing, TemplateListing};
use crate::health::{HealthSnapshot, OverallHealth, StatusIndicators};
use crate::modes::{quick_actions, ChatMode};
use crate::prompts::{ContextualPromptService, ConversationState, Page, TemplateContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    /// `None` shows the current mode
    Mode(Option<ChatMode>),
    Page(Option<Page>),
    Suggest,
    Templates,
    Partners,
    Health,
    Reset,
    Retry,
    Dismiss,
    Demo,
    /// Send the N-th displayed suggestion (1-based)
    Pick(usize),
    Unknown(String),
}

impl Command {
    /// Parse a slash command. Plain text returns `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let rest = input.strip_prefix('/')?;
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, Some(arg.trim()).filter(|a| !a.is_empty())),
            None => (rest, None),
        };

        let command = match name.to_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "mode" => match arg {
                Some(arg) => match arg.parse() {
                    Ok(mode) => Command::Mode(Some(mode)),
                    Err(_) => Command::Unknown(input.to_string()),
                },
                None => Command::Mode(None),
            },
            "page" => Command::Page(arg.map(Page::from_path)),
            "suggest" => Command::Suggest,
            "templates" => Command::Templates,
            "partners" => Command::Partners,
            "health" => Command::Health,
            "reset" => Command::Reset,
            "retry" => Command::Retry,
            "dismiss" => Command::Dismiss,
            "demo" => Command::Demo,
            n => match n.parse::<usize>() {
                Ok(n) if n > 0 => Command::Pick(n),
                _ => Command::Unknown(input.to_string()),
            },
        };
        Some(command)
    }
}

pub fn format_help() -> String {
    r#"Available commands:
  /help              - Show this help message
  /quit              - Exit
  /mode [support|technical]
                     - Show or switch the assistant mode
  /page [tag]        - Show or set the current page (home, cleanrooms, api_explorer, ...)
  /suggest           - Show suggested questions
  /N                 - Send the N-th suggestion
  /templates         - Load available analytics templates
  /partners          - List data partners
  /health            - Check service health
  /reset             - Start a new conversation
  /retry             - Retry the last failed request
  /dismiss           - Dismiss the current error
  /demo              - Toggle demo mode (answer locally)

Type any question to get started!"#
        .to_string()
}

/// A suggestion as displayed, and the text sent when it is picked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub label: String,
    pub query: String,
}

/// Ranked prompts for the state, or the mode's quick actions when the
/// engine has nothing to offer
pub fn suggestions_for(
    engine: &ContextualPromptService,
    state: &ConversationState,
    templates: Option<&TemplateContext>,
    mode: ChatMode,
    max_prompts: usize,
) -> Vec<Suggestion> {
    let ranked: Vec<Suggestion> = engine
        .rank(state, templates)
        .into_iter()
        .take(max_prompts)
        .map(|c| Suggestion {
            label: c.prompt.format(),
            query: c.prompt.text.clone(),
        })
        .collect();

    if !ranked.is_empty() {
        return ranked;
    }

    quick_actions(mode)
        .iter()
        .take(max_prompts)
        .map(|a| Suggestion {
            label: a.format(),
            query: a.query.to_string(),
        })
        .collect()
}

pub fn format_suggestions(suggestions: &[Suggestion]) -> String {
    let mut output = String::from("💡 Suggested questions:\n");
    for (i, s) in suggestions.iter().enumerate() {
        output.push_str(&format!("  /{} {}\n", i + 1, s.label));
    }
    output.trim_end().to_string()
}

pub fn format_reply(reply: &AssistantReply) -> String {
    let mut output = reply.content.clone();

    let meta = &reply.metadata;
    let mut footer = Vec::new();
    if reply.source == ReplySource::Local {
        footer.push("local".to_string());
    }
    if let Some(ms) = meta.processing_time_ms {
        footer.push(format!("{}ms", ms));
    }
    if let Some(confidence) = meta.confidence_score {
        footer.push(format!("confidence {:.0}%", confidence * 100.0));
    }
    if !meta.tools_used.is_empty() {
        footer.push(format!("tools: {}", meta.tools_used.join(", ")));
    }
    if !footer.is_empty() {
        output.push_str(&format!("\n\n[{}]", footer.join(" | ")));
    }

    output
}

pub fn format_templates(listing: &TemplateListing, ctx: &TemplateContext) -> String {
    let mut output = format!(
        "📋 {} templates ({} ready, {} missing datasets){}\n",
        ctx.total_templates,
        ctx.ready_templates,
        ctx.missing_dataset_templates,
        if listing.mock_mode { " [mock data]" } else { "" }
    );
    for template in &listing.templates {
        output.push_str(&format!(
            "  • {} ({}) - {:?}\n",
            template.name, template.category, template.status
        ));
    }
    output.trim_end().to_string()
}

pub fn format_partners(listing: &PartnerListing) -> String {
    let mut output = format!("🤝 {} partners\n", listing.partners.len());
    for partner in &listing.partners {
        output.push_str(&format!("  • {} [{}] {}\n", partner.name, partner.kind, partner.description));
    }
    output.trim_end().to_string()
}

pub fn format_health(snapshot: &HealthSnapshot, indicators: Option<&StatusIndicators>) -> String {
    let overall = match snapshot.overall {
        OverallHealth::Healthy => "🟢 All systems operational",
        OverallHealth::Degraded => "🟡 Some services degraded",
        OverallHealth::Critical => "🔴 Critical issues detected",
    };

    let mut output = format!("{}\n", overall);
    for service in &snapshot.services {
        let timing = service
            .response_time_ms
            .map(|ms| format!(" ({}ms)", ms))
            .unwrap_or_default();
        output.push_str(&format!(
            "  {} {}{} - {}\n",
            service.status.icon(),
            service.name,
            timing,
            service.url
        ));
    }

    if snapshot.mock_mode {
        output.push_str("  Running with mock data\n");
    }

    if let Some(indicators) = indicators {
        output.push('\n');
        for line in indicators.lines() {
            output.push_str(&format!("  {}\n", line));
        }
        let readiness = indicators.readiness();
        output.push_str(&format!("  {} {}\n", readiness.icon(), readiness.describe()));
    }

    output.push_str(&format!(
        "Last updated: {}",
        snapshot
            .last_updated
            .with_timezone(&Local)
            .format("%H:%M:%S")
    ));
    output
}
