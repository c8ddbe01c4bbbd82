// Customer support reply formatting
//
// Works out what kind of question was asked and renders a support
// response with the sections that question calls for.

use serde::Serialize;

use super::generator::SupportResponse;
use super::library::UseCaseLibrary;
use crate::modes::MessageMetadata;

/// Capability keywords picked out of a question
const API_KEYWORDS: &[&str] = &[
    "lookalike",
    "segmentation",
    "attribution",
    "identity",
    "resolution",
    "collaboration",
    "audience",
    "targeting",
    "personalization",
    "matching",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentKind {
    Capability,
    Feasibility,
    Pricing,
    Timeline,
    Comparison,
    Implementation,
    General,
}

/// Trigger phrases per intent, checked in order
const INTENT_RULES: &[(IntentKind, &[&str], f64)] = &[
    (IntentKind::Capability, &["can we", "is it possible", "do you support"], 0.8),
    (IntentKind::Feasibility, &["feasible", "realistic", "achievable"], 0.7),
    (IntentKind::Pricing, &["cost", "price", "budget"], 0.9),
    (IntentKind::Timeline, &["how long", "timeline", "when"], 0.8),
    (IntentKind::Comparison, &["vs", "versus", "compared to", "better than"], 0.7),
    (IntentKind::Implementation, &["how to", "implement", "integrate"], 0.8),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerIntent {
    pub kind: IntentKind,
    pub keywords: Vec<&'static str>,
    pub industry: Option<&'static str>,
    pub confidence: f64,
}

/// Classify a customer question
pub fn parse_intent(message: &str, library: &UseCaseLibrary) -> CustomerIntent {
    let lower = message.to_lowercase();

    let (kind, confidence) = INTENT_RULES
        .iter()
        .find(|(_, triggers, _)| triggers.iter().any(|t| lower.contains(t)))
        .map(|(kind, _, confidence)| (*kind, *confidence))
        .unwrap_or((IntentKind::General, 0.5));

    CustomerIntent {
        kind,
        keywords: extract_keywords(&lower),
        industry: library
            .all_industries()
            .into_iter()
            .find(|industry| lower.contains(industry)),
        confidence,
    }
}

fn extract_keywords(lower: &str) -> Vec<&'static str> {
    API_KEYWORDS
        .iter()
        .copied()
        .filter(|k| lower.contains(k))
        .collect()
}

fn section(out: &mut String, title: &str, items: &[String]) {
    out.push_str(&format!("**{}**\n", title));
    for item in items {
        out.push_str(&format!("• {}\n", item));
    }
    out.push('\n');
}

/// Render a support response for the intent behind the question
pub fn format_support_response(response: &SupportResponse, intent: &CustomerIntent) -> String {
    let mut out = format!("{}\n\n", response.summary);

    if !response.business_value.is_empty() {
        out.push_str(&format!("**💰 Business Value**\n{}\n\n", response.business_value));
    }

    if matches!(intent.kind, IntentKind::Timeline | IntentKind::Feasibility) {
        out.push_str("**⏱️ Implementation**\n");
        out.push_str(&format!("• **Timeline**: {}\n", response.implementation.timeline));
        out.push_str(&format!("• **Complexity**: {}\n\n", response.implementation.complexity));
    }

    if matches!(intent.kind, IntentKind::Capability | IntentKind::Implementation) {
        section(&mut out, "📋 Requirements", &response.implementation.requirements);
    }

    if !response.competitive_advantage.is_empty() {
        section(&mut out, "🏆 LiveRamp Advantages", &response.competitive_advantage);
    }

    if intent.kind == IntentKind::Pricing {
        out.push_str("**💸 Pricing Guidance**\n");
        out.push_str(&format!("• **Recommended Tier**: {}\n", response.pricing.tier));
        for consideration in &response.pricing.considerations {
            out.push_str(&format!("• {}\n", consideration));
        }
        out.push('\n');
    }

    if !response.limitations.is_empty() {
        let top: Vec<String> = response.limitations.iter().take(3).cloned().collect();
        section(&mut out, "⚠️ Considerations", &top);
    }

    if !response.next_steps.is_empty() {
        section(&mut out, "🚀 Recommended Next Steps", &response.next_steps);
    }

    out.push_str("💡 **Want more details?** Ask about technical implementation, competitive positioning, or specific industry considerations.");
    out
}

/// Reply metadata for a support answer
pub fn support_metadata(response: &SupportResponse, intent: &CustomerIntent) -> MessageMetadata {
    MessageMetadata {
        is_ai_powered: false,
        confidence_score: Some(response.confidence.score()),
        source_validation: Some(true),
        business_impact: Some(response.business_value.clone()),
        competitive_advantages: response.competitive_advantage.clone(),
        suggested_actions: response.next_steps.clone(),
        tools_used: intent.keywords.iter().map(|k| k.to_string()).collect(),
        ..MessageMetadata::default()
    }
}
