// Customer support response generator
//
// Matches a customer question against the use case library and fills a
// fixed set of answer sections. Deterministic and infallible: an
// unmatched question still yields a complete "need more details" answer.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::library::{Complexity, Confidence, CustomerUseCase, IndustryConstraints, UseCaseLibrary};
use crate::modes::TechnicalLevel;

/// Use cases considered per question
const MAX_MATCHES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerSize {
    Small,
    #[default]
    Medium,
    Large,
    Enterprise,
}

impl CustomerSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerSize::Small => "small",
            CustomerSize::Medium => "medium",
            CustomerSize::Large => "large",
            CustomerSize::Enterprise => "enterprise",
        }
    }

    pub fn pricing_tier(&self) -> &'static str {
        match self {
            CustomerSize::Small => "Starter",
            CustomerSize::Medium => "Professional",
            CustomerSize::Large => "Enterprise",
            CustomerSize::Enterprise => "Enterprise+",
        }
    }
}

impl FromStr for CustomerSize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(CustomerSize::Small),
            "medium" => Ok(CustomerSize::Medium),
            "large" => Ok(CustomerSize::Large),
            "enterprise" => Ok(CustomerSize::Enterprise),
            other => anyhow::bail!("Unknown customer size '{}'", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

/// A customer question plus whatever we know about the customer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SupportQuery {
    pub question: String,
    pub customer_industry: Option<String>,
    pub customer_size: Option<CustomerSize>,
    pub urgency: Option<Urgency>,
    pub technical_level: Option<TechnicalLevel>,
    /// Recent conversation, one `role: content` line per message
    pub context: Option<String>,
}

impl SupportQuery {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Self::default()
        }
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.customer_industry = Some(industry.into());
        self
    }

    pub fn with_size(mut self, size: CustomerSize) -> Self {
        self.customer_size = Some(size);
        self
    }

    pub fn with_technical_level(mut self, level: TechnicalLevel) -> Self {
        self.technical_level = Some(level);
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Feasibility {
    Yes,
    Partially,
    No,
}

impl Feasibility {
    pub fn emoji(&self) -> &'static str {
        match self {
            Feasibility::Yes => "✅",
            Feasibility::Partially => "⚠️",
            Feasibility::No => "❌",
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Feasibility::Yes => "Yes, this is fully supported!",
            Feasibility::Partially => "Partially supported - see details below",
            Feasibility::No => "Not directly supported - see alternatives",
        }
    }
}

impl fmt::Display for Feasibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Feasibility::Yes => "yes",
            Feasibility::Partially => "partially",
            Feasibility::No => "no",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Implementation {
    pub timeline: String,
    pub requirements: Vec<String>,
    pub complexity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pricing {
    pub tier: String,
    pub considerations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportResponse {
    pub summary: String,
    pub feasibility: Feasibility,
    pub confidence: Confidence,
    pub business_value: String,
    pub implementation: Implementation,
    pub limitations: Vec<String>,
    pub alternatives: Vec<String>,
    pub competitive_advantage: Vec<String>,
    pub next_steps: Vec<String>,
    pub pricing: Pricing,
    pub risk_factors: Vec<String>,
    pub success_factors: Vec<String>,
}

/// A platform differentiator with its supporting evidence
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitiveAdvantage {
    pub category: &'static str,
    pub advantage: &'static str,
    pub proof: &'static str,
    pub customer_benefit: &'static str,
}

const MATCH_RATES: usize = 0;
const PRIVACY: usize = 1;

fn builtin_advantages() -> Vec<CompetitiveAdvantage> {
    vec![
        CompetitiveAdvantage {
            category: "Match Rates",
            advantage: "90%+ identity match rates",
            proof: "Industry average is 60-70%",
            customer_benefit: "More accurate targeting, better campaign performance",
        },
        CompetitiveAdvantage {
            category: "Privacy",
            advantage: "Privacy-first architecture",
            proof: "No raw PII exposure, built-in compliance",
            customer_benefit: "Reduced compliance risk, future-proof data strategy",
        },
        CompetitiveAdvantage {
            category: "Scale",
            advantage: "300M+ consumer identity graph",
            proof: "Largest authenticated identity dataset",
            customer_benefit: "Better reach and audience discovery",
        },
        CompetitiveAdvantage {
            category: "Speed",
            advantage: "Real-time data activation",
            proof: "Sub-second audience updates",
            customer_benefit: "Respond to customer behavior immediately",
        },
        CompetitiveAdvantage {
            category: "Integration",
            advantage: "500+ platform integrations",
            proof: "Direct connections to major ad platforms",
            customer_benefit: "Simplified data workflows, faster time-to-market",
        },
    ]
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub struct SupportResponseGenerator {
    library: UseCaseLibrary,
    advantages: Vec<CompetitiveAdvantage>,
}

impl SupportResponseGenerator {
    pub fn new(library: UseCaseLibrary) -> Self {
        Self {
            library,
            advantages: builtin_advantages(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(UseCaseLibrary::builtin())
    }

    pub fn library(&self) -> &UseCaseLibrary {
        &self.library
    }

    pub fn advantages(&self) -> &[CompetitiveAdvantage] {
        &self.advantages
    }

    /// Up to three use cases for a query, best first.
    ///
    /// Tries the whole question as a phrase, then individual keywords,
    /// then the customer's industry.
    pub fn relevant_use_cases(&self, query: &SupportQuery) -> Vec<&CustomerUseCase> {
        let mut matches = Vec::new();

        if !query.question.trim().is_empty() {
            matches = self.library.search(&query.question);
            if matches.is_empty() {
                matches = self.library.search_keywords(&query.question);
            }
        }

        if matches.is_empty() {
            if let Some(industry) = &query.customer_industry {
                matches = self.library.by_industry(industry);
            }
        }

        matches.truncate(MAX_MATCHES);
        matches
    }

    pub fn generate_response(&self, query: &SupportQuery) -> SupportResponse {
        let matches = self.relevant_use_cases(query);
        let primary = matches.first().copied();
        let constraints = query
            .customer_industry
            .as_deref()
            .and_then(|i| self.library.industry_constraints(i));

        let feasibility = assess_feasibility(query, primary);
        let confidence = assess_confidence(query, primary);

        tracing::debug!(
            "Support query matched {} use case(s), primary={:?}, feasibility={}",
            matches.len(),
            primary.map(|u| u.id),
            feasibility
        );

        SupportResponse {
            summary: summary(primary, feasibility),
            feasibility,
            confidence,
            business_value: business_value(primary),
            implementation: implementation(primary),
            limitations: limitations(primary, constraints),
            alternatives: alternatives(primary, &matches),
            competitive_advantage: self.competitive_advantage(primary),
            next_steps: next_steps(feasibility),
            pricing: pricing(query, primary),
            risk_factors: risk_factors(primary, constraints),
            success_factors: success_factors(primary, constraints),
        }
    }

    /// Summary, timeline and confidence only
    pub fn quick_assessment(&self, question: &str, industry: Option<&str>) -> String {
        let mut query = SupportQuery::new(question).with_technical_level(TechnicalLevel::Business);
        query.customer_industry = industry.map(str::to_string);

        let response = self.generate_response(&query);
        format!(
            "{}\n\n**Timeline**: {}\n**Confidence**: {}",
            response.summary,
            response.implementation.timeline,
            response.confidence.as_str()
        )
    }

    fn competitive_advantage(&self, use_case: Option<&CustomerUseCase>) -> Vec<String> {
        let Some(use_case) = use_case else {
            return self
                .advantages
                .iter()
                .take(2)
                .map(|a| a.advantage.to_string())
                .collect();
        };

        let mut advantages = owned(use_case.competitive_advantage);
        let title = use_case.title.to_lowercase();
        if title.contains("identity") || title.contains("match") {
            advantages.push(self.advantages[MATCH_RATES].advantage.to_string());
        }
        advantages.push(self.advantages[PRIVACY].advantage.to_string());
        advantages
    }
}

impl Default for SupportResponseGenerator {
    fn default() -> Self {
        Self::builtin()
    }
}

fn industry_matches(query: &SupportQuery, use_case: &CustomerUseCase) -> Option<bool> {
    query
        .customer_industry
        .as_deref()
        .map(|industry| use_case.supports_industry(industry))
}

fn assess_feasibility(query: &SupportQuery, primary: Option<&CustomerUseCase>) -> Feasibility {
    let Some(use_case) = primary else {
        return Feasibility::No;
    };

    if industry_matches(query, use_case) == Some(false) {
        return Feasibility::Partially;
    }

    match use_case.confidence {
        Confidence::High => Feasibility::Yes,
        _ => Feasibility::Partially,
    }
}

fn assess_confidence(query: &SupportQuery, primary: Option<&CustomerUseCase>) -> Confidence {
    let Some(use_case) = primary else {
        return Confidence::Low;
    };

    match industry_matches(query, use_case) {
        Some(true) => use_case.confidence,
        _ => use_case.confidence.downgrade(),
    }
}

fn summary(use_case: Option<&CustomerUseCase>, feasibility: Feasibility) -> String {
    match use_case {
        Some(use_case) => format!(
            "{} **{}**\n\n{}",
            feasibility.emoji(),
            feasibility.headline(),
            use_case.description
        ),
        None => "❓ **Need More Details** - Please provide more specific information about the use case to give you an accurate assessment.".to_string(),
    }
}

fn business_value(use_case: Option<&CustomerUseCase>) -> String {
    match use_case {
        Some(use_case) => format!(
            "**{}**\n\nKey benefits include improved targeting accuracy, better campaign performance, and enhanced customer insights.",
            use_case.business_outcome
        ),
        None => "Business value assessment requires more specific use case details.".to_string(),
    }
}

fn implementation(use_case: Option<&CustomerUseCase>) -> Implementation {
    match use_case {
        Some(use_case) => Implementation {
            timeline: use_case.timeline.to_string(),
            requirements: owned(use_case.requirements),
            complexity: format!("{} implementation", capitalize(use_case.complexity.as_str())),
        },
        None => Implementation {
            timeline: "Timeline depends on specific requirements".to_string(),
            requirements: vec!["Detailed use case definition needed".to_string()],
            complexity: "Cannot assess without more details".to_string(),
        },
    }
}

fn limitations(
    use_case: Option<&CustomerUseCase>,
    constraints: Option<&IndustryConstraints>,
) -> Vec<String> {
    let mut limitations = use_case.map(|u| owned(u.limitations)).unwrap_or_default();

    if let Some(c) = constraints {
        limitations.push(format!(
            "{} industry compliance: {}",
            c.industry,
            c.regulatory_compliance.join(", ")
        ));
    }

    if limitations.is_empty() {
        limitations.push("No significant limitations identified".to_string());
    }
    limitations
}

fn alternatives(primary: Option<&CustomerUseCase>, matches: &[&CustomerUseCase]) -> Vec<String> {
    let Some(primary) = primary else {
        return vec!["Contact solution engineering for custom approach".to_string()];
    };

    let mut alternatives = owned(primary.alternatives);
    alternatives.extend(
        matches
            .iter()
            .skip(1)
            .take(2)
            .map(|u| format!("Alternative: {} - {}", u.title, u.description)),
    );
    alternatives
}

fn next_steps(feasibility: Feasibility) -> Vec<String> {
    let steps: &[&str] = match feasibility {
        Feasibility::Yes => &[
            "Confirm data requirements and timeline",
            "Set up proof of concept (POC)",
            "Schedule technical integration planning",
        ],
        Feasibility::Partially => &[
            "Clarify specific requirements and constraints",
            "Explore alternative approaches",
            "Consult with solution engineering team",
        ],
        Feasibility::No => &[
            "Discuss alternative solutions",
            "Consider phased implementation approach",
            "Escalate to product team for roadmap discussion",
        ],
    };
    owned(steps)
}

fn pricing(query: &SupportQuery, use_case: Option<&CustomerUseCase>) -> Pricing {
    let size = query.customer_size.unwrap_or_default();

    let mut considerations = owned(&[
        "Pricing based on data volume and use case complexity",
        "POC typically available at reduced cost",
        "Annual commitments offer better pricing",
    ]);
    if use_case.map(|u| u.complexity) == Some(Complexity::Complex) {
        considerations.push("Complex implementations may require professional services".to_string());
    }

    Pricing {
        tier: size.pricing_tier().to_string(),
        considerations,
    }
}

fn risk_factors(
    use_case: Option<&CustomerUseCase>,
    constraints: Option<&IndustryConstraints>,
) -> Vec<String> {
    let mut risks = Vec::new();

    if let Some(u) = use_case {
        if u.confidence == Confidence::Low {
            risks.push("Lower confidence in success - recommend POC".to_string());
        }
        if u.complexity == Complexity::Complex {
            risks.push("Complex implementation - ensure adequate resources".to_string());
        }
    }
    if let Some(c) = constraints {
        risks.extend(
            c.common_challenges
                .iter()
                .map(|challenge| format!("Industry challenge: {}", challenge)),
        );
    }

    if risks.is_empty() {
        risks.push("Low risk implementation".to_string());
    }
    risks
}

fn success_factors(
    use_case: Option<&CustomerUseCase>,
    constraints: Option<&IndustryConstraints>,
) -> Vec<String> {
    let mut factors = Vec::new();

    if let Some(u) = use_case {
        factors.push(format!("Minimum data requirement: {}", u.min_data_size));
        factors.extend(
            u.success_metrics
                .iter()
                .map(|metric| format!("Success metric: {}", metric)),
        );
    }
    if let Some(c) = constraints {
        factors.extend(owned(c.success_factors));
    }

    if factors.is_empty() {
        factors.push("Standard success factors apply".to_string());
    }
    factors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> SupportResponseGenerator {
        SupportResponseGenerator::builtin()
    }

    #[test]
    fn test_matching_industry_is_feasible() {
        let response = generator().generate_response(
            &SupportQuery::new("Customer wants lookalike modeling for their retail audience")
                .with_industry("retail"),
        );

        assert_eq!(response.feasibility, Feasibility::Yes);
        assert_eq!(response.confidence, Confidence::High);
        assert!(response.summary.starts_with("✅ **Yes, this is fully supported!**"));
        assert_eq!(response.implementation.timeline, "24-48 hours for model creation");
        assert_eq!(response.implementation.complexity, "Simple implementation");
        assert_eq!(response.next_steps[1], "Set up proof of concept (POC)");
        assert!(response
            .limitations
            .iter()
            .any(|l| l == "retail industry compliance: PCI DSS for payment data, State privacy laws"));
    }

    #[test]
    fn test_industry_mismatch_is_partial() {
        let response = generator().generate_response(
            &SupportQuery::new("identity resolution").with_industry("travel"),
        );

        assert_eq!(response.feasibility, Feasibility::Partially);
        assert_eq!(response.confidence, Confidence::Medium);
        assert!(response.summary.starts_with("⚠️"));
    }

    #[test]
    fn test_no_industry_downgrades_confidence() {
        let response = generator().generate_response(&SupportQuery::new("secure data collaboration"));
        // Medium-confidence record without industry: partial, low
        assert_eq!(response.feasibility, Feasibility::Partially);
        assert_eq!(response.confidence, Confidence::Low);
        assert!(response
            .pricing
            .considerations
            .iter()
            .any(|c| c.contains("professional services")));
        assert!(response
            .risk_factors
            .contains(&"Complex implementation - ensure adequate resources".to_string()));
    }

    #[test]
    fn test_no_match_needs_more_details() {
        let response = generator().generate_response(&SupportQuery::new("zzz qqq"));

        assert_eq!(response.feasibility, Feasibility::No);
        assert_eq!(response.confidence, Confidence::Low);
        assert!(response.summary.starts_with("❓ **Need More Details**"));
        assert_eq!(
            response.alternatives,
            vec!["Contact solution engineering for custom approach".to_string()]
        );
        assert_eq!(
            response.competitive_advantage,
            vec!["90%+ identity match rates".to_string(), "Privacy-first architecture".to_string()]
        );
        assert_eq!(response.limitations, vec!["No significant limitations identified".to_string()]);
        assert_eq!(response.risk_factors, vec!["Low risk implementation".to_string()]);
        assert_eq!(response.success_factors, vec!["Standard success factors apply".to_string()]);
        assert_eq!(response.next_steps[2], "Escalate to product team for roadmap discussion");
    }

    #[test]
    fn test_industry_fallback() {
        let gen = generator();
        let matches = gen.relevant_use_cases(&SupportQuery::new("zzz").with_industry("healthcare"));
        let ids: Vec<&str> = matches.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["cross-platform-attribution", "identity-resolution"]);
    }

    #[test]
    fn test_identity_titles_get_match_rate_claim() {
        let response = generator().generate_response(&SupportQuery::new("identity resolution"));
        assert!(response
            .competitive_advantage
            .contains(&"90%+ identity match rates".to_string()));
        assert_eq!(
            response.competitive_advantage.last().map(String::as_str),
            Some("Privacy-first architecture")
        );
    }

    #[test]
    fn test_pricing_tiers() {
        let gen = generator();
        let tier = |size| {
            gen.generate_response(&SupportQuery::new("segmentation").with_size(size))
                .pricing
                .tier
        };
        assert_eq!(tier(CustomerSize::Small), "Starter");
        assert_eq!(tier(CustomerSize::Large), "Enterprise");
        assert_eq!(tier(CustomerSize::Enterprise), "Enterprise+");
        assert_eq!(
            gen.generate_response(&SupportQuery::new("segmentation")).pricing.tier,
            "Professional"
        );
    }

    #[test]
    fn test_alternatives_include_other_matches() {
        // No use case contains the whole phrase; keyword search finds three
        let response = generator().generate_response(&SupportQuery::new("customer data partners"));
        assert!(response.alternatives.iter().any(|a| a.starts_with("Alternative: ")));
    }

    #[test]
    fn test_quick_assessment() {
        let text = generator().quick_assessment("customer segmentation", Some("retail"));
        assert!(text.starts_with("✅ **Yes, this is fully supported!**"));
        assert!(text.contains("**Timeline**: 3-5 days for analysis"));
        assert!(text.ends_with("**Confidence**: high"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let gen = generator();
        let query = SupportQuery::new("attribution across channels").with_industry("finance");
        assert_eq!(gen.generate_response(&query), gen.generate_response(&query));
    }
}
