// Customer use case library
//
// Static reference data: what the platform can do for a customer, which
// industries it suits, and the constraints each industry brings.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("number regex is valid"));

/// Words too generic to tell use cases apart
const STOPWORDS: &[&str] = &[
    "about", "client", "clients", "customer", "customers", "does", "from", "have", "help", "need",
    "needs", "their", "there", "they", "this", "want", "wants", "what", "when", "with", "would",
    "your",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Moderate => "moderate",
            Complexity::Complex => "complex",
        }
    }

    pub fn score(&self) -> u8 {
        match self {
            Complexity::Simple => 1,
            Complexity::Moderate => 2,
            Complexity::Complex => 3,
        }
    }
}

/// How sure we are that an answer holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// One step less certain; `Low` stays `Low`
    pub fn downgrade(self) -> Self {
        match self {
            Confidence::High => Confidence::Medium,
            Confidence::Medium | Confidence::Low => Confidence::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }

    /// Numeric score reported in reply metadata
    pub fn score(&self) -> f64 {
        match self {
            Confidence::High => 0.9,
            Confidence::Medium => 0.7,
            Confidence::Low => 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUseCase {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub industry: &'static [&'static str],
    pub business_outcome: &'static str,
    pub api_capabilities: &'static [&'static str],
    pub requirements: &'static [&'static str],
    pub timeline: &'static str,
    pub limitations: &'static [&'static str],
    pub alternatives: &'static [&'static str],
    pub competitive_advantage: &'static [&'static str],
    pub success_metrics: &'static [&'static str],
    pub min_data_size: &'static str,
    pub complexity: Complexity,
    pub confidence: Confidence,
}

impl CustomerUseCase {
    pub fn supports_industry(&self, industry: &str) -> bool {
        let industry = industry.to_lowercase();
        self.industry.iter().any(|i| *i == industry)
    }

    /// Minimum record count, ignoring thousands separators
    pub fn min_records(&self) -> u64 {
        parse_data_size(self.min_data_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessOutcome {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub roi_potential: Confidence,
    pub time_to_value: &'static str,
    pub industry_relevance: &'static [&'static str],
    pub success_stories: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndustryConstraints {
    pub industry: &'static str,
    pub data_privacy_requirements: &'static [&'static str],
    pub regulatory_compliance: &'static [&'static str],
    pub typical_data_volumes: &'static str,
    pub common_challenges: &'static [&'static str],
    pub success_factors: &'static [&'static str],
}

/// Filter for `UseCaseLibrary::assess_feasibility`
#[derive(Debug, Clone, PartialEq)]
pub struct FeasibilityRequirements {
    pub industry: String,
    /// Records the customer can bring
    pub data_size: u64,
    /// Highest complexity the customer will take on
    pub complexity: Complexity,
}

/// First integer in a size string such as `"10,000+ interactions"`
pub fn parse_data_size(size: &str) -> u64 {
    let digits: String = size.chars().filter(|c| *c != ',').collect();
    FIRST_NUMBER
        .find(&digits)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

pub struct UseCaseLibrary {
    use_cases: Vec<CustomerUseCase>,
    business_outcomes: Vec<BusinessOutcome>,
    industry_constraints: Vec<IndustryConstraints>,
}

impl UseCaseLibrary {
    pub fn builtin() -> Self {
        Self {
            use_cases: builtin_use_cases(),
            business_outcomes: builtin_business_outcomes(),
            industry_constraints: builtin_industry_constraints(),
        }
    }

    pub fn use_cases(&self) -> &[CustomerUseCase] {
        &self.use_cases
    }

    pub fn by_industry(&self, industry: &str) -> Vec<&CustomerUseCase> {
        self.use_cases
            .iter()
            .filter(|u| u.supports_industry(industry))
            .collect()
    }

    pub fn by_id(&self, id: &str) -> Option<&CustomerUseCase> {
        self.use_cases.iter().find(|u| u.id == id)
    }

    /// Use cases whose title, description or outcome contain the whole query
    pub fn search(&self, query: &str) -> Vec<&CustomerUseCase> {
        let query = query.to_lowercase();
        self.use_cases
            .iter()
            .filter(|u| {
                u.title.to_lowercase().contains(&query)
                    || u.description.to_lowercase().contains(&query)
                    || u.business_outcome.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Use cases ranked by how many distinctive query words they mention.
    ///
    /// Words shorter than four letters and generic words are ignored.
    /// Ties keep library order.
    pub fn search_keywords(&self, query: &str) -> Vec<&CustomerUseCase> {
        let query = query.to_lowercase();
        let words: BTreeSet<&str> = query
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.len() >= 4 && !STOPWORDS.contains(w))
            .collect();

        if words.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, &CustomerUseCase)> = self
            .use_cases
            .iter()
            .map(|u| {
                let haystack = format!(
                    "{} {} {} {}",
                    u.id, u.title, u.description, u.business_outcome
                )
                .to_lowercase();
                let hits = words.iter().filter(|w| haystack.contains(*w)).count();
                (hits, u)
            })
            .filter(|(hits, _)| *hits > 0)
            .collect();

        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.into_iter().map(|(_, u)| u).collect()
    }

    pub fn business_outcome(&self, id: &str) -> Option<&BusinessOutcome> {
        self.business_outcomes.iter().find(|o| o.id == id)
    }

    pub fn industry_constraints(&self, industry: &str) -> Option<&IndustryConstraints> {
        let industry = industry.to_lowercase();
        self.industry_constraints
            .iter()
            .find(|c| c.industry == industry)
    }

    /// Every industry any use case supports, sorted
    pub fn all_industries(&self) -> Vec<&'static str> {
        self.use_cases
            .iter()
            .flat_map(|u| u.industry.iter().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// API capability -> titles of the use cases built on it
    pub fn capability_mapping(&self) -> BTreeMap<&'static str, Vec<&'static str>> {
        let mut mapping: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
        for use_case in &self.use_cases {
            for capability in use_case.api_capabilities {
                mapping.entry(*capability).or_default().push(use_case.title);
            }
        }
        mapping
    }

    /// Use cases the customer qualifies for
    pub fn assess_feasibility(&self, req: &FeasibilityRequirements) -> Vec<&CustomerUseCase> {
        self.use_cases
            .iter()
            .filter(|u| {
                u.supports_industry(&req.industry)
                    && u.min_records() <= req.data_size
                    && u.complexity.score() <= req.complexity.score()
            })
            .collect()
    }
}

impl Default for UseCaseLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_use_cases() -> Vec<CustomerUseCase> {
    vec![
        CustomerUseCase {
            id: "lookalike-modeling",
            title: "Lookalike Audience Expansion",
            description: "Find new customers similar to existing high-value customers using CRM data",
            industry: &["retail", "e-commerce", "finance", "automotive", "travel"],
            business_outcome: "Increase customer acquisition efficiency by 40-60%",
            api_capabilities: &["habu_enhanced_templates", "habu_submit_query", "habu_get_results"],
            requirements: &[
                "Minimum 1,000 seed customers",
                "Customer data with email or postal address",
                "Historical purchase/engagement data",
            ],
            timeline: "24-48 hours for model creation",
            limitations: &[
                "Requires sufficient match rate (>60%)",
                "Performance varies by industry vertical",
                "Need ongoing model refresh (monthly recommended)",
            ],
            alternatives: &[
                "Cohort analysis for smaller datasets",
                "Behavioral segmentation as alternative approach",
            ],
            competitive_advantage: &[
                "90%+ match rates vs industry 60-70%",
                "Identity graph spans 300M+ US consumers",
                "Real-time audience activation",
            ],
            success_metrics: &[
                "Match rate >60%",
                "Audience size 5-10x seed list",
                "Conversion rate improvement >25%",
            ],
            min_data_size: "1,000+ customers",
            complexity: Complexity::Simple,
            confidence: Confidence::High,
        },
        CustomerUseCase {
            id: "cross-platform-attribution",
            title: "Cross-Platform Customer Journey Attribution",
            description: "Track customer interactions across digital and offline touchpoints",
            industry: &["retail", "automotive", "finance", "healthcare"],
            business_outcome: "Optimize marketing spend allocation across channels",
            api_capabilities: &["habu_enhanced_templates", "habu_list_partners", "habu_submit_query"],
            requirements: &[
                "Multi-channel customer data",
                "Consistent customer identifiers",
                "Conversion event tracking",
            ],
            timeline: "1-2 weeks for implementation",
            limitations: &[
                "Requires data from multiple touchpoints",
                "Attribution windows configurable but not unlimited",
                "Some channels may have limited visibility",
            ],
            alternatives: &[
                "Single-channel attribution for simplified analysis",
                "Marketing mix modeling for aggregate insights",
            ],
            competitive_advantage: &[
                "Unified identity resolution across channels",
                "Privacy-compliant cross-device tracking",
                "Real-time attribution updates",
            ],
            success_metrics: &[
                "Cross-channel match rate >70%",
                "Attribution accuracy improvement >30%",
                "ROAS optimization 15-25%",
            ],
            min_data_size: "10,000+ interactions",
            complexity: Complexity::Moderate,
            confidence: Confidence::High,
        },
        CustomerUseCase {
            id: "customer-segmentation",
            title: "Advanced Customer Segmentation",
            description: "Create behavioral and demographic customer segments for targeted marketing",
            industry: &["retail", "finance", "travel", "entertainment", "b2b"],
            business_outcome: "Increase campaign effectiveness through personalized targeting",
            api_capabilities: &["habu_enhanced_templates", "habu_submit_query", "habu_get_results"],
            requirements: &[
                "Customer transaction/behavior data",
                "Demographic information",
                "Engagement history",
            ],
            timeline: "3-5 days for analysis",
            limitations: &[
                "Segment quality depends on data richness",
                "Minimum segment sizes for statistical significance",
                "Regular refresh needed for accuracy",
            ],
            alternatives: &[
                "Simple RFM segmentation",
                "Geographic segmentation",
                "Product affinity groups",
            ],
            competitive_advantage: &[
                "AI-powered segment discovery",
                "Real-time segment updates",
                "Privacy-compliant demographic enrichment",
            ],
            success_metrics: &[
                "5-10 distinct segments identified",
                "Segment lift >20% vs broad targeting",
                "Customer lifetime value increase",
            ],
            min_data_size: "5,000+ customers",
            complexity: Complexity::Moderate,
            confidence: Confidence::High,
        },
        CustomerUseCase {
            id: "identity-resolution",
            title: "Customer Identity Resolution",
            description: "Unify customer identities across devices, channels, and data sources",
            industry: &["retail", "media", "finance", "healthcare", "automotive"],
            business_outcome: "Create unified customer view for personalized experiences",
            api_capabilities: &["habu_list_partners", "habu_enhanced_templates", "habu_submit_query"],
            requirements: &[
                "Multiple data sources with customer identifiers",
                "PII data (email, phone, address)",
                "Device/session data",
            ],
            timeline: "1-3 weeks depending on complexity",
            limitations: &[
                "Match rates vary by data quality",
                "Privacy regulations may limit linking",
                "Requires ongoing maintenance",
            ],
            alternatives: &[
                "Probabilistic matching for lower confidence",
                "Device-only linking",
                "Email-based identity spine",
            ],
            competitive_advantage: &[
                "Industry-leading match rates",
                "Privacy-first approach",
                "Real-time identity graph updates",
            ],
            success_metrics: &[
                "Identity match rate >80%",
                "Unified customer records",
                "Cross-device attribution accuracy",
            ],
            min_data_size: "1,000+ customers",
            complexity: Complexity::Complex,
            confidence: Confidence::High,
        },
        CustomerUseCase {
            id: "data-collaboration",
            title: "Secure Data Collaboration",
            description: "Collaborate with partners on shared customer insights without exposing raw data",
            industry: &["retail", "finance", "automotive", "travel", "media"],
            business_outcome: "Unlock new revenue opportunities through partner data",
            api_capabilities: &["habu_list_partners", "habu_enhanced_templates", "habu_submit_query"],
            requirements: &[
                "Partner agreement and data sharing terms",
                "Matched customer base with partner",
                "Clear use case definition",
            ],
            timeline: "2-4 weeks including partner onboarding",
            limitations: &[
                "Requires partner participation",
                "Limited to pre-approved use cases",
                "Match rates depend on overlap",
            ],
            alternatives: &[
                "Third-party data enrichment",
                "Lookalike modeling without collaboration",
                "Public data sources",
            ],
            competitive_advantage: &[
                "Privacy-preserving collaboration",
                "No raw data exposure",
                "Compliance-ready frameworks",
            ],
            success_metrics: &[
                "Partner match rate >50%",
                "New customer insights generated",
                "Revenue lift from collaboration",
            ],
            min_data_size: "5,000+ overlapping customers",
            complexity: Complexity::Complex,
            confidence: Confidence::Medium,
        },
    ]
}

fn builtin_business_outcomes() -> Vec<BusinessOutcome> {
    vec![
        BusinessOutcome {
            id: "customer-acquisition",
            name: "Improved Customer Acquisition",
            description: "Acquire new customers more efficiently through better targeting",
            roi_potential: Confidence::High,
            time_to_value: "1-2 months",
            industry_relevance: &["retail", "finance", "automotive", "travel"],
            success_stories: &[
                "Major retailer increased acquisition efficiency by 45%",
                "Auto brand reduced CAC by 30% with lookalike modeling",
            ],
        },
        BusinessOutcome {
            id: "marketing-optimization",
            name: "Marketing Spend Optimization",
            description: "Allocate marketing budget more effectively across channels",
            roi_potential: Confidence::High,
            time_to_value: "2-3 months",
            industry_relevance: &["retail", "e-commerce", "travel", "entertainment"],
            success_stories: &[
                "E-commerce company improved ROAS by 25%",
                "Travel brand optimized channel mix, saved $2M annually",
            ],
        },
        BusinessOutcome {
            id: "personalization",
            name: "Enhanced Personalization",
            description: "Deliver more relevant experiences through better customer understanding",
            roi_potential: Confidence::Medium,
            time_to_value: "3-6 months",
            industry_relevance: &["retail", "media", "finance", "healthcare"],
            success_stories: &[
                "Media company increased engagement by 40%",
                "Bank improved product recommendation CTR by 60%",
            ],
        },
    ]
}

fn builtin_industry_constraints() -> Vec<IndustryConstraints> {
    vec![
        IndustryConstraints {
            industry: "retail",
            data_privacy_requirements: &["CCPA compliance", "GDPR for EU customers", "Consent management"],
            regulatory_compliance: &["PCI DSS for payment data", "State privacy laws"],
            typical_data_volumes: "1M-100M+ customer records",
            common_challenges: &[
                "Seasonal data patterns",
                "Cross-channel attribution complexity",
                "Inventory-driven personalization",
            ],
            success_factors: &[
                "Rich transaction history",
                "Multi-channel data integration",
                "Real-time activation capabilities",
            ],
        },
        IndustryConstraints {
            industry: "finance",
            data_privacy_requirements: &["CCPA compliance", "GDPR", "Financial privacy regulations"],
            regulatory_compliance: &["GLBA", "Fair Credit Reporting Act", "Anti-discrimination laws"],
            typical_data_volumes: "100K-10M customer records",
            common_challenges: &[
                "Strict regulatory environment",
                "Risk management integration",
                "Fraud prevention requirements",
            ],
            success_factors: &[
                "High-quality customer data",
                "Compliance-first approach",
                "Risk-adjusted targeting",
            ],
        },
        IndustryConstraints {
            industry: "automotive",
            data_privacy_requirements: &["CCPA compliance", "GDPR", "Connected vehicle data privacy"],
            regulatory_compliance: &["State lemon laws", "Safety regulations"],
            typical_data_volumes: "500K-5M prospect records",
            common_challenges: &[
                "Long purchase cycles",
                "Dealer network complexity",
                "Multi-stakeholder decisions",
            ],
            success_factors: &[
                "Intent signal identification",
                "Lifecycle stage targeting",
                "Local market considerations",
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_industry_and_id() {
        let lib = UseCaseLibrary::builtin();
        let healthcare: Vec<&str> = lib.by_industry("Healthcare").iter().map(|u| u.id).collect();
        assert_eq!(healthcare, vec!["cross-platform-attribution", "identity-resolution"]);

        assert_eq!(lib.by_id("data-collaboration").unwrap().confidence, Confidence::Medium);
        assert!(lib.by_id("nope").is_none());
    }

    #[test]
    fn test_whole_query_search() {
        let lib = UseCaseLibrary::builtin();
        let hits = lib.search("IDENTITY RESOLUTION");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "identity-resolution");

        assert!(lib.search("lookalike segmentation").is_empty());
    }

    #[test]
    fn test_keyword_search_ranks_best_match_first() {
        let lib = UseCaseLibrary::builtin();
        let hits = lib.search_keywords("Customer wants lookalike modeling for their retail audience");
        assert_eq!(hits[0].id, "lookalike-modeling");

        assert!(lib.search_keywords("what is the").is_empty());
    }

    #[test]
    fn test_industries_sorted_and_distinct() {
        let lib = UseCaseLibrary::builtin();
        let industries = lib.all_industries();
        assert_eq!(industries.first(), Some(&"automotive"));
        assert!(industries.windows(2).all(|w| w[0] < w[1]));
        assert!(industries.contains(&"b2b"));
    }

    #[test]
    fn test_capability_mapping() {
        let lib = UseCaseLibrary::builtin();
        let mapping = lib.capability_mapping();
        assert_eq!(mapping["habu_enhanced_templates"].len(), 5);
        assert_eq!(
            mapping["habu_get_results"],
            vec!["Lookalike Audience Expansion", "Advanced Customer Segmentation"]
        );
    }

    #[test]
    fn test_parse_data_size_ignores_commas() {
        assert_eq!(parse_data_size("1,000+ customers"), 1000);
        assert_eq!(parse_data_size("10,000+ interactions"), 10000);
        assert_eq!(parse_data_size("unknown"), 0);
    }

    #[test]
    fn test_assess_feasibility() {
        let lib = UseCaseLibrary::builtin();
        let ids: Vec<&str> = lib
            .assess_feasibility(&FeasibilityRequirements {
                industry: "retail".to_string(),
                data_size: 5_000,
                complexity: Complexity::Moderate,
            })
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec!["lookalike-modeling", "customer-segmentation"]);
    }

    #[test]
    fn test_confidence_downgrade() {
        assert_eq!(Confidence::High.downgrade(), Confidence::Medium);
        assert_eq!(Confidence::Medium.downgrade(), Confidence::Low);
        assert_eq!(Confidence::Low.downgrade(), Confidence::Low);
    }

    #[test]
    fn test_constraints_lookup() {
        let lib = UseCaseLibrary::builtin();
        assert_eq!(lib.industry_constraints("FINANCE").unwrap().regulatory_compliance[0], "GLBA");
        assert!(lib.industry_constraints("media").is_none());
        assert_eq!(lib.business_outcome("personalization").unwrap().time_to_value, "3-6 months");
    }
}
