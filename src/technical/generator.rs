// Technical-expert response generator
//
// Routes a free-text engineering question to an API method, an
// implementation pattern or a troubleshooting guide from the catalog,
// falling back to generic guidance when nothing specific matches.

use tracing::debug;

use super::catalog::{
    ApiMethod, CommonIssue, DocLink, ResponseKind, TechnicalCatalog, TechnicalResponse, ValidationStatus,
};
use crate::modes::MessageMetadata;

const DOCS_BASE: &str = "https://docs.liveramp.com";

fn mentions(lower: &str, words: &[&str]) -> bool {
    words.iter().any(|w| lower.contains(w))
}

pub struct TechnicalExpertGenerator {
    catalog: TechnicalCatalog,
}

impl TechnicalExpertGenerator {
    pub fn new(catalog: TechnicalCatalog) -> Self {
        Self { catalog }
    }

    pub fn builtin() -> Self {
        Self::new(TechnicalCatalog::builtin())
    }

    pub fn catalog(&self) -> &TechnicalCatalog {
        &self.catalog
    }

    /// Answer a technical question; never fails
    pub fn generate_response(&self, question: &str) -> TechnicalResponse {
        let lower = question.to_lowercase();

        let response = if mentions(&lower, &["how to", "implement"]) {
            self.implementation_pattern(&lower, question)
        } else if mentions(&lower, &["error", "issue", "problem"]) {
            self.troubleshooting_guide(&lower, question)
        } else if mentions(&lower, &["api", "method", "endpoint"]) {
            self.api_method(&lower, question)
        } else {
            explanation(question)
        };

        debug!(
            kind = ?response.kind,
            title = %response.title,
            "Routed technical question"
        );
        response
    }

    fn implementation_pattern(&self, lower: &str, question: &str) -> TechnicalResponse {
        if mentions(lower, &["secure", "privacy", "cleanroom"]) {
            if let Some(pattern) = self.catalog.pattern("secure_data_collaboration") {
                return pattern.clone();
            }
        }
        generic_implementation(question)
    }

    fn troubleshooting_guide(&self, lower: &str, question: &str) -> TechnicalResponse {
        if mentions(lower, &["api", "integration", "connection"]) {
            if let Some(guide) = self.catalog.guide("api_integration") {
                return guide.clone();
            }
        }
        generic_troubleshooting(question)
    }

    fn api_method(&self, lower: &str, question: &str) -> TechnicalResponse {
        let name = if mentions(lower, &["identity", "resolve"]) {
            Some("Identity Resolution")
        } else if mentions(lower, &["segment", "audience"]) {
            Some("Audience Segmentation")
        } else {
            None
        };

        match name.and_then(|n| self.catalog.method(n)) {
            Some(method) => method_response(method),
            None => generic_api(question),
        }
    }
}

impl Default for TechnicalExpertGenerator {
    fn default() -> Self {
        Self::builtin()
    }
}

fn method_response(method: &ApiMethod) -> TechnicalResponse {
    let slug = method.name.to_lowercase().replace(' ', "-");
    let mut response =
        TechnicalResponse::skeleton(ResponseKind::ApiMethod, &method.name, method.description.clone())
            .steps(&[
                "Set up authentication with API token",
                "Configure request headers and parameters",
                "Implement error handling and retry logic",
                "Test with sample data",
                "Deploy with monitoring and logging",
            ]);

    response.code_examples = method.examples.clone();
    response.api_methods = vec![method.clone()];
    response.best_practices = method.best_practices.clone();
    response.common_issues = vec![CommonIssue {
        issue: "Authentication failures".to_string(),
        solution: "Verify API token and permissions".to_string(),
        prevention: "Implement token validation before requests".to_string(),
    }];
    response.performance_considerations = vec![
        "Monitor response times and optimize as needed".to_string(),
        "Implement caching for frequently accessed data".to_string(),
        "Use appropriate timeout values".to_string(),
    ];
    response.security_guidance = vec![
        "Use HTTPS for all API communications".to_string(),
        "Store API tokens securely".to_string(),
        "Validate all input parameters".to_string(),
    ];
    response.limitations = method.limitations.clone();
    response.related_topics = method.related_methods.clone();
    response.documentation = vec![DocLink::official(
        format!("{} API Documentation", method.name),
        format!("{}/api/{}", DOCS_BASE, slug),
    )];
    response.validation_status = ValidationStatus::Verified;
    response
}

fn explanation(question: &str) -> TechnicalResponse {
    let mut response = TechnicalResponse::skeleton(
        ResponseKind::Explanation,
        "Technical Explanation",
        format!("Technical explanation for: {}", question),
    )
    .steps(&[
        "This is a general technical explanation",
        "For specific implementation guidance, please provide more context",
        "Consider referencing our API documentation for detailed examples",
    ])
    .practices(&[
        "Follow LiveRamp API best practices",
        "Implement proper error handling",
        "Use appropriate authentication methods",
    ]);
    response.limitations =
        vec!["This is a general response - specific implementations may vary".to_string()];
    response
}

fn generic_api(question: &str) -> TechnicalResponse {
    let mut response = TechnicalResponse::skeleton(
        ResponseKind::ApiMethod,
        "API Method Information",
        format!("Information about LiveRamp API methods related to: {}", question),
    )
    .steps(&[
        "Identify the specific API method you need",
        "Review the API documentation",
        "Set up authentication",
        "Implement with proper error handling",
    ])
    .practices(&[
        "Use official SDK when available",
        "Implement retry logic for transient failures",
        "Monitor API usage and performance",
    ]);
    response.documentation = vec![DocLink::official("LiveRamp API Documentation", DOCS_BASE)];
    response
}

fn generic_implementation(question: &str) -> TechnicalResponse {
    TechnicalResponse::skeleton(
        ResponseKind::Implementation,
        "Implementation Guidance",
        format!("Implementation guidance for: {}", question),
    )
    .steps(&[
        "Plan your implementation approach",
        "Set up development environment",
        "Implement core functionality",
        "Add error handling and logging",
        "Test thoroughly before deployment",
    ])
    .practices(&[
        "Follow coding standards and best practices",
        "Implement comprehensive testing",
        "Use version control and proper deployment procedures",
    ])
}

fn generic_troubleshooting(question: &str) -> TechnicalResponse {
    TechnicalResponse::skeleton(
        ResponseKind::Troubleshooting,
        "Troubleshooting Guide",
        format!("Troubleshooting guidance for: {}", question),
    )
    .steps(&[
        "Identify the specific issue",
        "Check logs and error messages",
        "Verify configuration and credentials",
        "Test with minimal example",
        "Contact support if issue persists",
    ])
    .practices(&[
        "Maintain detailed logs",
        "Use systematic troubleshooting approach",
        "Document solutions for future reference",
    ])
}

fn bullets(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("**{}**\n", title));
    for item in items {
        out.push_str(&format!("• {}\n", item));
    }
    out.push('\n');
}

/// Render a technical answer as chat text
pub fn format_technical_response(response: &TechnicalResponse) -> String {
    let mut out = format!("🔧 **{}**\n\n{}\n\n", response.title, response.summary);

    if !response.api_methods.is_empty() {
        out.push_str("**🔌 Endpoints**\n");
        for method in &response.api_methods {
            out.push_str(&format!(
                "• `{} {}`: {}\n",
                method.method.as_str(),
                method.endpoint,
                method.description
            ));
        }
        out.push('\n');
    }

    if !response.implementation_steps.is_empty() {
        out.push_str("**🛠️ Implementation Steps**\n");
        for (i, step) in response.implementation_steps.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, step));
        }
        out.push('\n');
    }

    if let Some(example) = response.code_examples.first() {
        out.push_str(&format!("**💻 {}**\n", example.title));
        out.push_str(&format!("```{}\n{}", example.language, example.code));
        if !example.code.ends_with('\n') {
            out.push('\n');
        }
        out.push_str("```\n\n");
    }

    bullets(&mut out, "✅ Best Practices", &response.best_practices);

    if !response.common_issues.is_empty() {
        out.push_str("**⚠️ Common Issues**\n");
        for issue in &response.common_issues {
            out.push_str(&format!("• **{}**: {}\n", issue.issue, issue.solution));
        }
        out.push('\n');
    }

    bullets(&mut out, "📏 Limitations", &response.limitations);

    if !response.documentation.is_empty() {
        out.push_str("**📚 Documentation**\n");
        for doc in &response.documentation {
            out.push_str(&format!("• {}: {}\n", doc.title, doc.url));
        }
        out.push('\n');
    }

    if response.validation_status != ValidationStatus::Verified {
        out.push_str("_General guidance; verify against the API reference before relying on it._");
    }

    out.trim_end().to_string()
}

/// Reply metadata for a technical answer
pub fn technical_metadata(response: &TechnicalResponse) -> MessageMetadata {
    let verified = response.validation_status == ValidationStatus::Verified;
    MessageMetadata {
        is_ai_powered: false,
        confidence_score: Some(if verified { 0.9 } else { 0.6 }),
        source_validation: Some(verified),
        code_examples: response.code_examples.clone(),
        api_methods: response.api_methods.iter().map(ApiMethod::to_ref).collect(),
        implementation_steps: response.implementation_steps.clone(),
        performance_considerations: response.performance_considerations.clone(),
        security_guidance: response.security_guidance.clone(),
        suggested_actions: response.related_topics.clone(),
        ..MessageMetadata::default()
    }
}
