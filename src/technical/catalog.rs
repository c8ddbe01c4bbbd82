// Technical reference catalog
//
// API methods, implementation patterns and troubleshooting guides the
// technical-expert generator answers from.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::modes::ApiMethodRef;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A runnable sample attached to a technical answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeExample {
    pub language: String,
    pub title: String,
    pub description: String,
    pub code: String,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl CodeExample {
    fn python(title: &str, description: &str, code: &str) -> Self {
        Self {
            language: "python".to_string(),
            title: title.to_string(),
            description: description.to_string(),
            code: code.to_string(),
            dependencies: Vec::new(),
            notes: Vec::new(),
        }
    }

    fn with_dependencies(mut self, deps: &[&str]) -> Self {
        self.dependencies = strings(deps);
        self
    }

    fn with_notes(mut self, notes: &[&str]) -> Self {
        self.notes = strings(notes);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiParameter {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub required: bool,
    pub description: String,
    pub example: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
}

impl ApiParameter {
    fn new(name: &str, kind: &str, required: bool, description: &str, example: Value) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            required,
            description: description.to_string(),
            example,
            validation: None,
            deprecated: false,
        }
    }

    fn with_validation(mut self, rule: &str) -> Self {
        self.validation = Some(rule.to_string());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

/// One documented endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMethod {
    pub name: String,
    pub endpoint: String,
    pub method: HttpMethod,
    pub description: String,
    pub parameters: Vec<ApiParameter>,
    pub responses: Vec<ApiResponse>,
    pub examples: Vec<CodeExample>,
    pub use_cases: Vec<String>,
    pub limitations: Vec<String>,
    pub best_practices: Vec<String>,
    pub related_methods: Vec<String>,
}

impl ApiMethod {
    /// Compact form carried in reply metadata
    pub fn to_ref(&self) -> ApiMethodRef {
        ApiMethodRef {
            name: self.name.clone(),
            endpoint: self.endpoint.clone(),
            method: self.method.as_str().to_string(),
            description: self.description.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    ApiMethod,
    Implementation,
    Troubleshooting,
    BestPractice,
    Explanation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    Verified,
    NeedsVerification,
    CommunityContributed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonIssue {
    pub issue: String,
    pub solution: String,
    pub prevention: String,
}

impl CommonIssue {
    fn new(issue: &str, solution: &str, prevention: &str) -> Self {
        Self {
            issue: issue.to_string(),
            solution: solution.to_string(),
            prevention: prevention.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocKind {
    Official,
    Tutorial,
    Example,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocLink {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: DocKind,
}

impl DocLink {
    pub fn official(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            kind: DocKind::Official,
        }
    }
}

/// A complete technical answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalResponse {
    #[serde(rename = "type")]
    pub kind: ResponseKind,
    pub title: String,
    pub summary: String,
    pub code_examples: Vec<CodeExample>,
    pub api_methods: Vec<ApiMethod>,
    pub implementation_steps: Vec<String>,
    pub best_practices: Vec<String>,
    pub common_issues: Vec<CommonIssue>,
    pub performance_considerations: Vec<String>,
    pub security_guidance: Vec<String>,
    pub limitations: Vec<String>,
    pub related_topics: Vec<String>,
    pub documentation: Vec<DocLink>,
    pub validation_status: ValidationStatus,
}

impl TechnicalResponse {
    /// Empty response of the given kind, awaiting verification
    pub(crate) fn skeleton(kind: ResponseKind, title: &str, summary: String) -> Self {
        Self {
            kind,
            title: title.to_string(),
            summary,
            code_examples: Vec::new(),
            api_methods: Vec::new(),
            implementation_steps: Vec::new(),
            best_practices: Vec::new(),
            common_issues: Vec::new(),
            performance_considerations: Vec::new(),
            security_guidance: Vec::new(),
            limitations: Vec::new(),
            related_topics: Vec::new(),
            documentation: Vec::new(),
            validation_status: ValidationStatus::NeedsVerification,
        }
    }

    pub(crate) fn steps(mut self, items: &[&str]) -> Self {
        self.implementation_steps = strings(items);
        self
    }

    pub(crate) fn practices(mut self, items: &[&str]) -> Self {
        self.best_practices = strings(items);
        self
    }
}

/// Static technical reference data
#[derive(Debug, Clone)]
pub struct TechnicalCatalog {
    methods: Vec<ApiMethod>,
    patterns: Vec<(&'static str, TechnicalResponse)>,
    guides: Vec<(&'static str, TechnicalResponse)>,
}

impl TechnicalCatalog {
    pub fn builtin() -> Self {
        Self {
            methods: vec![identity_resolution(), audience_segmentation()],
            patterns: vec![("secure_data_collaboration", secure_data_collaboration())],
            guides: vec![("api_integration", api_integration_troubleshooting())],
        }
    }

    pub fn methods(&self) -> &[ApiMethod] {
        &self.methods
    }

    /// Look up a method by its display name, ignoring case
    pub fn method(&self, name: &str) -> Option<&ApiMethod> {
        self.methods
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
    }

    pub fn pattern(&self, key: &str) -> Option<&TechnicalResponse> {
        self.patterns.iter().find(|(k, _)| *k == key).map(|(_, r)| r)
    }

    pub fn guide(&self, key: &str) -> Option<&TechnicalResponse> {
        self.guides.iter().find(|(k, _)| *k == key).map(|(_, r)| r)
    }
}

impl Default for TechnicalCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn identity_resolution() -> ApiMethod {
    ApiMethod {
        name: "Identity Resolution".to_string(),
        endpoint: "/v2/identity/resolve".to_string(),
        method: HttpMethod::Post,
        description: "Resolve customer identities across multiple data sources and touchpoints"
            .to_string(),
        parameters: vec![
            ApiParameter::new(
                "identifiers",
                "array",
                true,
                "Array of customer identifiers (email, phone, postal address)",
                json!([
                    { "type": "email", "value": "customer@example.com" },
                    { "type": "phone", "value": "+1234567890" },
                    { "type": "postal", "value": "123 Main St, City, State 12345" }
                ]),
            ),
            ApiParameter::new(
                "resolution_strategy",
                "string",
                false,
                "Resolution strategy: strict, moderate, or flexible",
                json!("moderate"),
            )
            .with_validation("One of: strict, moderate, flexible"),
            ApiParameter::new(
                "return_format",
                "string",
                false,
                "Response format preference",
                json!("detailed"),
            )
            .with_validation("One of: minimal, standard, detailed"),
            ApiParameter::new(
                "privacy_mode",
                "string",
                false,
                "Privacy compliance mode",
                json!("gdpr_compliant"),
            )
            .with_validation("One of: standard, gdpr_compliant, ccpa_compliant"),
        ],
        responses: vec![
            ApiResponse {
                status: 200,
                description: "Successful identity resolution".to_string(),
                schema: Some(json!({
                    "resolved_identity": {
                        "confidence_score": "number",
                        "canonical_identifiers": "array",
                        "linked_identifiers": "array",
                        "resolution_metadata": "object"
                    }
                })),
                example: Some(json!({
                    "resolved_identity": {
                        "confidence_score": 0.92,
                        "canonical_identifiers": ["RampID:abc123"],
                        "linked_identifiers": [
                            { "type": "email", "value": "customer@example.com", "confidence": 0.95 },
                            { "type": "phone", "value": "+1234567890", "confidence": 0.89 }
                        ],
                        "resolution_metadata": {
                            "data_sources": ["email_graph", "device_graph", "postal_graph"],
                            "processing_time_ms": 45
                        }
                    }
                })),
            },
            ApiResponse {
                status: 400,
                description: "Invalid request parameters".to_string(),
                schema: None,
                example: Some(json!({ "error": "Missing required parameter: identifiers" })),
            },
        ],
        examples: vec![CodeExample::python(
            "Basic Identity Resolution",
            "Resolve customer identity using email and phone",
            include_str!("snippets/identity_resolution.py"),
        )
        .with_dependencies(&["requests"])
        .with_notes(&[
            "Replace YOUR_API_TOKEN with actual authentication token",
            "Consider implementing retry logic for production use",
            "Monitor confidence scores to ensure data quality",
        ])],
        use_cases: strings(&[
            "Customer data unification across touchpoints",
            "Cross-device customer journey tracking",
            "Privacy-compliant customer identification",
            "Data enrichment and customer profiling",
        ]),
        limitations: strings(&[
            "Requires minimum 2 identifiers for effective resolution",
            "Resolution accuracy depends on data quality and freshness",
            "Privacy regulations may limit available resolution strategies",
            "Rate limits apply: 1000 requests per minute per account",
        ]),
        best_practices: strings(&[
            "Always include multiple identifier types for better accuracy",
            "Use appropriate privacy mode based on data governance requirements",
            "Monitor confidence scores and set minimum thresholds",
            "Implement proper error handling and retry logic",
            "Cache results appropriately to minimize API calls",
            "Consider batch processing for high-volume operations",
        ]),
        related_methods: strings(&[
            "Audience Segmentation",
            "Lookalike Modeling",
            "Cross-Platform Attribution",
        ]),
    }
}

fn audience_segmentation() -> ApiMethod {
    ApiMethod {
        name: "Audience Segmentation".to_string(),
        endpoint: "/v2/audiences/segment".to_string(),
        method: HttpMethod::Post,
        description: "Create customer segments based on attributes, behaviors, and identities"
            .to_string(),
        parameters: vec![
            ApiParameter::new(
                "segment_criteria",
                "object",
                true,
                "Criteria for segment creation",
                json!({
                    "demographic": { "age_range": [25, 65], "income_range": [50000, 150000] },
                    "behavioral": { "purchase_frequency": "high", "category_affinity": ["electronics", "fashion"] },
                    "geographic": { "regions": ["US-CA", "US-NY"], "exclude_rural": true }
                }),
            ),
            ApiParameter::new(
                "segment_size_target",
                "number",
                false,
                "Target segment size",
                json!(100000),
            )
            .with_validation("Minimum: 1000, Maximum: 10000000"),
            ApiParameter::new(
                "quality_threshold",
                "number",
                false,
                "Minimum quality score for segment members",
                json!(0.7),
            )
            .with_validation("Range: 0.0 to 1.0"),
        ],
        responses: vec![ApiResponse {
            status: 200,
            description: "Successful segment creation".to_string(),
            schema: None,
            example: Some(json!({
                "segment_id": "seg_abc123",
                "segment_size": 95432,
                "quality_metrics": {
                    "average_confidence": 0.84,
                    "completeness_score": 0.91,
                    "freshness_score": 0.88
                },
                "estimated_reach": {
                    "addressable": 89234,
                    "activatable_platforms": ["facebook", "google", "amazon_dsp"]
                }
            })),
        }],
        examples: vec![CodeExample::python(
            "High-Value Customer Segmentation",
            "Create segment of high-value customers for premium campaign",
            include_str!("snippets/audience_segmentation.py"),
        )
        .with_dependencies(&["requests"])
        .with_notes(&[
            "Adjust criteria based on your customer data attributes",
            "Monitor quality scores to ensure segment effectiveness",
            "Consider segment refresh frequency based on campaign needs",
        ])],
        use_cases: strings(&[
            "Customer lifecycle stage segmentation",
            "Behavioral targeting for campaigns",
            "Lookalike seed audience creation",
            "Personalization engine input",
        ]),
        limitations: strings(&[
            "Minimum segment size: 1,000 customers",
            "Complex criteria may reduce segment size",
            "Data freshness affects segment accuracy",
            "Some attributes may not be available for all customers",
        ]),
        best_practices: strings(&[
            "Start with broader criteria and refine iteratively",
            "Monitor segment performance and quality metrics",
            "Use appropriate refresh frequency for use case",
            "Consider overlap analysis with existing segments",
            "Validate segments with business stakeholders",
        ]),
        related_methods: strings(&[
            "Identity Resolution",
            "Lookalike Modeling",
            "Customer Journey Analytics",
        ]),
    }
}

fn secure_data_collaboration() -> TechnicalResponse {
    TechnicalResponse {
        code_examples: vec![CodeExample::python(
            "Secure Data Collaboration Workflow",
            "End-to-end implementation of secure data sharing with privacy controls",
            include_str!("snippets/secure_collaboration.py"),
        )
        .with_dependencies(&["requests", "hashlib"])
        .with_notes(&[
            "Implement proper key management for production use",
            "Consider data residency requirements for global deployments",
            "Monitor privacy metrics and audit logs regularly",
        ])],
        common_issues: vec![
            CommonIssue::new(
                "Data suppression reducing result quality",
                "Adjust k-anonymity threshold or increase dataset size",
                "Test privacy settings with representative data samples",
            ),
            CommonIssue::new(
                "Query timeout on large datasets",
                "Implement query optimization and result pagination",
                "Profile queries and set appropriate timeouts",
            ),
        ],
        performance_considerations: strings(&[
            "Privacy protections add computational overhead",
            "Larger datasets improve privacy while maintaining utility",
            "Query complexity affects processing time",
            "Consider caching for frequently accessed results",
        ]),
        security_guidance: strings(&[
            "Use TLS 1.3 for all API communications",
            "Implement proper authentication token management",
            "Regular security audits of data flows",
            "Monitor for unusual access patterns",
        ]),
        limitations: strings(&[
            "Minimum dataset size requirements for privacy protection",
            "Some query types may not be compatible with differential privacy",
            "Results may have reduced precision due to privacy noise",
            "Export restrictions may limit downstream usage",
        ]),
        related_topics: strings(&[
            "GDPR Compliance Implementation",
            "Differential Privacy Configuration",
            "Data Governance Frameworks",
        ]),
        documentation: vec![
            DocLink::official(
                "Privacy-Preserving Analytics Guide",
                "https://docs.liveramp.com/privacy-analytics",
            ),
            DocLink::official(
                "Secure Cleanroom Best Practices",
                "https://docs.liveramp.com/cleanroom-security",
            ),
        ],
        validation_status: ValidationStatus::Verified,
        ..TechnicalResponse::skeleton(
            ResponseKind::Implementation,
            "Secure Data Collaboration Implementation",
            "Complete implementation pattern for privacy-compliant data collaboration using LiveRamp APIs"
                .to_string(),
        )
        .steps(&[
            "Design privacy-compliant data schema",
            "Set up cleanroom with appropriate privacy controls",
            "Implement secure data upload with encryption",
            "Configure differential privacy and k-anonymity",
            "Execute queries with privacy validation",
            "Monitor and audit all data access",
        ])
        .practices(&[
            "Always enable audit logging for compliance",
            "Use minimum necessary data principle",
            "Implement proper access controls and permissions",
            "Regular privacy impact assessments",
            "Monitor for privacy leakage in results",
        ])
    }
}

fn api_integration_troubleshooting() -> TechnicalResponse {
    TechnicalResponse {
        code_examples: vec![CodeExample::python(
            "API Health Check and Debugging",
            "Comprehensive API health check with detailed error reporting",
            include_str!("snippets/api_health_check.py"),
        )
        .with_dependencies(&["requests"])
        .with_notes(&[
            "Run this health check before deploying to production",
            "Schedule regular health checks to monitor API status",
            "Keep health check results for troubleshooting history",
        ])],
        common_issues: vec![
            CommonIssue::new(
                "401 Unauthorized errors",
                "Check API token validity and regenerate if necessary",
                "Implement token refresh logic and monitor expiration",
            ),
            CommonIssue::new(
                "429 Rate limit exceeded",
                "Implement exponential backoff and reduce request frequency",
                "Monitor API usage and implement request queuing",
            ),
            CommonIssue::new(
                "Timeout errors on large requests",
                "Increase timeout values and implement request chunking",
                "Profile request sizes and optimize data transfer",
            ),
            CommonIssue::new(
                "Inconsistent response formats",
                "Update API client to handle different response versions",
                "Use API versioning and validate response schemas",
            ),
        ],
        performance_considerations: strings(&[
            "Implement request caching for frequently accessed data",
            "Use batch operations when available",
            "Monitor and optimize request payload sizes",
            "Consider regional API endpoints for reduced latency",
        ]),
        security_guidance: strings(&[
            "Never log API tokens or sensitive data",
            "Use environment variables for configuration",
            "Implement proper certificate validation",
            "Monitor for unusual API usage patterns",
        ]),
        limitations: strings(&[
            "Rate limits vary by endpoint and account type",
            "Some operations require specific permissions",
            "Large datasets may require pagination",
            "Real-time operations have stricter timeout limits",
        ]),
        related_topics: strings(&[
            "API Authentication Best Practices",
            "Performance Optimization Strategies",
            "Error Handling Patterns",
        ]),
        documentation: vec![
            DocLink::official(
                "API Reference Documentation",
                "https://docs.liveramp.com/api-reference",
            ),
            DocLink::official(
                "Troubleshooting Common Issues",
                "https://docs.liveramp.com/troubleshooting",
            ),
        ],
        validation_status: ValidationStatus::Verified,
        ..TechnicalResponse::skeleton(
            ResponseKind::Troubleshooting,
            "API Integration Troubleshooting Guide",
            "Common issues and solutions for LiveRamp API integration problems".to_string(),
        )
        .steps(&[
            "Identify the specific error or issue",
            "Run comprehensive health check",
            "Check authentication and permissions",
            "Test individual endpoints",
            "Analyze response times and errors",
            "Implement recommended fixes",
        ])
        .practices(&[
            "Implement comprehensive logging for all API calls",
            "Use proper timeout values for all requests",
            "Implement retry logic with exponential backoff",
            "Monitor API rate limits and quotas",
            "Set up alerting for API failures",
        ])
    }
}
