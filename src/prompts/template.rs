// Template context derivation
//
// Summarises an analytics template listing into the counts and capability
// flags the scoring engine reads.

use serde::{Deserialize, Serialize};

use super::types::TemplateContext;

/// Lifecycle status reported for a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateStatus {
    Ready,
    Active,
    MissingDatasets,
    #[default]
    #[serde(other)]
    Unknown,
}

/// One template as returned by the listing endpoints
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TemplateStatus,
}

impl TemplateSummary {
    pub fn new(name: impl Into<String>, category: impl Into<String>, status: TemplateStatus) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            status,
            ..Self::default()
        }
    }
}

const PATTERN_OF_LIFE: [&str; 3] = ["pattern of life", "pattern_of_life", "pattern-of-life"];

impl TemplateContext {
    /// Derive the context from a template listing.
    ///
    /// Capability flags are case-insensitive substring matches over every
    /// template's category and name.
    pub fn from_templates(templates: &[TemplateSummary]) -> Self {
        let mut ctx = TemplateContext {
            total_templates: templates.len() as u32,
            ..TemplateContext::empty()
        };

        for template in templates {
            match template.status {
                TemplateStatus::Ready => ctx.ready_templates += 1,
                TemplateStatus::MissingDatasets => ctx.missing_dataset_templates += 1,
                _ => {}
            }

            if !template.category.is_empty() {
                ctx.categories.insert(template.category.clone());
            }

            let haystack = format!("{} {}", template.category, template.name).to_lowercase();
            ctx.has_location_data |= haystack.contains("location");
            ctx.has_sentiment_analysis |= haystack.contains("sentiment");
            ctx.has_pattern_of_life |= PATTERN_OF_LIFE.iter().any(|p| haystack.contains(p));
            ctx.has_combined_analysis |= haystack.contains("combined");
        }

        tracing::debug!(
            "Template context: {} total, {} ready, {} missing datasets",
            ctx.total_templates,
            ctx.ready_templates,
            ctx.missing_dataset_templates
        );

        ctx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> Vec<TemplateSummary> {
        vec![
            TemplateSummary::new("Global Sentiment Analysis", "Sentiment Analysis", TemplateStatus::Ready),
            TemplateSummary::new("Mobile Location Patterns", "Location Data", TemplateStatus::MissingDatasets),
            TemplateSummary::new("Pattern of Life Study", "Behavioral", TemplateStatus::Ready),
            TemplateSummary::new("Brand Monitor", "Sentiment Analysis", TemplateStatus::Active),
        ]
    }

    #[test]
    fn test_counts_by_status() {
        let ctx = TemplateContext::from_templates(&listing());
        assert_eq!(ctx.total_templates, 4);
        assert_eq!(ctx.ready_templates, 2);
        assert_eq!(ctx.missing_dataset_templates, 1);
        assert!(ctx.is_consistent());
    }

    #[test]
    fn test_distinct_categories() {
        let ctx = TemplateContext::from_templates(&listing());
        let categories: Vec<&str> = ctx.categories.iter().map(String::as_str).collect();
        assert_eq!(categories, vec!["Behavioral", "Location Data", "Sentiment Analysis"]);
    }

    #[test]
    fn test_capability_flags() {
        let ctx = TemplateContext::from_templates(&listing());
        assert!(ctx.has_sentiment_analysis);
        assert!(ctx.has_location_data);
        assert!(ctx.has_pattern_of_life);
        assert!(!ctx.has_combined_analysis);
    }

    #[test]
    fn test_empty_listing() {
        let ctx = TemplateContext::from_templates(&[]);
        assert_eq!(ctx, TemplateContext::empty());
    }

    #[test]
    fn test_unknown_status_deserializes() {
        let summary: TemplateSummary =
            serde_json::from_str(r#"{"name": "X", "category": "Y", "status": "ARCHIVED"}"#).unwrap();
        assert_eq!(summary.status, TemplateStatus::Unknown);

        let ready: TemplateSummary =
            serde_json::from_str(r#"{"name": "X", "status": "MISSING_DATASETS"}"#).unwrap();
        assert_eq!(ready.status, TemplateStatus::MissingDatasets);
    }
}
