// Chat mode definitions
//
// The two assistant personalities, their system prompts and response
// styles, plus the static quick actions and welcome text shown per mode.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Assistant personality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    #[default]
    CustomerSupport,
    TechnicalExpert,
}

impl ChatMode {
    pub const ALL: [ChatMode; 2] = [ChatMode::CustomerSupport, ChatMode::TechnicalExpert];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChatMode::CustomerSupport => "customer_support",
            ChatMode::TechnicalExpert => "technical_expert",
        }
    }

    pub fn config(&self) -> ChatModeConfig {
        ChatModeConfig::for_mode(*self)
    }
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChatMode {
    type Err = anyhow::Error;

    /// Accepts the wire tag or the short names `support` / `technical`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer_support" | "support" | "cs" => Ok(ChatMode::CustomerSupport),
            "technical_expert" | "technical" | "tech" => Ok(ChatMode::TechnicalExpert),
            other => anyhow::bail!(
                "Unknown chat mode '{}' (expected 'support' or 'technical')",
                other
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Business,
    Technical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    #[default]
    Brief,
    Detailed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    Executive,
    Educational,
}

/// How replies in a mode should read
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseStyle {
    pub tone: Tone,
    pub verbosity: Verbosity,
    pub format: ResponseFormat,
    pub include_actions: bool,
    pub include_expansion: bool,
}

/// Static description of a chat mode
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatModeConfig {
    pub mode: ChatMode,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub system_prompt: &'static str,
    pub capabilities: &'static [&'static str],
    pub response_style: ResponseStyle,
}

const SUPPORT_SYSTEM_PROMPT: &str = "You are a Senior Customer Support Specialist and expert on LiveRamp's data collaboration APIs.
Your role is to help LiveRamp employees (support, sales, solution engineers) answer customer questions accurately and persuasively.

Key Responsibilities:
- Translate customer business needs into API capability assessments
- Provide clear \"yes/no\" answers with supporting details
- Explain what's possible vs what's not, with alternatives
- Include competitive advantages and differentiators
- Give timeline estimates and implementation requirements
- Suggest next steps for customers

Communication Style:
- Customer-ready language (avoid internal jargon)
- Clear capability statements with confidence levels
- Include business benefits and ROI indicators
- Provide competitive talking points when relevant
- Always offer expansion into technical details
- Include risk assessments and success factors

CRITICAL: Never promise capabilities that don't exist. Always base responses on actual API documentation and current system capabilities. When uncertain, clearly state limitations.";

const TECHNICAL_SYSTEM_PROMPT: &str = "You are a Senior Solution Engineer and expert on LiveRamp's data collaboration API technical implementation.
Your role is to provide accurate, detailed technical guidance for engineers, product managers, and technical staff.

Key Responsibilities:
- Explain API methods, parameters, and data models in detail
- Provide implementation code examples and patterns
- Clarify technical capabilities and limitations
- Suggest best practices and optimization strategies
- Help troubleshoot integration issues
- Explain privacy, security, and compliance considerations

Communication Style:
- Technical accuracy is paramount
- Use code examples and practical scenarios
- Include method signatures and parameter details
- Explain concepts with increasing complexity
- Provide performance and scaling guidance
- Always validate against real API schema

CRITICAL: Never make up API methods, parameters, or capabilities. Always base responses on actual API documentation and real-time validation. When documentation is incomplete, clearly state what needs verification.";

impl ChatModeConfig {
    pub fn for_mode(mode: ChatMode) -> Self {
        match mode {
            ChatMode::CustomerSupport => Self {
                mode,
                name: "Customer Support",
                description: "Help LiveRamp employees answer customer questions about API capabilities",
                icon: "🎧",
                system_prompt: SUPPORT_SYSTEM_PROMPT,
                capabilities: &[
                    "Customer capability assessment",
                    "Use case feasibility analysis",
                    "Competitive positioning",
                    "Implementation timeline estimation",
                    "ROI and business case support",
                    "Industry-specific guidance",
                ],
                response_style: ResponseStyle {
                    tone: Tone::Business,
                    verbosity: Verbosity::Brief,
                    format: ResponseFormat::Executive,
                    include_actions: true,
                    include_expansion: true,
                },
            },
            ChatMode::TechnicalExpert => Self {
                mode,
                name: "Technical Expert",
                description: "Deep technical guidance for engineers, PMs, and technical staff",
                icon: "🔧",
                system_prompt: TECHNICAL_SYSTEM_PROMPT,
                capabilities: &[
                    "Complete API method documentation",
                    "Implementation code examples",
                    "Integration pattern guidance",
                    "Performance optimization",
                    "Security and compliance",
                    "Troubleshooting support",
                    "Best practices",
                    "Capability limitations",
                ],
                response_style: ResponseStyle {
                    tone: Tone::Technical,
                    verbosity: Verbosity::Detailed,
                    format: ResponseFormat::Educational,
                    include_actions: false,
                    include_expansion: true,
                },
            },
        }
    }
}

/// A canned sample query offered when there is nothing better to suggest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub query: &'static str,
    pub category: &'static str,
}

impl QuickAction {
    /// Display form: `"{icon} {label}"`
    pub fn format(&self) -> String {
        format!("{} {}", self.icon, self.label)
    }
}

const SUPPORT_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        id: "lookalike",
        label: "Lookalike Modeling",
        icon: "🎯",
        query: "Customer wants lookalike modeling for their retail audience",
        category: "Audience",
    },
    QuickAction {
        id: "attribution",
        label: "Real-time Attribution",
        icon: "⚡",
        query: "Financial services client needs real-time attribution analysis",
        category: "Analytics",
    },
    QuickAction {
        id: "segmentation",
        label: "Audience Segmentation",
        icon: "📊",
        query: "Can we help automotive client with audience segmentation?",
        category: "Audience",
    },
    QuickAction {
        id: "privacy",
        label: "Privacy Compliance",
        icon: "🛡️",
        query: "Customer asking about GDPR compliance for data collaboration",
        category: "Compliance",
    },
];

const TECHNICAL_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        id: "identity-api",
        label: "Identity Resolution API",
        icon: "🔑",
        query: "Show me Python code for identity resolution with error handling",
        category: "API",
    },
    QuickAction {
        id: "auth-troubleshoot",
        label: "Authentication Issues",
        icon: "🔐",
        query: "I am getting 401 errors when calling the LiveRamp API",
        category: "Troubleshooting",
    },
    QuickAction {
        id: "performance",
        label: "Performance Optimization",
        icon: "⚡",
        query: "How to optimize API calls for large datasets?",
        category: "Performance",
    },
    QuickAction {
        id: "security",
        label: "Security Best Practices",
        icon: "🛡️",
        query: "What are the security best practices for API integration?",
        category: "Security",
    },
];

/// Sample queries for a mode
pub fn quick_actions(mode: ChatMode) -> &'static [QuickAction] {
    match mode {
        ChatMode::CustomerSupport => &SUPPORT_ACTIONS,
        ChatMode::TechnicalExpert => &TECHNICAL_ACTIONS,
    }
}

/// Greeting shown when a mode becomes active
pub fn welcome_message(mode: ChatMode) -> String {
    let config = mode.config();
    let mut content = format!(
        "{} **Welcome to LiveRamp AI Assistant** - {}\n\n",
        config.icon, config.name
    );

    match mode {
        ChatMode::CustomerSupport => content.push_str(
            "I'm your **Customer Support Specialist** for LiveRamp APIs:\n\
             • 🎯 **Instant Feasibility Assessments** for customer requests\n\
             • 🏭 **Industry-Specific Guidance** (retail, finance, automotive)\n\
             • 💪 **Competitive Advantages** with proof points\n\
             • ⏱️ **Implementation Timelines** and complexity estimates\n\
             • 📋 **Customer-Ready Talking Points** for sales teams\n\n\
             **Ready to help with your customer questions!**",
        ),
        ChatMode::TechnicalExpert => content.push_str(
            "I'm your **Technical Implementation Expert** for LiveRamp APIs:\n\
             • 🔧 **API Methods & Code Examples**\n\
             • 📚 **Implementation Patterns & Best Practices**\n\
             • 🛡️ **Security & Compliance Guidance**\n\
             • ⚡ **Performance Optimization Tips**\n\
             • 🔍 **Troubleshooting Support**\n\n\
             **Ready to help with your technical implementation!**",
        ),
    }

    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!("support".parse::<ChatMode>().unwrap(), ChatMode::CustomerSupport);
        assert_eq!("technical_expert".parse::<ChatMode>().unwrap(), ChatMode::TechnicalExpert);
        assert_eq!(" Tech ".parse::<ChatMode>().unwrap(), ChatMode::TechnicalExpert);
        assert!("manager".parse::<ChatMode>().is_err());
    }

    #[test]
    fn test_mode_wire_tag() {
        let json = serde_json::to_string(&ChatMode::TechnicalExpert).unwrap();
        assert_eq!(json, "\"technical_expert\"");
    }

    #[test]
    fn test_mode_configs() {
        let support = ChatMode::CustomerSupport.config();
        assert_eq!(support.icon, "🎧");
        assert_eq!(support.response_style.verbosity, Verbosity::Brief);
        assert!(support.response_style.include_actions);

        let tech = ChatMode::TechnicalExpert.config();
        assert_eq!(tech.capabilities.len(), 8);
        assert_eq!(tech.response_style.tone, Tone::Technical);
        assert!(tech.system_prompt.contains("Never make up API methods"));
    }

    #[test]
    fn test_quick_actions_per_mode() {
        assert_eq!(quick_actions(ChatMode::CustomerSupport)[0].format(), "🎯 Lookalike Modeling");
        assert!(quick_actions(ChatMode::TechnicalExpert)
            .iter()
            .any(|a| a.query.contains("401")));
    }

    #[test]
    fn test_welcome_message() {
        let text = welcome_message(ChatMode::TechnicalExpert);
        assert!(text.starts_with("🔧 **Welcome to LiveRamp AI Assistant** - Technical Expert"));
        assert!(text.ends_with("**Ready to help with your technical implementation!**"));
    }
}
