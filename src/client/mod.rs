// Demo API client
//
// JSON-over-HTTP calls to the chat, template, partner and health
// endpoints, plus the typed errors and recovery state around them.

pub mod api;
pub mod error;
pub mod recovery;
pub mod types;

pub use api::ApiClient;
pub use error::{ClientError, ErrorKind};
pub use recovery::{render_panel, ErrorRecord, RecoveryState, MAX_RETRY_ATTEMPTS};
pub use types::{
    ChatReply, ChatRequest, EnhancedChatRequest, HealthReport, Partner, PartnerListing,
    SupportAssessRequest, TechnicalQueryRequest, TechnicalRequestContext, TemplateListing,
};
