// Customer support mode
//
// Use case reference data, the response generator and reply formatting.

pub mod formatter;
pub mod generator;
pub mod library;

pub use formatter::{format_support_response, parse_intent, support_metadata, CustomerIntent, IntentKind};
pub use generator::{
    CompetitiveAdvantage, CustomerSize, Feasibility, Implementation, Pricing, SupportQuery,
    SupportResponse, SupportResponseGenerator, Urgency,
};
pub use library::{
    BusinessOutcome, Complexity, Confidence, CustomerUseCase, FeasibilityRequirements,
    IndustryConstraints, UseCaseLibrary,
};
