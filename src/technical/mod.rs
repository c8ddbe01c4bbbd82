// Technical-expert mode
//
// API reference catalog plus the generator and formatter built on it.

pub mod catalog;
pub mod generator;

pub use catalog::{
    ApiMethod, ApiParameter, ApiResponse, CodeExample, CommonIssue, DocKind, DocLink, HttpMethod,
    ResponseKind, TechnicalCatalog, TechnicalResponse, ValidationStatus,
};
pub use generator::{format_technical_response, technical_metadata, TechnicalExpertGenerator};
