//! Application use cases. Orchestrate domain logic via ports.

pub mod assessment_service;
pub mod commentary_service;
pub mod unit_resolver;

pub use assessment_service::AssessmentService;
pub use commentary_service::CommentaryService;
pub use unit_resolver::{DelegatingResolver, DeterministicResolver, new_conversion_session};
