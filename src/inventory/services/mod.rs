mod aggregator;
mod identity_resolver;
mod metadata_generator;
mod submission_classifier;

pub use aggregator::Aggregator;
pub use identity_resolver::{IdentityResolver, ResolvedEvidence};
pub use metadata_generator::{MetadataGenerator, TOOL_NAME};
pub use submission_classifier::{
    classify_submission, STATUS_ACCEPTED, STATUS_OK, STATUS_TOO_MANY_REQUESTS,
};
