mod source_host_policy;
mod vcs_revision_policy;

pub use source_host_policy::{RepositoryRef, SourceHostPolicy, SOURCE_HOST_DOMAIN};
pub use vcs_revision_policy::{
    VcsRevisionPolicy, VcsVersion, BRANCH_QUALIFIER, LATEST_VERSION, SHORT_COMMIT_LEN,
};
