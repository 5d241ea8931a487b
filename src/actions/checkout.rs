//! `actions/checkout`

use crate::actions::action_step;
use crate::core::{ActionRef, JobId, Pipeline, StepId, StructuralError, ValueMap};

pub const CHECKOUT_VERSION: &str = "v5";

/// Inputs for `actions/checkout`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutProps {
    /// Repository name with owner, defaults to the triggering repository
    pub repository: Option<String>,

    /// Branch, tag or SHA to check out
    pub git_ref: Option<String>,

    pub token: Option<String>,

    pub ssh_key: Option<String>,

    /// Keep the token or SSH key in the local git config
    pub persist_credentials: Option<bool>,

    /// Relative path under `$GITHUB_WORKSPACE`
    pub path: Option<String>,

    pub clean: Option<bool>,

    /// Partial clone filter; overrides sparse checkout
    pub filter: Option<String>,

    /// Newline separated sparse checkout patterns
    pub sparse_checkout: Option<String>,

    /// Number of commits to fetch, 0 for full history
    pub fetch_depth: Option<u32>,

    pub fetch_tags: Option<bool>,

    pub lfs: Option<bool>,

    /// `true` or `recursive`
    pub submodules: Option<String>,
}

impl CheckoutProps {
    fn inputs(&self) -> ValueMap {
        let mut inputs = ValueMap::new();
        let mut put = |key: &str, value: Option<crate::core::Value>| {
            if let Some(value) = value {
                inputs.insert(key.to_string(), value);
            }
        };
        put("repository", self.repository.clone().map(Into::into));
        put("ref", self.git_ref.clone().map(Into::into));
        put("token", self.token.clone().map(Into::into));
        put("ssh-key", self.ssh_key.clone().map(Into::into));
        put("persist-credentials", self.persist_credentials.map(Into::into));
        put("path", self.path.clone().map(Into::into));
        put("clean", self.clean.map(Into::into));
        put("filter", self.filter.clone().map(Into::into));
        put("sparse-checkout", self.sparse_checkout.clone().map(Into::into));
        put("fetch-depth", self.fetch_depth.map(Into::into));
        put("fetch-tags", self.fetch_tags.map(Into::into));
        put("lfs", self.lfs.map(Into::into));
        put("submodules", self.submodules.clone().map(Into::into));
        inputs
    }
}

/// Append a checkout step, pinned to [`CHECKOUT_VERSION`]
pub fn checkout(pipeline: &mut Pipeline, job: JobId, props: CheckoutProps) -> Result<StepId, StructuralError> {
    let action = ActionRef::pinned("actions", "checkout", CHECKOUT_VERSION);
    action_step(pipeline, job, "checkout", &action, props.inputs())
}
