//! Profile data shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use logseek_core::types::ServiceUrl;
use logseek_core::{Credentials, Record, RepoDescriptor};

pub const DEFAULT_ENDPOINT: &str = "https://logdb.qiniu.com";

/// Floor for the default query window.
pub const DEFAULT_RANGE_MINUTES: u32 = 5;

/// Cached knowledge about one repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoCache {
    pub repo: RepoDescriptor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<Record>,
}

/// One stored account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Account {
    pub access_key: String,
    pub secret_key: String,
    #[serde(default)]
    pub endpoint: String,
    /// Selected repository name; empty until `repo` is run.
    #[serde(default)]
    pub repo: String,
    /// Default query window in minutes; 0 means unset.
    #[serde(default)]
    pub range: u32,
    #[serde(default)]
    pub repos: BTreeMap<String, RepoCache>,
}

/// The whole profile file: every stored account keyed by alias.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileBook {
    /// Alias of the account commands act on.
    #[serde(default)]
    pub current: String,
    #[serde(default)]
    pub accounts: BTreeMap<String, Account>,
}

impl ProfileBook {
    pub fn current_account(&self) -> Option<&Account> {
        self.accounts.get(&self.current)
    }

    pub fn current_account_mut(&mut self) -> Option<&mut Account> {
        self.accounts.get_mut(&self.current)
    }
}

/// The resolved view of the current account, after config overrides.
#[derive(Debug, Clone)]
pub struct Profile {
    pub alias: String,
    pub credentials: Credentials,
    pub endpoint: ServiceUrl,
    /// Selected repository name; empty when none is selected yet.
    pub repo: String,
    pub range_minutes: u32,
    /// Cached descriptor and sample for the selected repository.
    pub cache: Option<RepoCache>,
}

impl Profile {
    /// The selected repository name, or an error message when unset.
    pub fn repo_name(&self) -> Option<&str> {
        if self.repo.is_empty() {
            None
        } else {
            Some(&self.repo)
        }
    }
}
