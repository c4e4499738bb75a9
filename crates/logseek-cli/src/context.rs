//! Per-invocation command context.
//!
//! Everything a command needs is assembled here once: the profile book,
//! the resolved current account, and the HTTP store. No global state.

use std::path::Path;

use anyhow::{Context, Result, bail};

use logseek_core::types::ServiceUrl;
use logseek_core::{Credentials, LogStore, RepoDescriptor};
use logseek_http::HttpStore;

use crate::config::{self, ConfigOverride};
use crate::profile::{
    DEFAULT_ENDPOINT, DEFAULT_RANGE_MINUTES, Profile, ProfileBook, RepoCache, storage,
};

pub struct CommandContext {
    pub book: ProfileBook,
    overrides: ConfigOverride,
}

impl CommandContext {
    /// Load the profile book and any `--config` overrides.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let book = storage::load()?;
        let overrides = match config_path {
            Some(path) => config::load(path)?,
            None => ConfigOverride::default(),
        };
        Ok(Self { book, overrides })
    }

    /// Resolve the account commands act on, with overrides applied.
    pub fn profile(&self) -> Result<Profile> {
        let account = self.book.current_account();

        let access_key = self
            .overrides
            .ak
            .clone()
            .or_else(|| account.map(|a| a.access_key.clone()))
            .unwrap_or_default();
        let secret_key = self
            .overrides
            .sk
            .clone()
            .or_else(|| account.map(|a| a.secret_key.clone()))
            .unwrap_or_default();

        if access_key.is_empty() || secret_key.is_empty() {
            bail!("No account configured. Run 'logseek login <ak> <sk>' first.");
        }

        let endpoint = self
            .overrides
            .endpoint
            .clone()
            .or_else(|| account.map(|a| a.endpoint.clone()).filter(|e| !e.is_empty()))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = ServiceUrl::new(&endpoint).context("Invalid endpoint URL")?;

        let repo = self
            .overrides
            .repo
            .clone()
            .or_else(|| account.map(|a| a.repo.clone()))
            .unwrap_or_default();

        let range = account.map(|a| a.range).unwrap_or(0);
        let range_minutes = if range < 1 { DEFAULT_RANGE_MINUTES } else { range };

        let cache = account.and_then(|a| a.repos.get(&repo)).cloned();

        Ok(Profile {
            alias: self.book.current.clone(),
            credentials: Credentials::new(access_key, secret_key),
            endpoint,
            repo,
            range_minutes,
            cache,
        })
    }

    /// Build an HTTP store for the resolved profile.
    pub fn store(&self, profile: &Profile) -> Result<HttpStore> {
        HttpStore::new(profile.endpoint.clone(), profile.credentials.clone())
            .context("Failed to build HTTP client")
    }

    /// The descriptor for the profile's selected repository.
    ///
    /// Served from the profile cache unless `refresh` is set; a fetch
    /// updates the cache in memory (persisted by [`Self::save`]).
    pub async fn descriptor(
        &mut self,
        profile: &Profile,
        store: &HttpStore,
        refresh: bool,
    ) -> Result<RepoDescriptor> {
        let Some(name) = profile.repo_name() else {
            bail!("No repository selected. Run 'logseek repo <name>' first.");
        };

        if !refresh {
            if let Some(cache) = &profile.cache {
                return Ok(cache.repo.clone());
            }
        }

        let descriptor = store
            .get_repo(name)
            .await
            .with_context(|| format!("Failed to describe repository '{}'", name))?;

        if let Some(account) = self.book.current_account_mut() {
            account
                .repos
                .entry(name.to_string())
                .and_modify(|c| c.repo = descriptor.clone())
                .or_insert_with(|| RepoCache {
                    repo: descriptor.clone(),
                    sample: None,
                });
        }

        Ok(descriptor)
    }

    /// Persist the book, warning instead of failing.
    pub fn save(&self) {
        storage::save_best_effort(&self.book);
    }
}
