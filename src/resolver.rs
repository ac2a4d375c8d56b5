use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::context::ContextSet;
use crate::error::{IconError, IconResult};
use crate::locator::{SearchRoots, ThemeLocator};
use crate::matcher;
use crate::materialize;
use crate::platform::{Platform, ThemeQuery};
use crate::theme::ThemeDescriptor;
use crate::walker::{ChainState, InheritanceWalker};

/// Where the name of the theme to start from comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeSource {
    Fixed(String),
    Desktop(ThemeQuery),
}

/// Resolves icon names to files and image bytes.
///
/// Cloning is cheap and clones share the theme cache.
#[derive(Debug, Clone)]
pub struct IconResolver {
    platform: Platform,
    locator: ThemeLocator,
    cache_ttl: Duration,
    source: ThemeSource,
    fallback_theme: String,
    standalone: bool,
}

impl IconResolver {
    pub fn new(config: &Config) -> Self {
        let source = match &config.theme {
            Some(theme) => ThemeSource::Fixed(theme.clone()),
            None => ThemeSource::Desktop(ThemeQuery::from_env()),
        };
        Self {
            platform: Platform::current(),
            locator: ThemeLocator::new(SearchRoots::standard(), config.cache_ttl()),
            cache_ttl: config.cache_ttl(),
            source,
            fallback_theme: config.fallback_theme.clone(),
            standalone: config.standalone,
        }
    }

    pub fn with_search_roots(mut self, roots: SearchRoots) -> Self {
        self.locator = ThemeLocator::new(roots, self.cache_ttl);
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.source = ThemeSource::Fixed(theme.into());
        self
    }

    pub fn with_source(mut self, source: ThemeSource) -> Self {
        self.source = source;
        self
    }

    pub fn locator(&self) -> &ThemeLocator {
        &self.locator
    }

    pub fn clear_cache(&self) {
        self.locator.cache().clear();
    }

    /// Name of the theme resolution starts from. A failed desktop query falls
    /// back to the configured fallback theme.
    pub fn active_theme(&self) -> IconResult<String> {
        self.platform.ensure_supported()?;
        Ok(match &self.source {
            ThemeSource::Fixed(name) => name.clone(),
            ThemeSource::Desktop(query) => query.run().unwrap_or_else(|e| {
                warn!(error = %e, fallback = %self.fallback_theme, "No active icon theme");
                self.fallback_theme.clone()
            }),
        })
    }

    pub async fn active_theme_async(&self) -> IconResult<String> {
        self.platform.ensure_supported()?;
        Ok(match &self.source {
            ThemeSource::Fixed(name) => name.clone(),
            ThemeSource::Desktop(query) => match query.run_async().await {
                Ok(name) => name,
                Err(e) => {
                    warn!(error = %e, fallback = %self.fallback_theme, "No active icon theme");
                    self.fallback_theme.clone()
                }
            },
        })
    }

    /// Located themes of the chain starting at `theme`, in lookup order.
    pub fn chain(&self, theme: &str) -> IconResult<Vec<Arc<ThemeDescriptor>>> {
        self.platform.ensure_supported()?;
        Ok(self.walker(theme).collect())
    }

    pub fn resolve_icon_path(
        &self,
        icon_name: &str,
        size: u32,
        contexts: impl Into<ContextSet>,
    ) -> IconResult<Option<PathBuf>> {
        let theme = self.active_theme()?;
        self.resolve_in_theme(&theme, icon_name, size, &contexts.into())
    }

    pub fn resolve_in_theme(
        &self,
        theme: &str,
        icon_name: &str,
        size: u32,
        contexts: &ContextSet,
    ) -> IconResult<Option<PathBuf>> {
        self.platform.ensure_supported()?;
        if size == 0 {
            return Ok(None);
        }

        for descriptor in self.walker(theme) {
            if let Some(path) = matcher::find_in_theme(&descriptor, icon_name, size, contexts) {
                debug!(icon = icon_name, path = %path.display(), "Resolved icon");
                return Ok(Some(path));
            }
        }

        if self.standalone {
            let candidates = matcher::standalone_candidates(self.locator.roots(), icon_name);
            if let Some(path) = matcher::first_existing(&candidates) {
                return Ok(Some(path));
            }
        }

        debug!(icon = icon_name, theme, size, "Icon not found");
        Ok(None)
    }

    pub fn resolve_icon_bytes(
        &self,
        icon_name: &str,
        size: u32,
        contexts: impl Into<ContextSet>,
    ) -> IconResult<Option<Vec<u8>>> {
        match self.resolve_icon_path(icon_name, size, contexts)? {
            Some(path) => materialize::materialize(&path, size).map(Some),
            None => Ok(None),
        }
    }

    pub async fn resolve_icon_path_async(
        &self,
        icon_name: &str,
        size: u32,
        contexts: impl Into<ContextSet>,
    ) -> IconResult<Option<PathBuf>> {
        let theme = self.active_theme_async().await?;
        self.resolve_in_theme_async(&theme, icon_name, size, &contexts.into())
            .await
    }

    pub async fn resolve_in_theme_async(
        &self,
        theme: &str,
        icon_name: &str,
        size: u32,
        contexts: &ContextSet,
    ) -> IconResult<Option<PathBuf>> {
        self.platform.ensure_supported()?;
        if size == 0 {
            return Ok(None);
        }

        let mut state = self.chain_state(theme);
        while let Some(name) = state.next_name() {
            let Some(descriptor) = self.locator.locate_async(&name).await else {
                continue;
            };
            state.push_parents(&descriptor);
            if let Some(path) =
                matcher::find_in_theme_async(&descriptor, icon_name, size, contexts).await
            {
                debug!(icon = icon_name, path = %path.display(), "Resolved icon");
                return Ok(Some(path));
            }
        }

        if self.standalone {
            let candidates = matcher::standalone_candidates(self.locator.roots(), icon_name);
            if let Some(path) = matcher::first_existing_async(&candidates).await {
                return Ok(Some(path));
            }
        }

        debug!(icon = icon_name, theme, size, "Icon not found");
        Ok(None)
    }

    pub async fn resolve_icon_bytes_async(
        &self,
        icon_name: &str,
        size: u32,
        contexts: impl Into<ContextSet>,
    ) -> IconResult<Option<Vec<u8>>> {
        match self.resolve_icon_path_async(icon_name, size, contexts).await? {
            Some(path) => materialize::materialize_async(&path, size).await.map(Some),
            None => Ok(None),
        }
    }

    /// Streams every existing matching file across the whole chain, in chain
    /// priority order. The first item is the file the single-result forms
    /// return. Dropping the receiver stops the walk.
    ///
    /// Fails with [`IconError::NoRuntime`] outside a Tokio runtime.
    pub fn resolve_icon_paths_stream(
        &self,
        icon_name: &str,
        size: u32,
        contexts: impl Into<ContextSet>,
    ) -> IconResult<mpsc::Receiver<PathBuf>> {
        self.platform.ensure_supported()?;
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| IconError::NoRuntime(e.to_string()))?;

        let (tx, rx) = mpsc::channel(16);
        let resolver = self.clone();
        let icon_name = icon_name.to_string();
        let contexts = contexts.into();

        runtime.spawn(async move {
            if size == 0 {
                return;
            }
            let Ok(theme) = resolver.active_theme_async().await else {
                return;
            };

            let mut state = resolver.chain_state(&theme);
            while let Some(name) = state.next_name() {
                let Some(descriptor) = resolver.locator.locate_async(&name).await else {
                    continue;
                };
                state.push_parents(&descriptor);
                let candidates = matcher::candidates(&descriptor, &icon_name, size, &contexts);
                for path in matcher::all_existing_async(&candidates).await {
                    if tx.send(path).await.is_err() {
                        return;
                    }
                }
            }

            if resolver.standalone {
                let candidates =
                    matcher::standalone_candidates(resolver.locator.roots(), &icon_name);
                for path in matcher::all_existing_async(&candidates).await {
                    if tx.send(path).await.is_err() {
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }

    fn walker(&self, theme: &str) -> InheritanceWalker<'_> {
        InheritanceWalker::new(&self.locator, theme, Some(self.fallback_theme.as_str()))
    }

    fn chain_state(&self, theme: &str) -> ChainState {
        ChainState::new(theme, Some(self.fallback_theme.as_str()))
    }
}
