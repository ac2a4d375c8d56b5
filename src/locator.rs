use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::theme::ThemeDescriptor;

/// Ordered list of directories that may contain themes.
///
/// Earlier roots win: when two roots hold a theme with the same name, the one
/// listed first is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRoots {
    roots: Vec<PathBuf>,
}

impl SearchRoots {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// System-wide icon and pixmap directories first, then the per-user
    /// equivalents under the home directory.
    pub fn standard() -> Self {
        Self::with_home(dirs::home_dir().as_deref())
    }

    pub fn with_home(home: Option<&Path>) -> Self {
        let mut roots: Vec<PathBuf> = [
            "/usr/share/icons",
            "/usr/local/share/icons",
            "/usr/share/pixmaps",
            "/usr/local/share/pixmaps",
        ]
        .iter()
        .map(PathBuf::from)
        .collect();

        if let Some(home) = home {
            for rel in [".icons", ".local/share/icons", ".local/share/pixmaps", ".pixmaps"] {
                roots.push(home.join(rel));
            }
        }

        Self { roots }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.roots.iter().map(PathBuf::as_path)
    }
}

/// Process-lifetime memo of located themes.
///
/// Only successful lookups are stored, and each entry expires after the
/// configured time to live.
#[derive(Debug, Default)]
pub struct ThemeCache {
    ttl: Duration,
    entries: RwLock<HashMap<String, (Instant, Arc<ThemeDescriptor>)>>,
}

impl ThemeCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<ThemeDescriptor>> {
        if self.ttl.is_zero() {
            return None;
        }
        let entries = self.entries.read();
        let (stored_at, descriptor) = entries.get(name)?;
        if stored_at.elapsed() < self.ttl {
            Some(Arc::clone(descriptor))
        } else {
            None
        }
    }

    pub fn insert(&self, name: &str, descriptor: Arc<ThemeDescriptor>) {
        if self.ttl.is_zero() {
            return;
        }
        let mut entries = self.entries.write();
        entries.retain(|_, (stored_at, _)| stored_at.elapsed() < self.ttl);
        entries.insert(name.to_string(), (Instant::now(), descriptor));
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Finds a theme by name among the search roots.
#[derive(Debug, Clone)]
pub struct ThemeLocator {
    roots: SearchRoots,
    cache: Arc<ThemeCache>,
}

impl ThemeLocator {
    pub fn new(roots: SearchRoots, cache_ttl: Duration) -> Self {
        Self {
            roots,
            cache: Arc::new(ThemeCache::new(cache_ttl)),
        }
    }

    pub fn roots(&self) -> &SearchRoots {
        &self.roots
    }

    pub fn cache(&self) -> &ThemeCache {
        &self.cache
    }

    /// The first root holding `name` as a directory with a readable index wins.
    /// Malformed or unreadable indexes are logged and the next root is tried.
    pub fn locate(&self, name: &str) -> Option<Arc<ThemeDescriptor>> {
        if let Some(hit) = self.cache.get(name) {
            return Some(hit);
        }

        for root in self.roots.iter() {
            let theme_path = root.join(name);
            if !theme_path.is_dir() {
                continue;
            }
            match ThemeDescriptor::load(&theme_path) {
                Ok(Some(descriptor)) => return Some(self.remember(name, descriptor)),
                Ok(None) => {}
                Err(e) => warn!(theme = name, error = %e, "Skipping unusable theme"),
            }
        }

        debug!(theme = name, "Theme not found in any search root");
        None
    }

    pub async fn locate_async(&self, name: &str) -> Option<Arc<ThemeDescriptor>> {
        if let Some(hit) = self.cache.get(name) {
            return Some(hit);
        }

        for root in self.roots.iter() {
            let theme_path = root.join(name);
            let is_dir = tokio::fs::metadata(&theme_path)
                .await
                .map(|m| m.is_dir())
                .unwrap_or(false);
            if !is_dir {
                continue;
            }
            match ThemeDescriptor::load_async(&theme_path).await {
                Ok(Some(descriptor)) => return Some(self.remember(name, descriptor)),
                Ok(None) => {}
                Err(e) => warn!(theme = name, error = %e, "Skipping unusable theme"),
            }
        }

        debug!(theme = name, "Theme not found in any search root");
        None
    }

    fn remember(&self, name: &str, descriptor: ThemeDescriptor) -> Arc<ThemeDescriptor> {
        debug!(theme = name, root = %descriptor.root_path().display(), "Located theme");
        let descriptor = Arc::new(descriptor);
        self.cache.insert(name, Arc::clone(&descriptor));
        descriptor
    }
}
