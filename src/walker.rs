//! Inheritance chain traversal.
//!
//! Themes are visited pre-order depth-first: the theme itself, then each
//! declared parent left to right, each parent's own parents before the next
//! sibling. A name is visited at most once, so cyclic `Inherits` lists end.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::locator::ThemeLocator;
use crate::theme::ThemeDescriptor;

/// Pending names and the names already visited.
#[derive(Debug, Clone)]
pub struct ChainState {
    pending: Vec<String>,
    visited: HashSet<String>,
}

impl ChainState {
    /// `fallback` is consulted last unless the chain already reached it.
    pub fn new(root: &str, fallback: Option<&str>) -> Self {
        let mut pending = Vec::with_capacity(2);
        if let Some(fallback) = fallback {
            pending.push(fallback.to_string());
        }
        pending.push(root.to_string());
        Self {
            pending,
            visited: HashSet::new(),
        }
    }

    /// Next theme name that has not been visited yet.
    pub fn next_name(&mut self) -> Option<String> {
        while let Some(name) = self.pending.pop() {
            if self.visited.insert(name.clone()) {
                return Some(name);
            }
            debug!(theme = %name, "Theme already visited");
        }
        None
    }

    pub fn push_parents(&mut self, descriptor: &ThemeDescriptor) {
        for parent in descriptor.inherits_from.iter().rev() {
            if !self.visited.contains(parent) {
                self.pending.push(parent.clone());
            }
        }
    }
}

/// Lazy sequence of located themes in chain order. Names that do not
/// locate are skipped.
pub struct InheritanceWalker<'a> {
    locator: &'a ThemeLocator,
    state: ChainState,
}

impl<'a> InheritanceWalker<'a> {
    pub fn new(locator: &'a ThemeLocator, root: &str, fallback: Option<&str>) -> Self {
        Self {
            locator,
            state: ChainState::new(root, fallback),
        }
    }
}

impl Iterator for InheritanceWalker<'_> {
    type Item = Arc<ThemeDescriptor>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(name) = self.state.next_name() {
            if let Some(descriptor) = self.locator.locate(&name) {
                self.state.push_parents(&descriptor);
                return Some(descriptor);
            }
        }
        None
    }
}
