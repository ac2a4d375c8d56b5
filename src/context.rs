use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Usage category a theme directory is declared for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Context {
    Actions,
    Animations,
    Applications,
    Categories,
    Devices,
    Emblems,
    Emotes,
    International,
    Mimetypes,
    Panel,
    Places,
    Status,
}

impl Context {
    pub const ALL: [Context; 12] = [
        Context::Actions,
        Context::Animations,
        Context::Applications,
        Context::Categories,
        Context::Devices,
        Context::Emblems,
        Context::Emotes,
        Context::International,
        Context::Mimetypes,
        Context::Panel,
        Context::Places,
        Context::Status,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Context::Actions => "actions",
            Context::Animations => "animations",
            Context::Applications => "applications",
            Context::Categories => "categories",
            Context::Devices => "devices",
            Context::Emblems => "emblems",
            Context::Emotes => "emotes",
            Context::International => "international",
            Context::Mimetypes => "mimetypes",
            Context::Panel => "panel",
            Context::Places => "places",
            Context::Status => "status",
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownContext(pub String);

impl fmt::Display for UnknownContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown icon context '{}'", self.0)
    }
}

impl std::error::Error for UnknownContext {}

impl FromStr for Context {
    type Err = UnknownContext;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Context::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or(UnknownContext(s.to_string()))
    }
}

/// Non-empty set of acceptable contexts for one request.
///
/// Insertion order is kept for display only; matching is by membership.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextSet {
    contexts: Vec<Context>,
}

impl ContextSet {
    /// Builds a set from any number of contexts, or `None` if there are none.
    pub fn new(contexts: impl IntoIterator<Item = Context>) -> Option<Self> {
        let mut set = Vec::new();
        for context in contexts {
            if !set.contains(&context) {
                set.push(context);
            }
        }
        if set.is_empty() {
            None
        } else {
            Some(Self { contexts: set })
        }
    }

    pub fn contains(&self, context: Context) -> bool {
        self.contexts.contains(&context)
    }

    pub fn iter(&self) -> impl Iterator<Item = Context> + '_ {
        self.contexts.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

impl From<Context> for ContextSet {
    fn from(context: Context) -> Self {
        Self {
            contexts: vec![context],
        }
    }
}

impl fmt::Display for ContextSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.contexts.iter().map(Context::as_str).collect();
        f.write_str(&names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Status".parse::<Context>(), Ok(Context::Status));
        assert_eq!(" MIMETYPES ".parse::<Context>(), Ok(Context::Mimetypes));
        assert!("stock".parse::<Context>().is_err());
    }

    #[test]
    fn empty_set_is_rejected() {
        assert!(ContextSet::new(Vec::new()).is_none());
    }

    #[test]
    fn set_deduplicates() {
        let set = ContextSet::new([Context::Status, Context::Panel, Context::Status]).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.to_string(), "status,panel");
    }
}
