//! Parsing of a theme's `index.theme` into a directory catalog.
//!
//! The index is an INI file. The `[Icon Theme]` section carries metadata and
//! the `Inherits` list; every other section describes one subdirectory.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ini::{Ini, ParseError, ParseOption};
use tracing::warn;

use crate::context::{Context, ContextSet};
use crate::error::{IconError, IconResult};

pub const INDEX_FILE_NAME: &str = "index.theme";
pub const METADATA_SECTION: &str = "Icon Theme";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeDirectoryEntry {
    pub relative_path: String,
    /// `None` when the section names a context outside the fixed set; such an
    /// entry never matches.
    pub context: Option<Context>,
    pub min_size: Option<u32>,
    pub max_size: Option<u32>,
    pub exact_size: Option<u32>,
}

impl ThemeDirectoryEntry {
    /// A size matches if it lies in `[min, max]` or equals the exact size.
    ///
    /// A missing bound leaves that side of the range open, but the range only
    /// takes part when at least one bound is declared. An entry declaring no
    /// size at all accepts every size.
    pub fn matches_size(&self, size: u32) -> bool {
        if self.min_size.is_none() && self.max_size.is_none() && self.exact_size.is_none() {
            return true;
        }

        let in_range = (self.min_size.is_some() || self.max_size.is_some())
            && self.min_size.is_none_or(|min| min <= size)
            && self.max_size.is_none_or(|max| size <= max);

        in_range || self.exact_size == Some(size)
    }

    pub fn matches_context(&self, contexts: &ContextSet) -> bool {
        self.context.is_some_and(|c| contexts.contains(c))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeDescriptor {
    root_path: PathBuf,
    pub name: Option<String>,
    pub comment: Option<String>,
    pub directories: Vec<ThemeDirectoryEntry>,
    pub inherits_from: Vec<String>,
}

impl ThemeDescriptor {
    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Reads `<root>/index.theme`.
    ///
    /// Returns `Ok(None)` when the index does not exist, which is the normal
    /// answer for a directory that is not a theme.
    pub fn load(root: &Path) -> IconResult<Option<Self>> {
        let index_path = root.join(INDEX_FILE_NAME);
        let content = match std::fs::read_to_string(&index_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(read_error(&index_path, e)),
        };
        Self::parse(root, &content).map(Some)
    }

    pub async fn load_async(root: &Path) -> IconResult<Option<Self>> {
        let index_path = root.join(INDEX_FILE_NAME);
        let content = match tokio::fs::read_to_string(&index_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(read_error(&index_path, e)),
        };
        Self::parse(root, &content).map(Some)
    }

    pub fn parse(root: &Path, content: &str) -> IconResult<Self> {
        let index_path = root.join(INDEX_FILE_NAME);
        let ini = parse_ini(content).map_err(|e| IconError::MalformedIndex {
            path: index_path.clone(),
            message: e.to_string(),
        })?;

        let mut descriptor = ThemeDescriptor {
            root_path: root.to_path_buf(),
            name: None,
            comment: None,
            directories: Vec::new(),
            inherits_from: Vec::new(),
        };

        for (section, props) in ini.iter() {
            let Some(section) = section else {
                continue;
            };

            if section == METADATA_SECTION {
                descriptor.name = props.get("Name").map(str::to_string);
                descriptor.comment = props.get("Comment").map(str::to_string);
                descriptor.inherits_from = props
                    .get("Inherits")
                    .map(split_list)
                    .unwrap_or_default();
                continue;
            }

            if descriptor
                .directories
                .iter()
                .any(|d| d.relative_path == section)
            {
                continue;
            }

            let size_key = |key: &str| -> IconResult<Option<u32>> {
                props
                    .get(key)
                    .map(|v| {
                        v.trim().parse::<u32>().map_err(|_| IconError::MalformedIndex {
                            path: index_path.clone(),
                            message: format!("[{section}] {key} is not a size: '{v}'"),
                        })
                    })
                    .transpose()
            };

            let entry = ThemeDirectoryEntry {
                relative_path: section.to_string(),
                context: props.get("Context").and_then(|c| c.parse().ok()),
                min_size: size_key("MinSize")?,
                max_size: size_key("MaxSize")?,
                exact_size: size_key("Size")?,
            };

            if let (Some(min), Some(max)) = (entry.min_size, entry.max_size) {
                if min > max {
                    warn!(
                        index = %index_path.display(),
                        directory = section,
                        min,
                        max,
                        "Skipping theme directory with MinSize above MaxSize"
                    );
                    continue;
                }
            }

            descriptor.directories.push(entry);
        }

        Ok(descriptor)
    }
}

fn read_error(index_path: &Path, e: std::io::Error) -> IconError {
    if e.kind() == ErrorKind::InvalidData {
        IconError::MalformedIndex {
            path: index_path.to_path_buf(),
            message: "index is not valid UTF-8".to_string(),
        }
    } else {
        IconError::Io(e)
    }
}

/// Reads desktop-style INI text. Backslashes are literal and a leading
/// byte-order mark is dropped.
pub(crate) fn parse_ini(content: &str) -> Result<Ini, ParseError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    Ini::load_from_str_opt(
        content,
        ParseOption {
            enabled_escape: false,
            ..ParseOption::default()
        },
    )
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(min: Option<u32>, max: Option<u32>, exact: Option<u32>) -> ThemeDirectoryEntry {
        ThemeDirectoryEntry {
            relative_path: "x".into(),
            context: Some(Context::Status),
            min_size: min,
            max_size: max,
            exact_size: exact,
        }
    }

    #[test]
    fn range_bucket() {
        let e = entry(Some(16), Some(24), None);
        for s in [16, 20, 24] {
            assert!(e.matches_size(s), "{s} should match");
        }
        assert!(!e.matches_size(15));
        assert!(!e.matches_size(25));
    }

    #[test]
    fn exact_only_bucket() {
        let e = entry(None, None, Some(22));
        assert!(e.matches_size(22));
        assert!(!e.matches_size(21));
        assert!(!e.matches_size(23));
        assert!(!e.matches_size(48));
    }

    #[test]
    fn range_or_exact() {
        let e = entry(Some(16), Some(24), Some(48));
        assert!(e.matches_size(20));
        assert!(e.matches_size(48));
        assert!(!e.matches_size(32));
    }

    #[test]
    fn open_upper_bound() {
        let e = entry(Some(32), None, Some(32));
        assert!(e.matches_size(512));
        assert!(!e.matches_size(16));
    }

    #[test]
    fn no_size_keys_accepts_everything() {
        let e = entry(None, None, None);
        assert!(e.matches_size(1));
        assert!(e.matches_size(256));
    }

    #[test]
    fn splits_inherits() {
        assert_eq!(split_list(" a, b ,,c"), vec!["a", "b", "c"]);
        assert!(split_list("").is_empty());
    }
}
