use std::path::{Path, PathBuf};

use tracing::trace;

use crate::context::ContextSet;
use crate::locator::SearchRoots;
use crate::theme::ThemeDescriptor;

/// File extensions tried for every matching directory, vector first.
pub const EXTENSIONS: [&str; 3] = ["svg", "png", "xpm"];

/// Candidate files for `icon_name` in one theme, in priority order:
/// directories in declaration order, and within a directory, [`EXTENSIONS`]
/// order.
pub fn candidates(
    theme: &ThemeDescriptor,
    icon_name: &str,
    size: u32,
    contexts: &ContextSet,
) -> Vec<PathBuf> {
    theme
        .directories
        .iter()
        .filter(|dir| dir.matches_context(contexts) && dir.matches_size(size))
        .flat_map(|dir| {
            let dir_path = theme.root_path().join(&dir.relative_path);
            EXTENSIONS
                .iter()
                .map(move |ext| dir_path.join(format!("{icon_name}.{ext}")))
        })
        .collect()
}

/// Unthemed candidates placed directly in a search root, as in
/// `/usr/share/pixmaps/<name>.png`.
pub fn standalone_candidates(roots: &SearchRoots, icon_name: &str) -> Vec<PathBuf> {
    roots
        .iter()
        .flat_map(|root| {
            EXTENSIONS
                .iter()
                .map(move |ext| root.join(format!("{icon_name}.{ext}")))
        })
        .collect()
}

/// First candidate that exists, with symlinks resolved.
pub fn first_existing(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find_map(|path| probe(path))
}

pub async fn first_existing_async(candidates: &[PathBuf]) -> Option<PathBuf> {
    for path in candidates {
        if let Some(found) = probe_async(path).await {
            return Some(found);
        }
    }
    None
}

/// Every candidate that exists, in priority order.
pub async fn all_existing_async(candidates: &[PathBuf]) -> Vec<PathBuf> {
    let mut found = Vec::new();
    for path in candidates {
        if let Some(hit) = probe_async(path).await {
            found.push(hit);
        }
    }
    found
}

fn probe(path: &Path) -> Option<PathBuf> {
    trace!(candidate = %path.display(), "Probing");
    let resolved = std::fs::canonicalize(path).ok()?;
    resolved.is_file().then_some(resolved)
}

async fn probe_async(path: &Path) -> Option<PathBuf> {
    trace!(candidate = %path.display(), "Probing");
    let resolved = tokio::fs::canonicalize(path).await.ok()?;
    let meta = tokio::fs::metadata(&resolved).await.ok()?;
    meta.is_file().then_some(resolved)
}

/// Runs the matcher over one theme.
pub fn find_in_theme(
    theme: &ThemeDescriptor,
    icon_name: &str,
    size: u32,
    contexts: &ContextSet,
) -> Option<PathBuf> {
    first_existing(&candidates(theme, icon_name, size, contexts))
}

pub async fn find_in_theme_async(
    theme: &ThemeDescriptor,
    icon_name: &str,
    size: u32,
    contexts: &ContextSet,
) -> Option<PathBuf> {
    first_existing_async(&candidates(theme, icon_name, size, contexts)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;

    const INDEX: &str = "\
[Icon Theme]
Name=Test

[status/22]
Context=Status
Size=22

[apps/22]
Context=Applications
Size=22

[status/16-24]
Context=Status
MinSize=16
MaxSize=24
";

    #[test]
    fn candidates_follow_declaration_then_extension_order() {
        let theme = ThemeDescriptor::parse(Path::new("/themes/t"), INDEX).unwrap();
        let found = candidates(&theme, "net", 22, &Context::Status.into());
        let expected: Vec<PathBuf> = [
            "/themes/t/status/22/net.svg",
            "/themes/t/status/22/net.png",
            "/themes/t/status/22/net.xpm",
            "/themes/t/status/16-24/net.svg",
            "/themes/t/status/16-24/net.png",
            "/themes/t/status/16-24/net.xpm",
        ]
        .iter()
        .map(PathBuf::from)
        .collect();
        assert_eq!(found, expected);
    }

    #[test]
    fn context_filter_applies() {
        let theme = ThemeDescriptor::parse(Path::new("/themes/t"), INDEX).unwrap();
        let found = candidates(&theme, "net", 22, &Context::Applications.into());
        assert_eq!(found.len(), 3);
        assert!(found[0].starts_with("/themes/t/apps/22"));
        assert!(candidates(&theme, "net", 22, &Context::Places.into()).is_empty());
    }

    #[test]
    fn size_filter_applies() {
        let theme = ThemeDescriptor::parse(Path::new("/themes/t"), INDEX).unwrap();
        let found = candidates(&theme, "net", 18, &Context::Status.into());
        assert_eq!(found.len(), 3);
        assert!(found[0].starts_with("/themes/t/status/16-24"));
    }
}
