//! Platform gate and the active theme-name query.

use std::path::{Path, PathBuf};

use crate::error::{IconError, IconResult};
use crate::theme::parse_ini;

/// Operating system the resolver runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    os: String,
}

impl Platform {
    pub fn current() -> Self {
        Self::named(std::env::consts::OS)
    }

    pub fn named(os: &str) -> Self {
        Self { os: os.to_string() }
    }

    /// Freedesktop icon themes exist on Linux and the BSDs.
    pub fn is_supported(&self) -> bool {
        matches!(
            self.os.as_str(),
            "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly"
        )
    }

    pub fn ensure_supported(&self) -> IconResult<()> {
        if self.is_supported() {
            Ok(())
        } else {
            Err(IconError::UnsupportedPlatform(self.os.clone()))
        }
    }
}

/// How the active icon theme of a desktop is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeQuery {
    Command {
        program: &'static str,
        args: Vec<&'static str>,
    },
    /// KDE keeps it in the `[Icons]` section of `kdeglobals`.
    KdeGlobals(PathBuf),
}

impl ThemeQuery {
    /// Picks the query for an `XDG_CURRENT_DESKTOP` value. Unknown desktops
    /// use the GNOME settings key.
    pub fn for_desktop(desktop: Option<&str>) -> Self {
        let desktop = desktop.unwrap_or_default().to_ascii_lowercase();
        let names: Vec<&str> = desktop.split(':').collect();
        let has = |name: &str| names.iter().any(|n| *n == name);

        if has("kde") {
            let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from(".config"));
            ThemeQuery::KdeGlobals(config.join("kdeglobals"))
        } else if has("xfce") {
            ThemeQuery::Command {
                program: "xfconf-query",
                args: vec!["-c", "xsettings", "-p", "/Net/IconThemeName"],
            }
        } else if has("x-cinnamon") || has("cinnamon") {
            gsettings("org.cinnamon.desktop.interface")
        } else if has("mate") {
            gsettings("org.mate.interface")
        } else {
            gsettings("org.gnome.desktop.interface")
        }
    }

    pub fn from_env() -> Self {
        Self::for_desktop(std::env::var("XDG_CURRENT_DESKTOP").ok().as_deref())
    }

    pub fn run(&self) -> IconResult<String> {
        match self {
            ThemeQuery::Command { program, args } => {
                let output = std::process::Command::new(program)
                    .args(args)
                    .output()
                    .map_err(|e| IconError::ExternalQueryFailed(format!("{program}: {e}")))?;
                command_output(program, output)
            }
            ThemeQuery::KdeGlobals(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    IconError::ExternalQueryFailed(format!("{}: {e}", path.display()))
                })?;
                kde_theme(path, &content)
            }
        }
    }

    pub async fn run_async(&self) -> IconResult<String> {
        match self {
            ThemeQuery::Command { program, args } => {
                let output = tokio::process::Command::new(program)
                    .args(args)
                    .output()
                    .await
                    .map_err(|e| IconError::ExternalQueryFailed(format!("{program}: {e}")))?;
                command_output(program, output)
            }
            ThemeQuery::KdeGlobals(path) => {
                let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                    IconError::ExternalQueryFailed(format!("{}: {e}", path.display()))
                })?;
                kde_theme(path, &content)
            }
        }
    }
}

fn gsettings(schema: &'static str) -> ThemeQuery {
    ThemeQuery::Command {
        program: "gsettings",
        args: vec!["get", schema, "icon-theme"],
    }
}

fn command_output(program: &str, output: std::process::Output) -> IconResult<String> {
    if !output.status.success() {
        return Err(IconError::ExternalQueryFailed(format!(
            "{program} exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }
    clean_theme_name(&String::from_utf8_lossy(&output.stdout))
        .ok_or_else(|| IconError::ExternalQueryFailed(format!("{program} printed no theme name")))
}

fn kde_theme(path: &Path, content: &str) -> IconResult<String> {
    let ini = parse_ini(content)
        .map_err(|e| IconError::ExternalQueryFailed(format!("{}: {e}", path.display())))?;
    ini.get_from(Some("Icons"), "Theme")
        .and_then(clean_theme_name)
        .ok_or_else(|| {
            IconError::ExternalQueryFailed(format!("{} has no [Icons] Theme", path.display()))
        })
}

/// Strips whitespace and the quotes `gsettings` wraps strings in.
pub fn clean_theme_name(raw: &str) -> Option<String> {
    let name: String = raw.trim().chars().filter(|c| *c != '\'' && *c != '"').collect();
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
