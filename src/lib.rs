//! Resolve freedesktop icon theme names to files on disk and to displayable
//! image bytes.
//!
//! ```no_run
//! use linux_icons::{Config, Context, ContextSet, IconResolver};
//!
//! let resolver = IconResolver::new(&Config::default());
//! let contexts = ContextSet::new([Context::Status, Context::Panel]).unwrap();
//! if let Some(path) = resolver.resolve_icon_path("google-chrome-tray", 22, contexts)? {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), linux_icons::IconError>(())
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod locator;
pub mod matcher;
pub mod materialize;
pub mod platform;
pub mod resolver;
pub mod theme;
pub mod walker;

pub use config::Config;
pub use context::{Context, ContextSet};
pub use error::{IconError, IconResult};
pub use locator::{SearchRoots, ThemeLocator};
pub use platform::Platform;
pub use resolver::{IconResolver, ThemeSource};
pub use theme::{ThemeDescriptor, ThemeDirectoryEntry};
