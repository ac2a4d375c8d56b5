use std::time::Duration;

use linux_icons::config::Config;
use linux_icons::{Context, ContextSet};

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(&dir.path().join("linux-icons.toml")).unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.theme, None);
    assert_eq!(config.fallback_theme, "hicolor");
    assert_eq!(config.size, 22);
    assert_eq!(config.contexts, vec![Context::Status]);
    assert!(!config.standalone);
    assert_eq!(config.cache_ttl(), Duration::from_secs(300));
}

#[test]
fn parse_full_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("linux-icons.toml");
    std::fs::write(
        &path,
        r#"
theme = "Papirus"
fallback_theme = "Adwaita"
size = 48
contexts = ["status", "panel"]
standalone = true
cache_ttl_secs = 0
"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.theme.as_deref(), Some("Papirus"));
    assert_eq!(config.fallback_theme, "Adwaita");
    assert_eq!(config.size, 48);
    assert_eq!(
        config.context_set(),
        ContextSet::new([Context::Status, Context::Panel])
    );
    assert!(config.standalone);
    assert!(config.cache_ttl().is_zero());
}

#[test]
fn partial_config_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("linux-icons.toml");
    std::fs::write(&path, "size = 16\n").unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.size, 16);
    assert_eq!(config.contexts, vec![Context::Status]);
    assert_eq!(config.fallback_theme, "hicolor");
}

#[test]
fn zero_size_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("linux-icons.toml");
    std::fs::write(&path, "size = 0\n").unwrap();

    assert!(Config::load(&path).is_err());
}

#[test]
fn empty_contexts_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("linux-icons.toml");
    std::fs::write(&path, "contexts = []\n").unwrap();

    assert!(Config::load(&path).is_err());
}

#[test]
fn unknown_context_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("linux-icons.toml");
    std::fs::write(&path, "contexts = [\"stock\"]\n").unwrap();

    assert!(Config::load(&path).is_err());
}

#[test]
fn template_parses_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("linux-icons.toml");
    std::fs::write(&path, Config::default_template()).unwrap();

    assert_eq!(Config::load(&path).unwrap(), Config::default());
}

#[test]
fn save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("linux-icons.toml");
    let config = Config {
        theme: Some("breeze".into()),
        contexts: vec![Context::Applications, Context::Mimetypes],
        ..Default::default()
    };

    config.save(&path).unwrap();
    assert_eq!(Config::load(&path).unwrap(), config);
}
