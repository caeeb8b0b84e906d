use arena::domain::config::{AppConfig, AppConfigInner, ColorMode, ColorPreference};
use arena::domain::models::GenerationKind;
use arena::domain::modules::{ModuleId, ModuleSet};
use arena::ranking::RankingError;
use arena::{BootstrapError, bootstrap, bootstrap_from};
use std::fs;
use tempfile::tempdir;

fn config_with(edit: impl FnOnce(&mut AppConfigInner)) -> AppConfig {
    let mut inner = (*AppConfig::default()).clone();
    edit(&mut inner);
    inner.into()
}

#[test]
fn default_config_activates_every_module() {
    let state = bootstrap(AppConfig::default()).unwrap();

    assert_eq!(state.modules(), ModuleSet::ALL);
    assert_eq!(state.stylesheets(), ["~/assets/css/main.css"]);
    assert!(state.ranking().is_empty());
}

#[test]
fn duplicate_modules_fail_bootstrap() {
    let config = config_with(|c| c.modules = vec![ModuleId::Icon, ModuleId::Icon]);

    let err = bootstrap(config).unwrap_err();
    assert!(matches!(err, BootstrapError::Config { .. }));
}

#[test]
fn redirect_guard_needs_the_supabase_module() {
    let enabled = config_with(|c| c.supabase.redirect = true);
    let state = bootstrap(enabled).unwrap();
    assert_eq!(state.redirect_target("/arena", false), Some("/login"));
    assert_eq!(state.redirect_target("/arena", true), None);
    assert_eq!(state.redirect_target("/confirm", false), None);

    let without_module = config_with(|c| {
        c.supabase.redirect = true;
        c.modules.retain(|m| *m != ModuleId::Supabase);
    });
    let state = bootstrap(without_module).unwrap();
    assert_eq!(state.redirect_target("/arena", false), None);
}

#[test]
fn theme_class_follows_color_mode_module() {
    let state = bootstrap(config_with(|c| c.color_mode.class_suffix = "-mode".into())).unwrap();
    assert_eq!(state.theme_class(None), "dark-mode");
    assert_eq!(state.theme_class(Some(ColorMode::Light)), "dark-mode");

    let system = config_with(|c| c.color_mode.preference = ColorPreference::System);
    assert_eq!(bootstrap(system).unwrap().theme_class(Some(ColorMode::Light)), "light");

    let bare = config_with(|c| {
        c.color_mode.class_suffix = "-mode".into();
        c.modules = vec![ModuleId::Tailwindcss];
    });
    let state = bootstrap(bare).unwrap();
    assert!(!state.is_module_enabled(ModuleId::ColorMode));
    assert_eq!(state.theme_class(Some(ColorMode::Light)), "dark");
}

#[test]
fn state_handles_share_the_ranking_pool() {
    let state = bootstrap(AppConfig::default()).unwrap();
    let handle = state.clone();

    let a = handle.ranking().submit(GenerationKind::Text, "first").unwrap();
    let b = handle.ranking().submit(GenerationKind::Text, "second").unwrap();
    handle.ranking().record_vote(a.id(), b.id()).unwrap();

    assert_eq!(state.ranking().votes().len(), 1);
    let err = state.ranking().record_vote(a.id(), a.id()).unwrap_err();
    assert!(matches!(err, RankingError::Model { .. }));
}

#[test]
fn bootstrap_from_reads_a_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("arena.toml");
    fs::write(
        &path,
        r#"
compatibilityDate = "2025-07-15"
modules = ["@nuxtjs/color-mode"]

[colorMode]
classSuffix = ""
preference = "light"
fallback = "dark"
"#,
    )
    .unwrap();

    let state = bootstrap_from(Some(&path)).unwrap();
    assert_eq!(state.modules(), ModuleSet::COLOR_MODE);
    assert_eq!(state.theme_class(None), "light");
    let missing = bootstrap_from(Some(dir.path().join("missing.toml")));
    assert!(matches!(missing, Err(BootstrapError::Config { .. })));
}
