//! Facade crate for the arena core.
//! Re-exports domain/kernel primitives and wires the bootstrap configuration
//! into a shared [`ArenaState`].
//! Keep this crate thin: it composes other crates, it does not implement ranking logic.
//!
//! ## Usage
//! ```rust
//! use arena::domain::config::AppConfig;
//!
//! let state = arena::bootstrap(AppConfig::default()).unwrap();
//! assert_eq!(state.redirect_target("/arena", false), None);
//! ```

mod error;

pub use crate::error::{BootstrapError, BootstrapErrorExt};
pub use arena_domain as domain;
pub use arena_kernel as kernel;
pub use arena_ranking as ranking;

use arena_domain::config::{AppConfig, ColorMode};
use arena_domain::modules::{ModuleId, ModuleSet};
use arena_kernel::config::{ConfigError, load_app_config};
use arena_ranking::{DEFAULT_INITIAL_RATING, DEFAULT_K_FACTOR, RankingService};
use std::ops::Deref;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug)]
pub struct ArenaStateInner {
    config: AppConfig,
    modules: ModuleSet,
    ranking: RankingService,
}

/// Everything built at startup, shared by handle.
#[derive(Debug, Clone)]
pub struct ArenaState {
    inner: Arc<ArenaStateInner>,
}

impl Deref for ArenaState {
    type Target = ArenaStateInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl ArenaState {
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn ranking(&self) -> &RankingService {
        &self.inner.ranking
    }

    /// Modules that were initialized.
    #[must_use]
    pub fn modules(&self) -> ModuleSet {
        self.inner.modules
    }

    #[must_use]
    pub fn is_module_enabled(&self, module: ModuleId) -> bool {
        self.inner.modules.has(module)
    }

    /// Stylesheet entries, in load order.
    #[must_use]
    pub fn stylesheets(&self) -> &[String] {
        &self.inner.config.css
    }

    /// Where an unauthenticated visit to `path` must be sent, if anywhere.
    /// Always `None` unless the supabase module is active.
    #[must_use]
    pub fn redirect_target(&self, path: &str, authenticated: bool) -> Option<&str> {
        if !self.is_module_enabled(ModuleId::Supabase) {
            return None;
        }
        self.inner.config.supabase.redirect_target(path, authenticated)
    }

    /// Root element class for the given detected system mode.
    ///
    /// Without the color-mode module the page keeps the fallback mode's bare name.
    #[must_use]
    pub fn theme_class(&self, detected: Option<ColorMode>) -> String {
        let color = &self.inner.config.color_mode;
        if self.is_module_enabled(ModuleId::ColorMode) {
            color.class_name(color.resolve(detected))
        } else {
            color.fallback.as_str().to_owned()
        }
    }
}

/// Validates `config`, initializes its modules in declared order and builds
/// the ranking slice.
///
/// # Errors
/// Returns [`BootstrapError::Config`] if the configuration breaks a validation
/// rule and [`BootstrapError::Ranking`] if the ranking slice fails to start.
pub fn bootstrap(config: AppConfig) -> Result<ArenaState, BootstrapError> {
    config.validate().map_err(ConfigError::from).context("Validating bootstrap config")?;

    let mut modules = ModuleSet::empty();
    for (position, module) in config.modules.iter().enumerate() {
        modules |= module.flag();
        info!(position = position + 1, module = %module, "Module initialized");
    }

    debug!(
        css = config.css.len(),
        devtools = config.devtools.enabled,
        compatibility_date = %config.compatibility_date,
        "Bootstrap configuration applied"
    );

    let ranking = arena_ranking::init(DEFAULT_K_FACTOR, DEFAULT_INITIAL_RATING)
        .context("Starting ranking slice")?;

    Ok(ArenaState { inner: Arc::new(ArenaStateInner { config, modules, ranking }) })
}

/// Loads the configuration file (plus `ARENA__` overrides) and bootstraps from it.
///
/// # Errors
/// See [`load_app_config`] and [`bootstrap`].
pub fn bootstrap_from(path: Option<impl AsRef<Path>>) -> Result<ArenaState, BootstrapError> {
    let config = load_app_config(path)?;
    bootstrap(config)
}
