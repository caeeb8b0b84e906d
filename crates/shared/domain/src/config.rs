use crate::ModelError;
use crate::constants::{DARK, DEFAULT_CALLBACK_PATH, DEFAULT_LOGIN_PATH, DEFAULT_STYLESHEET, LIGHT, SYSTEM};
use crate::modules::{ModuleId, ModuleSet};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

const DEFAULT_COMPATIBILITY_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2025, 7, 15) {
    Some(date) => date,
    None => panic!("invalid default compatibility date"),
};

/// Process-wide bootstrap configuration, read once at startup.
///
/// Keys are camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct AppConfigInner {
    /// Pins framework default behaviors to a dated baseline.
    pub compatibility_date: NaiveDate,
    pub devtools: DevtoolsConfig,
    /// Active framework extensions, initialized in the listed order.
    pub modules: Vec<ModuleId>,
    /// Stylesheets injected globally, in order.
    pub css: Vec<String>,
    pub color_mode: ColorModeConfig,
    pub supabase: SupabaseConfig,
}

/// Immutable, Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppConfig {
    inner: Arc<AppConfigInner>,
}

impl Deref for AppConfig {
    type Target = AppConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<AppConfigInner> for AppConfig {
    fn from(inner: AppConfigInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl AppConfig {
    /// Order-independent set of the active modules.
    #[must_use]
    pub fn module_set(&self) -> ModuleSet {
        self.modules.iter().collect()
    }

    #[must_use]
    pub fn is_module_enabled(&self, module: ModuleId) -> bool {
        self.modules.contains(&module)
    }

    /// Checks the cross-field rules that serde alone cannot express.
    ///
    /// # Errors
    /// Returns [`ModelError::InvalidConfig`] for a duplicated module, a blank
    /// stylesheet path, or a redirect path that is not absolute.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut seen = ModuleSet::empty();
        for module in &self.modules {
            if seen.has(*module) {
                return Err(invalid(format!("module `{module}` is listed more than once")));
            }
            seen |= module.flag();
        }

        if let Some(position) = self.css.iter().position(|path| path.trim().is_empty()) {
            return Err(invalid(format!("css entry #{position} is empty")));
        }

        self.supabase.redirect_options.validate()
    }
}

fn invalid(message: String) -> ModelError {
    ModelError::InvalidConfig { message: message.into(), context: None }
}

/// In-process development inspector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DevtoolsConfig {
    pub enabled: bool,
}

/// A concrete color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    Dark,
}

impl ColorMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => LIGHT,
            Self::Dark => DARK,
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The mode shown before the user's own preference is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorPreference {
    /// Follow the mode detected from the client, if any.
    System,
    Light,
    Dark,
}

impl ColorPreference {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => SYSTEM,
            Self::Light => LIGHT,
            Self::Dark => DARK,
        }
    }

    #[must_use]
    pub const fn mode(self) -> Option<ColorMode> {
        match self {
            Self::System => None,
            Self::Light => Some(ColorMode::Light),
            Self::Dark => Some(ColorMode::Dark),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ColorModeConfig {
    /// Appended to the mode name to form the CSS class. Empty by default, so
    /// the class is just `dark`; a suffix of `-mode` would give `dark-mode`.
    pub class_suffix: String,
    pub preference: ColorPreference,
    /// Used when the preference is `system` and nothing was detected.
    pub fallback: ColorMode,
}

impl ColorModeConfig {
    /// Picks the mode to render: a concrete preference wins, then the detected
    /// mode, then the fallback.
    #[must_use]
    pub fn resolve(&self, detected: Option<ColorMode>) -> ColorMode {
        self.preference.mode().or(detected).unwrap_or(self.fallback)
    }

    #[must_use]
    pub fn class_name(&self, mode: ColorMode) -> String {
        format!("{mode}{}", self.class_suffix)
    }
}

/// Backend-service integration settings.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SupabaseConfig {
    /// Redirect unauthenticated visitors to the login page automatically.
    /// When disabled, application code must invoke the integration itself.
    pub redirect: bool,
    pub redirect_options: RedirectOptions,
}

impl SupabaseConfig {
    /// Where an unauthenticated visitor of `path` must be sent, if anywhere.
    #[must_use]
    pub fn redirect_target(&self, path: &str, authenticated: bool) -> Option<&str> {
        if !self.redirect || authenticated || self.redirect_options.is_exempt(path) {
            return None;
        }
        Some(&self.redirect_options.login)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RedirectOptions {
    pub login: String,
    pub callback: String,
    /// Paths that never redirect. A trailing `*` matches any suffix.
    pub exclude: Vec<String>,
}

impl RedirectOptions {
    #[must_use]
    pub fn is_exempt(&self, path: &str) -> bool {
        path == self.login
            || path == self.callback
            || self.exclude.iter().any(|pattern| {
                pattern.strip_suffix('*').map_or(pattern == path, |prefix| path.starts_with(prefix))
            })
    }

    fn validate(&self) -> Result<(), ModelError> {
        for (name, path) in [("login", &self.login), ("callback", &self.callback)] {
            if !path.starts_with('/') {
                return Err(invalid(format!("redirect {name} path `{path}` must start with `/`")));
            }
        }

        if self.exclude.iter().any(|pattern| pattern.trim().is_empty()) {
            return Err(invalid("redirect exclude patterns cannot be empty".to_owned()));
        }

        Ok(())
    }
}

// --- Default ---

impl Default for AppConfigInner {
    fn default() -> Self {
        Self {
            compatibility_date: DEFAULT_COMPATIBILITY_DATE,
            devtools: DevtoolsConfig::default(),
            modules: ModuleId::ALL.to_vec(),
            css: vec![DEFAULT_STYLESHEET.to_owned()],
            color_mode: ColorModeConfig::default(),
            supabase: SupabaseConfig::default(),
        }
    }
}

impl Default for DevtoolsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for ColorModeConfig {
    fn default() -> Self {
        Self {
            class_suffix: String::new(),
            preference: ColorPreference::Dark,
            fallback: ColorMode::Dark,
        }
    }
}

impl Default for RedirectOptions {
    fn default() -> Self {
        Self {
            login: DEFAULT_LOGIN_PATH.to_owned(),
            callback: DEFAULT_CALLBACK_PATH.to_owned(),
            exclude: Vec::new(),
        }
    }
}
