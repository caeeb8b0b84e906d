use arena_domain::ModelError;
use arena_domain::config::AppConfig;
use config::builder::DefaultState;
use config::{Case, Config, ConfigBuilder, Environment, File, Map};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Base name of the bootstrap file when no path is given (`arena.toml`, `arena.json`, ...).
pub const DEFAULT_CONFIG_NAME: &str = "arena";
/// Prefix of environment overrides (`ARENA__SUPABASE__REDIRECT=true`).
pub const ENV_PREFIX: &str = "ARENA";

#[arena_derive::arena_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Config rejected{}: {source}", format_context(.context))]
    Invalid { source: ModelError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader: a base layer overlaid with environment overrides.
///
/// 1. **Base**: the file given to [`ConfigLoader::file`], or `arena` in the
///    working directory. The format is taken from the extension; without one,
///    every supported extension is tried. [`ConfigLoader::load_or`] uses
///    in-memory defaults instead when no file was given.
/// 2. **Environment Overrides**: variables prefixed with `ARENA__`, nesting with
///    `__`. Each segment is converted to camelCase so it lands on the same key
///    the file uses (`ARENA__COLOR_MODE__PREFERENCE=light` sets
///    `colorMode.preference`). Values are parsed leniently, so `true` and `42`
///    keep their types.
///
/// # Example
/// ```rust
/// use arena_kernel::config::ConfigLoader;
///
/// #[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
/// #[serde(default, rename_all = "camelCase")]
/// struct Settings {
///     listen_port: u16,
/// }
///
/// let cfg: Settings = ConfigLoader::new()
///     .env_vars([("ARENA__LISTEN_PORT", "8080")])
///     .load_or(&Settings::default())
///     .unwrap();
/// assert_eq!(cfg.listen_port, 8080);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ConfigLoader {
    path: Option<PathBuf>,
    env: Option<Map<String, String>>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the base layer from `path`. The file must exist.
    #[must_use]
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Takes overrides from `vars` instead of the process environment.
    #[must_use]
    pub fn env_vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env = Some(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    /// Loads the file (or `arena` in the working directory) plus overrides.
    ///
    /// # Errors
    /// Returns [`ConfigError::Config`] if the file is missing or the merged
    /// content does not match `T`.
    pub fn load<T>(self) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        let path = self.path.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_NAME));
        info!("Loading config from {}", path.display());

        let builder = Config::builder().add_source(File::from(path.as_path()).required(true));
        self.finish(builder)
    }

    /// Like [`ConfigLoader::load`], but `defaults` stand in for the file when
    /// none was given.
    ///
    /// # Errors
    /// See [`ConfigLoader::load`].
    pub fn load_or<T>(self, defaults: &T) -> Result<T, ConfigError>
    where
        T: Serialize + DeserializeOwned,
    {
        if self.path.is_some() {
            return self.load();
        }
        info!("Loading config from built-in defaults");

        let base = Config::try_from(defaults).context("Failed to encode defaults")?;
        self.finish(Config::builder().add_source(base))
    }

    fn finish<T>(self, builder: ConfigBuilder<DefaultState>) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        let env = Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .convert_case(Case::Camel)
            .try_parsing(true)
            .source(self.env);

        let config = builder
            .add_source(env)
            .build()
            .context("Failed to build config")?
            .try_deserialize::<T>()
            .context("Failed to deserialize config")?;

        Ok(config)
    }
}

/// Loads `T` from `path` (or `arena` in the working directory) plus the
/// process environment.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or its content does
/// not match `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    with_path(path).load()
}

/// Loads the bootstrap [`AppConfig`] and checks its cross-field rules.
///
/// # Errors
/// Returns [`ConfigError::Config`] for unreadable or malformed sources and
/// [`ConfigError::Invalid`] when the values break an [`AppConfig::validate`] rule.
pub fn load_app_config(path: Option<impl AsRef<Path>>) -> Result<AppConfig, ConfigError> {
    accept(with_path(path).load()?)
}

/// Like [`load_app_config`], but without a path the built-in defaults form
/// the base layer, so environment overrides still apply.
///
/// # Errors
/// See [`load_app_config`].
pub fn load_app_config_or_default(
    path: Option<impl AsRef<Path>>,
) -> Result<AppConfig, ConfigError> {
    accept(with_path(path).load_or(&AppConfig::default())?)
}

fn with_path(path: Option<impl AsRef<Path>>) -> ConfigLoader {
    match path {
        Some(path) => ConfigLoader::new().file(path),
        None => ConfigLoader::new(),
    }
}

fn accept(config: AppConfig) -> Result<AppConfig, ConfigError> {
    config.validate().context("Bootstrap configuration")?;

    debug!(
        modules = config.modules.len(),
        devtools = config.devtools.enabled,
        compatibility_date = %config.compatibility_date,
        "Bootstrap configuration accepted"
    );

    Ok(config)
}
