//! Layered configuration for the Meetbook services.
//!
//! Values come from `config/default.*`, then `config/{RUN_ENV}.*`, then environment variables
//! prefixed with `MEETBOOK` (`MEETBOOK__GATEWAY__BASE_URL=...`). Every field has a default, so an
//! empty configuration directory yields a working setup.

use config::{Config, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

pub mod models;
pub use config::ConfigError;
pub use models::*;

/// Prefix of the environment variables that override file values.
pub const ENV_PREFIX: &str = "MEETBOOK";

/// Separator between prefix and path segments in override variables.
pub const ENV_SEPARATOR: &str = "__";

/// Loads the configuration for the current process.
///
/// The configuration directory is `MEETBOOK_CONFIG_DIR` or `./config`; the environment name is
/// `RUN_ENV` (default `debug`).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("MEETBOOK_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config"));

    load_config_from(&config_dir, &run_env)
}

/// Loads configuration from an explicit directory and environment name.
pub fn load_config_from(config_dir: &Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);

    debug!(
        "Loading config: default_path={}, env_path={}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .list_separator(",")
                .with_list_parse_key("api.valid_tokens")
                .try_parsing(true),
        );

    let app_config: AppConfig = builder.build()?.try_deserialize()?;
    Ok(app_config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `DOTENV_OVERRIDE` when set, otherwise the first command line argument if it
/// starts with `.env`, otherwise `.env`. Loading happens at most once per process; a missing file
/// is not an error.
///
/// Returns the path that was (or would have been) loaded.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
