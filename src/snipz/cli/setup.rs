use crate::args::Cli;
use directories::ProjectDirs;
use snipz::api::SnipzApi;
use snipz::config::SnipzConfig;
use snipz::error::{Result, SnipzError};
use snipz::store::{FsBackend, SnippetStore};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DATA_DIR_ENV: &str = "SNIPZ_DATA_DIR";

pub struct AppContext {
    pub api: SnipzApi<FsBackend>,
    pub config: SnipzConfig,
    pub data_dir: PathBuf,
}

/// Logs go to stderr so they never mix with command output.
/// `RUST_LOG` wins; otherwise warnings only, or snipz debug output with `--verbose`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "warn,snipz=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback.into());
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

pub fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli)?;
    let config = SnipzConfig::load(&data_dir)?;
    tracing::debug!(data_dir = %data_dir.display(), snippets_file = %config.snippets_file, "opening store");

    let backend = FsBackend::new(data_dir.clone()).with_snippets_file(&config.snippets_file);
    let api = SnipzApi::new(SnippetStore::with_backend(backend));

    Ok(AppContext {
        api,
        config,
        data_dir,
    })
}

fn resolve_data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "snipz", "snipz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| SnipzError::Api("Could not determine a data directory".to_string()))
}
