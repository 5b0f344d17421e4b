use std::{env, path::PathBuf, sync::Arc};

use color_eyre::{Result, eyre::Context};
use datepicker_widget::{
    RenderEnv, TranslationRegistry,
    libs::translations::{MessageSource, NAMESPACE},
};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,

    /// Language for tooltips of widgets that don't set their own
    #[serde(default)]
    pub language: Option<String>,

    /// Directory with extra `<locale>.yaml` message catalogs
    #[serde(default)]
    pub messages_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Builds the translation registry, loading `messages_dir` if configured.
    pub fn registry(&self) -> Result<TranslationRegistry> {
        let source = match &self.messages_dir {
            Some(dir) => MessageSource::from_dir(dir)
                .with_context(|| format!("Error loading message catalogs from {}", dir.display()))?,
            None => MessageSource::builtin(),
        };
        let registry = TranslationRegistry::new();
        registry.register(NAMESPACE, source);
        Ok(registry)
    }

    pub fn render_env(&self) -> Result<RenderEnv> {
        Ok(RenderEnv::new(
            Arc::new(self.registry()?),
            self.language.clone(),
        ))
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct WebConfig {
    pub bind: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub config: AppConfig,
    pub web: WebConfig,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
}

impl Config {
    pub fn new(cli_source: Option<crate::cli::ClapSource>) -> Result<Self> {
        let data_dir = get_data_dir();
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_string_lossy().to_string())?
            .set_default("web.bind", "127.0.0.1:8080")?
            .add_source(config::File::from(get_config_dir().join("config")).required(false));

        // Add CLI source last (highest priority)
        if let Some(cli_source) = cli_source {
            builder = builder.add_source(cli_source);
        }

        let cfg: Self = builder
            .build()
            .context("Error building config")?
            .try_deserialize()
            .context("Error deserialize config")?;

        Ok(cfg)
    }
}

fn dir_from_env(suffix: &str) -> Option<PathBuf> {
    env::var(format!("{}_{}", PROJECT_NAME.clone(), suffix))
        .ok()
        .map(PathBuf::from)
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = dir_from_env("DATA") {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = dir_from_env("CONFIG") {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "yyang", env!("CARGO_PKG_NAME"))
}
