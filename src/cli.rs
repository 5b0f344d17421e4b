use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use config::Source;

use crate::config::{get_config_dir, get_data_dir};

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the data directory
    #[arg(short, long, value_name = "PATH", global = true)]
    pub data_dir: Option<String>,

    /// Language for tooltips of widgets without their own, e.g. `ru` or `de-AT`
    #[arg(short, long, value_name = "LOCALE", global = true)]
    pub language: Option<String>,

    /// Directory with extra `<locale>.yaml` message catalogs
    #[arg(short, long, value_name = "PATH", global = true)]
    pub messages_dir: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render widget definitions (.json, .json5, .yaml) to stdout
    Render {
        /// A single widget or a list of widgets
        file: PathBuf,

        /// Print only the markup
        #[arg(long)]
        no_script: bool,
    },
    /// Serve a demo page and the render API
    Web {
        /// Address to listen on
        #[arg(short, long, value_name = "ADDR")]
        bind: Option<String>,
    },
}

const VERSION_MESSAGE: &str = concat!(env!("CARGO_PKG_VERSION"));

pub fn version() -> String {
    let author = clap::crate_authors!();

    let data_dir_path = get_data_dir().display().to_string();
    let config_dir_path = get_config_dir().display().to_string();

    format!(
        "\
{VERSION_MESSAGE}

Authors: {author}

Config directory: {config_dir_path}
Data directory: {data_dir_path}"
    )
}

#[derive(Debug, Clone)]
pub(crate) struct ClapSource {
    pub data_dir: Option<String>,
    pub language: Option<String>,
    pub messages_dir: Option<String>,
    pub bind: Option<String>,
}

impl ClapSource {
    pub fn new(cli: &Cli) -> Self {
        let bind = match &cli.command {
            Commands::Web { bind } => bind.clone(),
            Commands::Render { .. } => None,
        };
        Self {
            data_dir: cli.data_dir.clone(),
            language: cli.language.clone(),
            messages_dir: cli.messages_dir.clone(),
            bind,
        }
    }
}

impl Source for ClapSource {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<config::Map<String, config::Value>, config::ConfigError> {
        let mut map = config::Map::new();
        for (key, value) in [
            ("data_dir", &self.data_dir),
            ("language", &self.language),
            ("messages_dir", &self.messages_dir),
            ("web.bind", &self.bind),
        ] {
            if let Some(value) = value {
                map.insert(key.to_string(), config::Value::new(None, value.clone()));
            }
        }
        Ok(map)
    }
}
