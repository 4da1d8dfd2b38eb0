use std::path::PathBuf;

use serde::Deserialize;

use crate::result::Result;

const PREFIX: &str = "PHOTOROLL_";

#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub db_uri: String,
    pub db_database: String,
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
    /// Upper bound for a single uploaded file, in bytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
}

fn default_port() -> u16 {
    8080
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("public/images")
}

fn default_max_upload_size() -> usize {
    10 * 1024 * 1024
}

impl Config {
    pub fn from_env() -> Result<Config> {
        Ok(envy::prefixed(PREFIX).from_env::<Config>()?)
    }

    pub fn from_vars<I>(vars: I) -> Result<Config>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(PREFIX).from_iter::<_, Config>(vars)?)
    }

    pub fn bind_name(&self) -> String {
        format!("{host}:{port}", host = self.host, port = self.port)
    }
}
