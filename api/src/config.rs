use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, Result};
use yaml_rust::YamlLoader;

pub use crate::utils::yaml::Yaml;
use crate::utils::yaml::{get_boolean_without_default, get_integer};

#[derive(Clone, Debug, Default)]
pub struct Config {
    /// Configure file dist location
    pub fpath: String,
    pub doc: Yaml,
}

impl Config {
    /// Load configuration from a yaml file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut s = String::new();
        File::open(path)
            .map_err(|e| anyhow!("Failed to open {}: {}", path.display(), e))?
            .read_to_string(&mut s)?;

        let mut config = Self::from_str(&s)?;
        config.fpath = path.display().to_string();
        Ok(config)
    }

    /// Load configuration from a yaml document
    pub fn from_str(s: &str) -> Result<Self> {
        let mut docs = YamlLoader::load_from_str(s)?;
        let doc = if docs.is_empty() {
            yaml_rust::Yaml::Null
        } else {
            docs.swap_remove(0)
        };

        Ok(Self {
            fpath: String::new(),
            doc: Yaml(doc),
        })
    }

    pub fn get_integer(&self, key: &str, default: i64, min: i64, max: i64) -> i64 {
        get_integer(self.doc.as_ref(), key, default, min, max)
    }

    /// Get a boolean option, error if it is missing
    pub fn get_boolean_without_default(&self, key: &str) -> Result<bool> {
        get_boolean_without_default(self.doc.as_ref(), key)
    }
}
