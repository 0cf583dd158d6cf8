use std::path::{Path, PathBuf};

use yaml_rust::{Yaml, YamlLoader};

use super::config_utils;
use super::error::{OdError, Result};
use super::gravity::DEFAULT_BETA;


/// Where an estimation run reads its inputs and writes its output, and how it weighs cost.
#[derive(PartialEq, Debug, Clone)]
pub struct ModelConfig {
    pub network_path: PathBuf,
    pub counts_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub beta: f64,
}

impl ModelConfig {
    pub fn from_file(config_path: &Path) -> Result<ModelConfig> {
        let file_contents = std::fs::read_to_string(config_path)?;
        let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
        ModelConfig::from_yaml_str(&file_contents, base_dir)
    }

    /// Parses a yaml config.  Relative paths in it are taken relative to `base_dir`.
    pub fn from_yaml_str(contents: &str, base_dir: &Path) -> Result<ModelConfig> {
        let docs = YamlLoader::load_from_str(contents)?;
        let yaml_cfg = docs.get(0)
                           .ok_or_else(|| OdError::Config(String::from("config is empty")))?;
        ModelConfig::from_yaml(yaml_cfg, base_dir)
    }

    fn from_yaml(yaml_cfg: &Yaml, base_dir: &Path) -> Result<ModelConfig> {
        let path_value = |key: &str| -> Result<Option<PathBuf>> {
            let value = &yaml_cfg[key];
            if value.is_badvalue() || value.is_null() {
                return Ok(None);
            }
            match value.as_str() {
                Some(path) => Ok(Some(config_utils::str_to_absolute_path(path, base_dir))),
                None => Err(OdError::Config(format!("{} must be a path", key))),
            }
        };
        let required = |key: &str| -> Result<PathBuf> {
            path_value(key)?.ok_or_else(|| OdError::Config(format!("no {} given", key)))
        };

        let beta = match &yaml_cfg["beta"] {
            Yaml::BadValue | Yaml::Null => DEFAULT_BETA,
            Yaml::Real(_) => yaml_cfg["beta"].as_f64().unwrap_or(DEFAULT_BETA),
            Yaml::Integer(ii) => *ii as f64,
            _ => return Err(OdError::Config(String::from("beta must be a number"))),
        };

        Ok(ModelConfig {
            network_path: required("network_path")?,
            counts_path: required("counts_path")?,
            output_path: path_value("output_path")?,
            beta,
        })
    }
}
