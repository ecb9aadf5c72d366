use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};

use super::paths::AppPaths;
use super::validation::validate_config;
use crate::core::errors::ApiError;

const REDACTED: &str = "****";

/// Dotted paths whose values are credentials. They belong in `secrets.yaml`.
const SECRET_PATHS: [&str; 1] = ["generation.api_key"];

/// Layered configuration: `config.yml` with `secrets.yaml` merged over it.
#[derive(Clone)]
pub struct ConfigService {
    paths: Arc<AppPaths>,
}

impl ConfigService {
    pub fn new(paths: Arc<AppPaths>) -> Self {
        Self { paths }
    }

    /// `FAQBOT_CONFIG_PATH`, else a `config.yml` in the data dir, else the
    /// one next to the project.
    pub fn config_path(&self) -> PathBuf {
        if let Ok(path) = env::var("FAQBOT_CONFIG_PATH") {
            return PathBuf::from(path);
        }

        let in_data_dir = self.paths.user_data_dir.join("config.yml");
        if in_data_dir.exists() {
            in_data_dir
        } else {
            self.paths.project_root.join("config.yml")
        }
    }

    pub fn secrets_path(&self) -> PathBuf {
        self.paths.secrets_path.clone()
    }

    pub fn load_config(&self) -> Result<Value, ApiError> {
        let public = read_layer(&self.config_path());
        for secret in SECRET_PATHS {
            if lookup(&public, secret).is_some_and(|v| !v.is_null()) {
                tracing::warn!("{} is set in config.yml; prefer secrets.yaml", secret);
            }
        }

        let merged = deep_merge(&public, &read_layer(&self.secrets_path()));
        validate_config(&merged)?;
        Ok(merged)
    }

    /// Copy of `config` safe to log.
    pub fn redact_sensitive_values(&self, config: &Value) -> Value {
        redact_sensitive_values(config)
    }
}

/// Reads one YAML layer. Missing, unreadable or non-mapping files count as
/// an empty layer.
fn read_layer(path: &Path) -> Value {
    let empty = Value::Object(Map::new());
    let Ok(contents) = fs::read_to_string(path) else {
        return empty;
    };

    match serde_yaml::from_str::<Value>(&contents) {
        Ok(layer @ Value::Object(_)) => layer,
        Ok(_) => empty,
        Err(err) => {
            tracing::warn!("Ignoring unparsable config file {}: {}", path.display(), err);
            empty
        }
    }
}

/// Mappings merge key by key; any other value in `overlay` replaces `base`.
fn deep_merge(base: &Value, overlay: &Value) -> Value {
    let (Value::Object(base_map), Value::Object(overlay_map)) = (base, overlay) else {
        return overlay.clone();
    };

    let mut merged = base_map.clone();
    for (key, value) in overlay_map {
        let next = match merged.get(key) {
            Some(existing) => deep_merge(existing, value),
            None => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    Value::Object(merged)
}

fn lookup<'a>(config: &'a Value, dotted: &str) -> Option<&'a Value> {
    dotted
        .split('.')
        .try_fold(config, |node, segment| node.get(segment))
}

fn redact_sensitive_values(config: &Value) -> Value {
    let mut redacted = config.clone();
    for secret in SECRET_PATHS {
        let mut segments = secret.split('.').collect::<Vec<_>>();
        let Some(leaf) = segments.pop() else {
            continue;
        };
        let parent = segments
            .into_iter()
            .try_fold(&mut redacted, |node, segment| node.get_mut(segment));
        if let Some(Value::Object(map)) = parent {
            if let Some(value) = map.get_mut(leaf).filter(|v| !v.is_null()) {
                *value = Value::String(REDACTED.to_string());
            }
        }
    }
    redacted
}
