use std::env;
use std::path::PathBuf;

use serde_json::Value;

use super::paths::AppPaths;
use crate::pipeline::DEFAULT_MAX_QUERY_CHARS;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_GENERATION_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GENERATION_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeSettings {
    pub db_path: PathBuf,
    pub seed_sample_data: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

/// Typed view over the merged YAML config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server: ServerSettings,
    pub knowledge: KnowledgeSettings,
    pub max_query_chars: usize,
    pub generation: GenerationSettings,
}

impl Settings {
    /// Reads settings from an already validated config value, filling defaults.
    pub fn from_config(config: &Value, paths: &AppPaths) -> Self {
        let server = config.get("server");
        let knowledge = config.get("knowledge");
        let generation = config.get("generation");

        let db_path = knowledge
            .and_then(|v| v.get("db_path"))
            .and_then(|v| v.as_str())
            .map(|raw| {
                let candidate = PathBuf::from(raw);
                if candidate.is_absolute() {
                    candidate
                } else {
                    paths.user_data_dir.join(candidate)
                }
            })
            .unwrap_or_else(|| paths.db_path.clone());

        Settings {
            server: ServerSettings {
                host: string_field(server, "host").unwrap_or_else(|| DEFAULT_HOST.to_string()),
                port: server
                    .and_then(|v| v.get("port"))
                    .and_then(|v| v.as_u64())
                    .and_then(|v| u16::try_from(v).ok())
                    .unwrap_or(DEFAULT_PORT),
                cors_allowed_origins: server
                    .and_then(|v| v.get("cors_allowed_origins"))
                    .and_then(|v| v.as_array())
                    .map(|list| {
                        list.iter()
                            .filter_map(|item| item.as_str())
                            .map(str::trim)
                            .filter(|item| !item.is_empty())
                            .map(|item| item.to_string())
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            knowledge: KnowledgeSettings {
                db_path,
                seed_sample_data: knowledge
                    .and_then(|v| v.get("seed_sample_data"))
                    .and_then(|v| v.as_bool())
                    .unwrap_or(true),
            },
            max_query_chars: config
                .get("chat")
                .and_then(|v| v.get("max_query_chars"))
                .and_then(|v| v.as_u64())
                .map(|v| v as usize)
                .unwrap_or(DEFAULT_MAX_QUERY_CHARS),
            generation: GenerationSettings {
                base_url: string_field(generation, "base_url")
                    .unwrap_or_else(|| DEFAULT_GENERATION_BASE_URL.to_string()),
                model: string_field(generation, "model")
                    .unwrap_or_else(|| DEFAULT_GENERATION_MODEL.to_string()),
                api_key: string_field(generation, "api_key"),
            },
        }
    }

    /// `PORT` and `GEMINI_API_KEY` take precedence over the config files.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(port) = env::var("PORT").ok().and_then(|val| val.parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Ok(key) = env::var("GEMINI_API_KEY") {
            if !key.trim().is_empty() {
                self.generation.api_key = Some(key);
            }
        }
        self
    }
}

fn string_field(section: Option<&Value>, key: &str) -> Option<String> {
    section
        .and_then(|v| v.get(key))
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}
