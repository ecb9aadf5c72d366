use std::sync::Arc;

use crate::core::config::{AppPaths, ConfigService, Settings};
use crate::knowledge::{seed_if_empty, KnowledgeStore, SqliteKnowledgeStore};
use crate::llm::{GeminiClient, TextGenerator};
use crate::pipeline::SupportPipeline;

pub mod error;

use error::InitializationError;

/// Application state shared across all routes.
///
/// The knowledge store is read-only once serving starts, so no locking is
/// needed around it.
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub knowledge: Arc<dyn KnowledgeStore>,
    pub pipeline: Arc<SupportPipeline>,
}

impl AppState {
    /// Initializes the application state.
    ///
    /// 1. Loading and validating configuration
    /// 2. Opening the SQLite knowledge store, seeding it when empty
    /// 3. Building the Gemini client and the answering pipeline
    pub async fn initialize(paths: Arc<AppPaths>) -> Result<Arc<Self>, InitializationError> {
        let config_service = ConfigService::new(paths.clone());
        let config = config_service
            .load_config()
            .map_err(|e| InitializationError::Config(e.into()))?;
        tracing::debug!(
            "Effective config: {}",
            config_service.redact_sensitive_values(&config)
        );
        let settings = Settings::from_config(&config, &paths).with_env_overrides();

        let store = SqliteKnowledgeStore::with_path(settings.knowledge.db_path.clone())
            .await
            .map_err(|e| InitializationError::KnowledgeStore(e.into()))?;
        tracing::info!("Connected to SQLite database at {}", store.db_path().display());

        if settings.knowledge.seed_sample_data {
            seed_if_empty(&store)
                .await
                .map_err(|e| InitializationError::Seed(e.into()))?;
        }

        if settings.generation.api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set; chat requests will fail until it is configured");
        }
        let generator = Arc::new(GeminiClient::from_settings(&settings.generation));
        tracing::info!("Using Gemini model {}", generator.model());

        Ok(Self::from_parts(settings, Arc::new(store), generator))
    }

    /// Assembles state from already constructed collaborators.
    pub fn from_parts(
        settings: Settings,
        knowledge: Arc<dyn KnowledgeStore>,
        generator: Arc<dyn TextGenerator>,
    ) -> Arc<Self> {
        let pipeline = Arc::new(
            SupportPipeline::new(knowledge.clone(), generator)
                .with_max_query_chars(settings.max_query_chars),
        );

        Arc::new(AppState {
            settings,
            knowledge,
            pipeline,
        })
    }
}
