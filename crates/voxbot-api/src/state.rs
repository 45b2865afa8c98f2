//! Application state wiring all services together.
//!
//! Services are generic over repository/generator traits; AppState pins them
//! to the concrete infra implementations.

use std::path::Path;
use std::sync::Arc;

use voxbot_core::chat::service::ChatService;
use voxbot_core::relay::service::RelayService;
use voxbot_infra::llm::gemini::GeminiProvider;
use voxbot_infra::sqlite::chat::SqliteChatRepository;
use voxbot_infra::sqlite::pool::{DatabasePool, default_database_url};
use voxbot_types::config::ServerConfig;

pub type ConcreteChatService = ChatService<SqliteChatRepository>;

pub type ConcreteRelayService = RelayService<GeminiProvider>;

/// Shared state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    pub relay_service: Arc<ConcreteRelayService>,
    pub config: Arc<ServerConfig>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Open the database (creating the data directory if needed) and wire services.
    pub async fn init(data_dir: &Path, config: ServerConfig) -> anyhow::Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;

        let db_url = config
            .database_url
            .clone()
            .unwrap_or_else(|| default_database_url(data_dir));
        let db_pool = DatabasePool::new(&db_url).await?;

        Self::from_pool(db_pool, config)
    }

    /// Wire services over an already-open pool.
    pub fn from_pool(db_pool: DatabasePool, config: ServerConfig) -> anyhow::Result<Self> {
        let generator = GeminiProvider::from_config(&config.relay)?;
        if !generator.has_api_key() {
            tracing::warn!("GEMINI_API_KEY is not set; relay requests will fail");
        }

        let chat_service = ChatService::new(SqliteChatRepository::new(db_pool.clone()));
        let relay_service = RelayService::new(generator, &config.relay);

        Ok(Self {
            chat_service: Arc::new(chat_service),
            relay_service: Arc::new(relay_service),
            config: Arc::new(config),
            db_pool,
        })
    }
}
