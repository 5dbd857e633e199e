//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by the HTTP handlers.
//! Services are generic over the `Storage` trait, but AppState pins them to
//! the SQLite implementation; the LLM provider is injected behind
//! `BoxCompletionProvider` so tests can substitute a stub.

use std::path::PathBuf;
use std::sync::Arc;

use codementor_core::llm::BoxCompletionProvider;
use codementor_core::query::ChatQueryService;
use codementor_core::session::SessionManager;
use codementor_core::signup::SignupService;
use codementor_infra::llm::{AzureOpenAiConfig, AzureOpenAiProvider};
use codementor_infra::sqlite::pool::DatabasePool;
use codementor_infra::sqlite::storage::SqliteStorage;

/// Concrete type aliases for the service generics pinned to the SQLite
/// implementation.
pub type ConcreteSignupService = SignupService<SqliteStorage>;
pub type ConcreteSessionManager = SessionManager<SqliteStorage>;
pub type ConcreteChatQueryService = ChatQueryService<SqliteStorage>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub signup_service: Arc<ConcreteSignupService>,
    pub session_manager: Arc<ConcreteSessionManager>,
    pub chat_query_service: Arc<ConcreteChatQueryService>,
    pub reviewer: Arc<BoxCompletionProvider>,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: connect to the DB, load the LLM
    /// configuration from the environment, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("codementor.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        let config = AzureOpenAiConfig::from_env()?;
        let reviewer = BoxCompletionProvider::new(AzureOpenAiProvider::new(config));

        Ok(Self::build(db_pool, reviewer))
    }

    /// Wire services over an existing pool and provider. Split out of
    /// `init` so tests can pass a temporary database and a stub provider.
    pub fn build(db_pool: DatabasePool, reviewer: BoxCompletionProvider) -> Self {
        let storage = SqliteStorage::new(db_pool.clone());

        Self {
            signup_service: Arc::new(SignupService::new(storage.clone())),
            session_manager: Arc::new(SessionManager::new(storage.clone())),
            chat_query_service: Arc::new(ChatQueryService::new(storage)),
            reviewer: Arc::new(reviewer),
            db_pool,
        }
    }
}

/// Data directory from `CODEMENTOR_DATA_DIR`, falling back to
/// `~/.codementor`.
fn resolve_data_dir() -> PathBuf {
    match std::env::var("CODEMENTOR_DATA_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".codementor")
        }
    }
}
