//! Application state wiring all components together.
//!
//! The controller is generic over repository/delegate/matcher traits,
//! but AppState pins it to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use healthbuddy_core::chat::controller::ChatController;
use healthbuddy_core::reply::matcher::LocalReplyMatcher;
use healthbuddy_core::reply::resolver::ReplyResolver;
use healthbuddy_infra::config::{data_dir, load_app_config};
use healthbuddy_infra::remote::HttpReplyDelegate;
use healthbuddy_infra::sqlite::chat::SqliteChatRepository;
use healthbuddy_infra::sqlite::pool::DatabasePool;
use healthbuddy_infra::translations::load_catalog_or_builtin;
use healthbuddy_types::config::AppConfig;

/// Controller generics pinned to the concrete infra implementations.
pub type ConcreteChatController =
    ChatController<SqliteChatRepository, HttpReplyDelegate, LocalReplyMatcher>;

/// Shared application state used by the REST API handlers.
#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<ConcreteChatController>,
    pub config: Arc<AppConfig>,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to the
    /// database, load the translation catalog, wire the controller.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_app_config(&data_dir).await;

        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("healthbuddy.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        let catalog = load_catalog_or_builtin(&data_dir.join(&config.translations_file)).await;

        let remote_timeout = Duration::from_millis(config.remote.timeout_ms);
        let delegate = HttpReplyDelegate::new(config.remote.url.as_str(), remote_timeout);
        let resolver = ReplyResolver::new(delegate, LocalReplyMatcher::new())
            .with_remote_timeout(remote_timeout);

        let repo = SqliteChatRepository::new(db_pool.clone());
        let controller = ChatController::new(repo, resolver, Arc::new(catalog));

        Ok(Self {
            controller: Arc::new(controller),
            config: Arc::new(config),
            data_dir,
            db_pool,
        })
    }
}
