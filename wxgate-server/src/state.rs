use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use wxgate_core::{IconTable, UpstreamClient, UserDirectory};

use crate::cache::ResponseCache;
use crate::config::Config;

/// Process-wide state shared by every request handler. Everything except
/// the cache is read-only after startup.
pub struct AppState {
    pub config: Config,
    pub users: UserDirectory,
    pub icons: IconTable,
    pub upstream: UpstreamClient,
    pub cache: Arc<ResponseCache>,
}

impl AppState {
    pub fn initialize(config: Config) -> Result<Arc<Self>> {
        let users =
            UserDirectory::load(&config.users_file).context("Failed to load user allow-list")?;
        let icons = IconTable::load(&config.icon_classes_file)
            .context("Failed to load icon classification table")?;

        let upstream = UpstreamClient::new(Duration::from_secs(config.request_timeout_secs))?;
        let cache = Arc::new(ResponseCache::new(Duration::from_secs(config.cache_ttl_secs)));

        Ok(Arc::new(Self {
            config,
            users,
            icons,
            upstream,
            cache,
        }))
    }
}
