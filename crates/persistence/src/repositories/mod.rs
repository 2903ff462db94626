//! PostgreSQL implementations of the domain repository traits.

pub mod connection;
pub mod field_mapping;
pub mod sync_log;
pub mod webhook;

pub use connection::PgConnectionRepository;
pub use field_mapping::PgMappingRepository;
pub use sync_log::PgSyncLogRepository;
pub use webhook::PgWebhookRepository;

use sqlx::PgPool;

use domain::repositories::Repositories;
use domain::RepositoryResult;

use crate::metrics::{record_pool_metrics, QueryTimer};

/// All repositories over one shared pool.
#[derive(Clone)]
pub struct PgRepositories {
    pool: PgPool,
}

impl PgRepositories {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl Repositories for PgRepositories {
    type Connections = PgConnectionRepository;
    type Mappings = PgMappingRepository;
    type Webhooks = PgWebhookRepository;
    type SyncLogs = PgSyncLogRepository;

    fn connections(&self) -> Self::Connections {
        PgConnectionRepository::new(self.pool.clone())
    }

    fn mappings(&self) -> Self::Mappings {
        PgMappingRepository::new(self.pool.clone())
    }

    fn webhooks(&self) -> Self::Webhooks {
        PgWebhookRepository::new(self.pool.clone())
    }

    fn sync_logs(&self) -> Self::SyncLogs {
        PgSyncLogRepository::new(self.pool.clone())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        record_pool_metrics(&self.pool);
        let timer = QueryTimer::new("ping");
        let result = sqlx::query("SELECT 1").execute(&self.pool).await;
        timer.finish(&result);
        result?;
        Ok(())
    }
}
