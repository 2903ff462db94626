//! Database metrics collection.

use metrics::{counter, gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Record a query's duration and outcome.
pub fn record_query(query_name: &'static str, duration_secs: f64, success: bool) {
    let outcome = if success { "ok" } else { "error" };
    histogram!(
        "db_query_duration_seconds",
        "query" => query_name,
        "outcome" => outcome
    )
    .record(duration_secs);

    if !success {
        counter!("db_query_errors_total", "query" => query_name).increment(1);
    }
}

/// Record connection pool occupancy.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();
    let in_use = size.saturating_sub(idle);

    gauge!("db_pool_connections", "state" => "in_use").set(in_use as f64);
    gauge!("db_pool_connections", "state" => "idle").set(idle as f64);
    gauge!("db_pool_connections", "state" => "total").set(size as f64);
}

/// Times one repository query.
///
/// ```ignore
/// let timer = QueryTimer::new("find_connection_by_id");
/// let result = sqlx::query_as::<_, ConnectionEntity>(...).fetch_optional(&pool).await;
/// timer.finish(&result);
/// ```
pub struct QueryTimer {
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(query_name: &'static str) -> Self {
        Self {
            query_name,
            start: Instant::now(),
        }
    }

    pub fn finish<T, E>(self, result: &Result<T, E>) {
        record_query(
            self.query_name,
            self.start.elapsed().as_secs_f64(),
            result.is_ok(),
        );
    }
}
