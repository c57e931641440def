use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};
use lazy_static::lazy_static;
use prometheus::IntCounter;

use crate::{Result, ServerError};

lazy_static! {
    pub static ref PULL_REQUESTS_CREATED: IntCounter =
        IntCounter::new("pull_requests_created", "Pull requests created").unwrap();
    pub static ref PULL_REQUESTS_MERGED: IntCounter =
        IntCounter::new("pull_requests_merged", "Pull requests merged").unwrap();
    pub static ref REVIEWERS_REROLLED: IntCounter =
        IntCounter::new("reviewers_rerolled", "Reviewers rerolled").unwrap();
    pub static ref USERS_DEACTIVATED: IntCounter =
        IntCounter::new("users_deactivated", "Users deactivated").unwrap();
    pub static ref LOCK_CALLS: IntCounter = IntCounter::new("lock_calls", "Lock calls").unwrap();
}

pub(crate) fn build_metrics_handler() -> Result<PrometheusMetrics> {
    let prometheus = PrometheusMetricsBuilder::new("api")
        .endpoint("/metrics")
        .build()
        .map_err(|e| ServerError::MetricsError {
            message: e.to_string(),
        })?;

    setup_process_metrics(&prometheus)?;

    for counter in [
        &*PULL_REQUESTS_CREATED,
        &*PULL_REQUESTS_MERGED,
        &*REVIEWERS_REROLLED,
        &*USERS_DEACTIVATED,
        &*LOCK_CALLS,
    ] {
        register(&prometheus, Box::new(counter.clone()))?;
    }

    Ok(prometheus)
}

fn register(
    metrics: &PrometheusMetrics,
    collector: Box<dyn prometheus::core::Collector>,
) -> Result<()> {
    metrics
        .registry
        .register(collector)
        .map_err(|e| ServerError::MetricsError {
            message: e.to_string(),
        })
}

#[cfg(target_os = "linux")]
fn setup_process_metrics(metrics: &PrometheusMetrics) -> Result<()> {
    use prometheus::process_collector::ProcessCollector;

    register(metrics, Box::new(ProcessCollector::for_self()))
}

#[cfg(not(target_os = "linux"))]
fn setup_process_metrics(_metrics: &PrometheusMetrics) -> Result<()> {
    tracing::warn!("Process metrics are only supported on Linux.");
    Ok(())
}
