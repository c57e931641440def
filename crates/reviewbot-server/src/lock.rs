//! Lock service wrappers.

use std::time::Duration;

use async_trait::async_trait;
use reviewbot_lock_interface::{LockError, LockInstance, LockService, LockStatus};

use crate::metrics::LOCK_CALLS;

/// Lock service with metrics.
pub struct MetricsLockService {
    inner: Box<dyn LockService>,
}

impl MetricsLockService {
    /// Wraps a lock service.
    pub fn new(inner: Box<dyn LockService>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl LockService for MetricsLockService {
    async fn try_lock_resource<'a>(&'a self, name: &str) -> Result<LockStatus<'a>, LockError> {
        LOCK_CALLS.inc();
        // Bind the instance to the wrapper so its release is counted too.
        Ok(match self.inner.try_lock_resource(name).await? {
            LockStatus::SuccessfullyLocked(instance) => {
                LockStatus::SuccessfullyLocked(LockInstance::new(self, instance.name()))
            }
            LockStatus::AlreadyLocked => LockStatus::AlreadyLocked,
        })
    }

    async fn has_resource(&self, name: &str) -> Result<bool, LockError> {
        LOCK_CALLS.inc();
        self.inner.has_resource(name).await
    }

    async fn del_resource(&self, name: &str) -> Result<(), LockError> {
        LOCK_CALLS.inc();
        self.inner.del_resource(name).await
    }

    async fn sleep_for_duration(&self, duration: Duration) -> Result<(), LockError> {
        self.inner.sleep_for_duration(duration).await
    }

    async fn health_check(&self) -> Result<(), LockError> {
        LOCK_CALLS.inc();
        self.inner.health_check().await
    }
}
