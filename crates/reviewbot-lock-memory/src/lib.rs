use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use reviewbot_lock_interface::{LockError, LockInstance, LockService, LockStatus};

const LOCK_EXPIRATION_MS: u64 = 30_000;

/// In-process lock service, only valid for a single running instance.
///
/// Held resources expire after a fixed delay, like their Redis counterparts.
pub struct MemoryLockService {
    resources: Mutex<HashMap<String, Instant>>,
    expiration: Duration,
}

impl Default for MemoryLockService {
    fn default() -> Self {
        Self::with_expiration(Duration::from_millis(LOCK_EXPIRATION_MS))
    }
}

impl MemoryLockService {
    /// Creates an in-process lock service.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates an in-process lock service with a custom resource expiration.
    pub fn with_expiration(expiration: Duration) -> Self {
        Self {
            resources: Mutex::new(HashMap::new()),
            expiration,
        }
    }
}

#[async_trait]
impl LockService for MemoryLockService {
    #[tracing::instrument(skip(self), ret)]
    async fn try_lock_resource<'a>(&'a self, name: &str) -> Result<LockStatus<'a>, LockError> {
        let mut resources = self.resources.lock().unwrap();
        let now = Instant::now();
        let free = match resources.get(name) {
            Some(expires_at) => *expires_at <= now,
            None => true,
        };

        if free {
            resources.insert(name.to_owned(), now + self.expiration);
            Ok(LockStatus::SuccessfullyLocked(LockInstance::new(
                self, name,
            )))
        } else {
            Ok(LockStatus::AlreadyLocked)
        }
    }

    #[tracing::instrument(skip(self), ret)]
    async fn has_resource(&self, name: &str) -> Result<bool, LockError> {
        Ok(self
            .resources
            .lock()
            .unwrap()
            .get(name)
            .map(|expires_at| *expires_at > Instant::now())
            .unwrap_or(false))
    }

    #[tracing::instrument(skip(self))]
    async fn del_resource(&self, name: &str) -> Result<(), LockError> {
        self.resources.lock().unwrap().remove(name);
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn sleep_for_duration(&self, duration: Duration) -> Result<(), LockError> {
        tokio::time::sleep(duration).await;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<(), LockError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use reviewbot_lock_interface::{using_lock, UsingLockResult};

    use super::*;

    #[tokio::test]
    async fn lock_and_release() -> Result<(), Box<dyn Error>> {
        let lock_mgr = MemoryLockService::new();
        let key = "this-is-a-test";

        if let LockStatus::SuccessfullyLocked(s) = lock_mgr.try_lock_resource(key).await? {
            assert!(matches!(
                lock_mgr.try_lock_resource(key).await?,
                LockStatus::AlreadyLocked
            ));
            assert!(lock_mgr.has_resource(key).await?);

            s.release().await?;
        }

        assert!(!lock_mgr.has_resource(key).await?);
        let status = lock_mgr.try_lock_resource(key).await?;
        assert!(matches!(status, LockStatus::SuccessfullyLocked(_)));

        Ok(())
    }

    #[tokio::test]
    async fn wait_gives_up_after_timeout() -> Result<(), Box<dyn Error>> {
        let lock_mgr = MemoryLockService::new();
        let key = "this-is-a-test";

        let _held = lock_mgr.try_lock_resource(key).await?;
        let status = lock_mgr.wait_lock_resource(key, 200).await?;
        assert!(matches!(status, LockStatus::AlreadyLocked));

        Ok(())
    }

    #[tokio::test]
    async fn held_resource_expires() -> Result<(), Box<dyn Error>> {
        let lock_mgr = MemoryLockService::with_expiration(Duration::from_millis(100));
        let key = "this-is-a-test";

        let _held = lock_mgr.try_lock_resource(key).await?;
        assert!(matches!(
            lock_mgr.try_lock_resource(key).await?,
            LockStatus::AlreadyLocked
        ));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(!lock_mgr.has_resource(key).await?);
        assert!(matches!(
            lock_mgr.try_lock_resource(key).await?,
            LockStatus::SuccessfullyLocked(_)
        ));

        Ok(())
    }

    #[tokio::test]
    async fn cancelled_block_does_not_keep_lock_forever() -> Result<(), Box<dyn Error>> {
        let lock_mgr = MemoryLockService::with_expiration(Duration::from_millis(200));
        let key = "team-1";

        let cancelled = tokio::time::timeout(
            Duration::from_millis(50),
            using_lock(&lock_mgr, key, 0, || async {
                tokio::time::sleep(Duration::from_secs(10)).await;
                Ok::<_, ()>(())
            }),
        )
        .await;
        assert!(cancelled.is_err());
        assert!(lock_mgr.has_resource(key).await?);

        let output = using_lock(&lock_mgr, key, 1_000, || async { Ok::<_, ()>(1) }).await?;
        assert!(matches!(output, UsingLockResult::Locked(Ok(1))));
        assert!(!lock_mgr.has_resource(key).await?);

        Ok(())
    }
}
