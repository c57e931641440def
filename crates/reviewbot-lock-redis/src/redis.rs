use std::time::Duration;

use async_trait::async_trait;
use redis::{Client, Cmd, Value};
use reviewbot_lock_interface::{LockError, LockInstance, LockService, LockStatus};

/// Milliseconds before a lock key expires on its own.
const LOCK_EXPIRATION_MS: u64 = 30_000;

/// Redis lock service.
#[derive(Clone)]
pub struct RedisLockService(Client);

impl RedisLockService {
    /// Creates a new redis adapter.
    pub fn new(addr: &str) -> Result<Self, LockError> {
        Client::open(addr)
            .map(Self)
            .map_err(|e| LockError::ImplementationError { source: e.into() })
    }

    async fn execute_command(&self, cmd: &Cmd) -> Result<Value, LockError> {
        let mut conn = self
            .0
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| LockError::ImplementationError { source: e.into() })?;

        cmd.query_async(&mut conn)
            .await
            .map_err(|e| LockError::ImplementationError { source: e.into() })
    }
}

#[async_trait]
impl LockService for RedisLockService {
    #[tracing::instrument(skip(self), ret)]
    async fn try_lock_resource<'a>(&'a self, name: &str) -> Result<LockStatus<'a>, LockError> {
        let response = self
            .execute_command(
                redis::cmd("SET")
                    .arg(name)
                    .arg(1)
                    .arg("NX")
                    .arg("PX")
                    .arg(LOCK_EXPIRATION_MS),
            )
            .await?;

        match response {
            Value::Okay => Ok(LockStatus::SuccessfullyLocked(LockInstance::new(
                self, name,
            ))),
            Value::Nil => Ok(LockStatus::AlreadyLocked),
            other => Err(LockError::ImplementationError {
                source: format!("Unsupported response: {other:?}").into(),
            }),
        }
    }

    #[tracing::instrument(skip(self), ret)]
    async fn has_resource(&self, name: &str) -> Result<bool, LockError> {
        let response = self.execute_command(redis::cmd("GET").arg(name)).await?;
        Ok(response != Value::Nil)
    }

    #[tracing::instrument(skip(self))]
    async fn del_resource(&self, name: &str) -> Result<(), LockError> {
        self.execute_command(redis::cmd("DEL").arg(name)).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn sleep_for_duration(&self, duration: Duration) -> Result<(), LockError> {
        tokio::time::sleep(duration).await;
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn health_check(&self) -> Result<(), LockError> {
        self.execute_command(&redis::cmd("PING")).await?;
        Ok(())
    }
}
