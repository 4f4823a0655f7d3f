use std::future::Future;
use std::time::Duration;

use crate::core::error::{AppError, Result};

/// Upper bound for a single storage call.
const CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can happen before the statement reached the server, so the
/// operation is safe to re-issue.
fn is_transient(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed
    )
}

/// Run a read-only storage operation with a timeout and one retry on
/// transient failure.
pub async fn read<T, F, Fut>(action: &'static str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(CALL_TIMEOUT, op()).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) if is_transient(&err) => {
            tracing::warn!(action, error = %err, "transient storage error, retrying once");
            match tokio::time::timeout(CALL_TIMEOUT, op()).await {
                Ok(result) => result.map_err(AppError::db(action)),
                Err(_) => Err(AppError::internal(format!("{} timed out", action))),
            }
        }
        Ok(Err(err)) => Err(AppError::db(action)(err)),
        Err(_) => Err(AppError::internal(format!("{} timed out", action))),
    }
}

/// Run a write with a timeout only. Writes are not retried: a transient
/// error may still have reached the server, and document creation must not
/// be applied twice.
pub async fn write<T, Fut>(action: &'static str, fut: Fut) -> Result<T>
where
    Fut: Future<Output = std::result::Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(CALL_TIMEOUT, fut).await {
        Ok(result) => result.map_err(AppError::db(action)),
        Err(_) => Err(AppError::internal(format!("{} timed out", action))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_read_retries_transient_once() {
        let calls = AtomicU32::new(0);
        let result: Result<u32> = read("list probes", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    Err(sqlx::Error::PoolTimedOut)
                } else {
                    Ok(7)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_read_does_not_retry_permanent_errors() {
        let calls = AtomicU32::new(0);
        let result: Result<u32> = read("list probes", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(sqlx::Error::RowNotFound) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_write_maps_to_persistence_error() {
        let result: Result<()> = write("create probe", async { Err(sqlx::Error::PoolClosed) }).await;
        assert_eq!(result.unwrap_err().to_string(), "Failed to create probe");
    }
}
