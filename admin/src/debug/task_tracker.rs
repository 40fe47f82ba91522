//! Async task lifecycle tracking for debugging hung loads

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use tokio::task::JoinHandle;

/// Tasks spawned through [`spawn_tracked`] that have not finished yet
static ACTIVE_TASKS: AtomicU64 = AtomicU64::new(0);
static TASK_IDS: AtomicU64 = AtomicU64::new(0);

/// Get current number of active tracked tasks
pub fn active_task_count() -> u64 {
    ACTIVE_TASKS.load(Ordering::Relaxed)
}

/// Spawn an instrumented async task with lifecycle tracking
///
/// # Arguments
///
/// * `name` - Task name for logging (e.g., "load:stores", "context:binding")
/// * `future` - The async task to execute
///
/// # Example
///
/// ```rust,ignore
/// spawn_tracked("load:stores", async move {
///     pending.run().await
/// });
/// ```
pub fn spawn_tracked<F>(name: &'static str, future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let task_id = TASK_IDS.fetch_add(1, Ordering::Relaxed);
    ACTIVE_TASKS.fetch_add(1, Ordering::Relaxed);
    let start = Instant::now();

    tracing::debug!(task = %name, task_id, "Task spawned");

    tokio::spawn(async move {
        let _active = ActiveTask;
        let result = future.await;
        let duration = start.elapsed();

        tracing::debug!(
            task = %name,
            task_id,
            duration_ms = duration.as_millis(),
            "Task completed"
        );

        if duration.as_secs() > 30 {
            tracing::warn!(
                task = %name,
                task_id,
                duration_ms = duration.as_millis(),
                "Task took very long (potential hang)"
            );
        }

        result
    })
}

/// Decrements the active count even when the task is aborted
struct ActiveTask;

impl Drop for ActiveTask {
    fn drop(&mut self) {
        ACTIVE_TASKS.fetch_sub(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_task_output() {
        let handle = spawn_tracked("test:echo", async { 42 });
        assert_eq!(handle.await.unwrap(), 42);
    }
}
