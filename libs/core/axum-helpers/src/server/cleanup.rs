//! Resource cleanup run during graceful shutdown.

use std::future::Future;
use std::pin::Pin;
use tracing::{error, info};

type CleanupTask = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Collects named cleanup tasks and runs them together at shutdown.
///
/// Tasks are stored unstarted; nothing runs until [`CleanupCoordinator::run`].
///
/// # Example
/// ```ignore
/// use axum_helpers::server::CleanupCoordinator;
///
/// let mut cleanup = CleanupCoordinator::new();
/// cleanup.add_task("mongodb", async move { client.shutdown().await });
/// cleanup.run().await;
/// ```
pub struct CleanupCoordinator {
    tasks: Vec<(&'static str, CleanupTask)>,
}

impl CleanupCoordinator {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    pub fn add_task<F>(&mut self, name: &'static str, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tasks.push((name, Box::pin(task)));
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run all tasks concurrently and wait for each. A panicking task is
    /// logged and does not stop the others.
    pub async fn run(self) {
        info!(tasks = self.tasks.len(), "Running cleanup tasks");

        let handles: Vec<_> = self
            .tasks
            .into_iter()
            .map(|(name, task)| (name, tokio::spawn(task)))
            .collect();

        for (name, handle) in handles {
            match handle.await {
                Ok(()) => info!(task = name, "Cleanup task completed"),
                Err(e) => error!(task = name, error = %e, "Cleanup task failed"),
            }
        }

        info!("All cleanup tasks completed");
    }
}

impl Default for CleanupCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
