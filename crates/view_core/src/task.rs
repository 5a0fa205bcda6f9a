use tokio::task::JoinHandle;

/// A spawned timer or listener that is aborted when the guard is dropped.
///
/// Every delay, interval and event subscription owned by a view machine lives
/// in one of these, so tearing down the machine clears them exactly once.
#[derive(Debug)]
pub struct ScopedTask {
    name: &'static str,
    handle: JoinHandle<()>,
}

impl ScopedTask {
    pub fn spawn<F>(name: &'static str, future: F) -> Self
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        Self {
            name,
            handle: tokio::spawn(future),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScopedTask {
    fn drop(&mut self) {
        if !self.handle.is_finished() {
            tracing::debug!(task = self.name, "tearing down pending view task");
            self.handle.abort();
        }
    }
}
