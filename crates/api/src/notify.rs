use async_trait::async_trait;

/// Non-blocking user feedback surface for long-running actions.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Report coarse progress, `percent` in 0..=100.
    async fn progress(&self, percent: u8, message: &str);

    /// Surface a failure to the user without blocking the session.
    async fn error(&self, message: &str);
}

/// Notifier that drops everything; for headless callers and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn progress(&self, _percent: u8, _message: &str) {}

    async fn error(&self, _message: &str) {}
}
