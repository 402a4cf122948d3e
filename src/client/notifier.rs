#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
    Warning,
    Info,
}

/// Surfaces a user-visible message, e.g. a toast or a banner.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

impl<T: Notifier + ?Sized> Notifier for std::sync::Arc<T> {
    fn notify(&self, message: &str, severity: Severity) {
        (**self).notify(message, severity)
    }
}

/// Writes notifications to the tracing subscriber; handy for headless front-ends.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Error => tracing::error!(notification = message),
            Severity::Warning => tracing::warn!(notification = message),
            Severity::Success | Severity::Info => {
                tracing::info!(notification = message, ?severity)
            }
        }
    }
}
