//! Structured logging initialization
//!
//! Init hooks capture stdout for their own use, so logs go to stderr.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Guard that keeps the tracing subscriber active.
/// Drop this at the end of main to flush logs.
pub struct LogGuard {
    component: &'static str,
}

impl LogGuard {
    /// Name of the component the subscriber was installed for.
    pub fn component(&self) -> &'static str {
        self.component
    }
}

/// Initialize structured logging for a component.
///
/// `RUST_LOG` is respected; the default level is INFO. Calling this twice is
/// harmless, the second subscriber is simply not installed.
///
/// # Example
/// ```ignore
/// let _guard = init_logging("unifi-mongo-init");
/// info!("Starting up...");
/// ```
pub fn init_logging(component: &'static str) -> LogGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let format = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .try_init();

    tracing::debug!(component, "Logging initialized");

    LogGuard { component }
}
