//! Observability hooks.
//!
//! The dispatcher reports every call to an optional [`Metrics`] sink and,
//! in debug mode, to an optional [`Logger`]. Both are plain capabilities:
//! they return nothing, so an implementation cannot change the outcome of
//! the call it observes.

use std::fmt;

/// Structured key/value pairs attached to a log message.
pub type LogFields<'a> = &'a [(&'a str, String)];

/// Leveled, structured logging sink.
pub trait Logger: Send + Sync {
    fn debug(&self, msg: &str, fields: LogFields<'_>);
    fn info(&self, msg: &str, fields: LogFields<'_>);
    fn warn(&self, msg: &str, fields: LogFields<'_>);
    fn error(&self, msg: &str, fields: LogFields<'_>);
}

/// Request duration sink.
pub trait Metrics: Send + Sync {
    /// Record one finished call.
    ///
    /// `status` is 0 when no HTTP response was received. `call_site` names
    /// the façade operation (or caller label) that issued the request.
    fn record_request_duration(
        &self,
        status: u16,
        method: &str,
        host: &str,
        call_site: &str,
        seconds: f64,
    );
}

/// [`Logger`] that forwards to `tracing` under the `evateam_client` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

struct Joined<'a>(LogFields<'a>);

impl fmt::Display for Joined<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        Ok(())
    }
}

impl Logger for TracingLogger {
    fn debug(&self, msg: &str, fields: LogFields<'_>) {
        tracing::debug!(target: "evateam_client", fields = %Joined(fields), "{}", msg);
    }

    fn info(&self, msg: &str, fields: LogFields<'_>) {
        tracing::info!(target: "evateam_client", fields = %Joined(fields), "{}", msg);
    }

    fn warn(&self, msg: &str, fields: LogFields<'_>) {
        tracing::warn!(target: "evateam_client", fields = %Joined(fields), "{}", msg);
    }

    fn error(&self, msg: &str, fields: LogFields<'_>) {
        tracing::error!(target: "evateam_client", fields = %Joined(fields), "{}", msg);
    }
}
