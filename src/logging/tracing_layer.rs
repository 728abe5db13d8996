//! Bridge from `tracing` events into a [`LogRouter`]
//!
//! Lets code instrumented with `tracing::info!` and friends share the router's
//! console and file routing. DEBUG events are treated as trace.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

use super::level::Severity;
use super::record::CallSite;
use super::router::LogRouter;

/// `tracing_subscriber` layer writing every event through a shared router
#[derive(Debug, Clone)]
pub struct RouterLayer {
    router: Arc<LogRouter>,
}

impl RouterLayer {
    /// Forward events to `router`
    pub fn new(router: Arc<LogRouter>) -> Self {
        Self { router }
    }
}

impl<S> Layer<S> for RouterLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let severity = Severity::from(*metadata.level());
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let site = match (metadata.file(), metadata.line()) {
            (Some(file), Some(line)) => Some(CallSite::new(file, line)),
            _ => None,
        };
        self.router
            .write_at(severity, site, format_args!("{}", visitor.finish()));
    }
}

/// Collects the `message` field plus trailing `key=value` pairs
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", name, value);
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.push_field(field.name(), format_args!("{}", value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }
}
