//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and infolog's section filters.
//!
//! Call sites tag messages with a section by using the section name as the
//! tracing target, either directly (`tracing::info!(target: "Sound", ...)`)
//! or as the last path segment (`target: "engine::sound"`). [`SectionLayer`]
//! looks the target up in the shared [`SectionRegistry`]; events for a
//! registered section pass only at or above that section's minimum level,
//! and events without a section pass at or above a default level. Admitted
//! events are written to a [`LogSink`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::{Arc, Mutex};
//! use logging::{SectionRegistry, init_tracing};
//! use logging_sink::FileSink;
//!
//! let registry = Arc::new(SectionRegistry::with_sections(["Sound"]));
//! let sink = Arc::new(Mutex::new(FileSink::new()));
//! init_tracing(Arc::clone(&registry), sink)?;
//!
//! tracing::info!(target: "Sound", "mixer ready");
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use logging_sink::{LogSink, Record};
use tracing::{Level as TracingLevel, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::levels::Level;
use crate::registry::{Section, SectionRegistry};

/// A tracing layer that filters events by section and writes them to a sink.
pub struct SectionLayer<S> {
    registry: Arc<SectionRegistry>,
    sink: Arc<Mutex<S>>,
    default_level: i32,
}

impl<S> SectionLayer<S> {
    /// Creates a layer; events without a section pass at INFO and above.
    #[must_use]
    pub const fn new(registry: Arc<SectionRegistry>, sink: Arc<Mutex<S>>) -> Self {
        Self {
            registry,
            sink,
            default_level: Level::Info.as_i32(),
        }
    }

    /// Changes the level required for events that carry no section.
    #[must_use]
    pub fn with_default_level(mut self, level: i32) -> Self {
        self.default_level = level;
        self
    }

    fn section_for_target(&self, target: &str) -> Option<&Section> {
        self.registry.get(target).or_else(|| {
            let (_, last) = target.rsplit_once("::")?;
            self.registry.get(last)
        })
    }

    /// Map a tracing level onto the numeric level vocabulary.
    const fn level_from_tracing(level: &TracingLevel) -> i32 {
        match *level {
            TracingLevel::ERROR => Level::Error.as_i32(),
            TracingLevel::WARN => Level::Warning.as_i32(),
            TracingLevel::INFO => Level::Info.as_i32(),
            TracingLevel::DEBUG | TracingLevel::TRACE => Level::Debug.as_i32(),
        }
    }

    fn severity_prefix(level: i32) -> &'static str {
        if level >= Level::Fatal.as_i32() {
            "Fatal: "
        } else if level >= Level::Error.as_i32() {
            "Error: "
        } else if level >= Level::Warning.as_i32() {
            "Warning: "
        } else {
            ""
        }
    }
}

impl<S, Sub> Layer<Sub> for SectionLayer<S>
where
    S: LogSink + Send + 'static,
    Sub: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, Sub>) {
        let metadata = event.metadata();
        let level = Self::level_from_tracing(metadata.level());
        let section = self.section_for_target(metadata.target());

        let admitted = match section {
            Some(section) => section.admits(level),
            None => level >= self.default_level,
        };
        if !admitted {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let Some(message) = visitor.message else {
            return;
        };

        let message = format!("{}{message}", Self::severity_prefix(level));
        let record = Record::new(level, section.map(Section::name), &message);
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(error) = sink.record(&record) {
            eprintln!("failed to write log record: {error}");
        }
    }
}

/// Visitor to extract message from tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Installs a global subscriber routing tracing events through
/// [`SectionLayer`] into `sink`.
pub fn init_tracing<S>(registry: Arc<SectionRegistry>, sink: Arc<Mutex<S>>) -> Result<(), TryInitError>
where
    S: LogSink + Send + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(SectionLayer::new(registry, sink))
        .try_init()
}
