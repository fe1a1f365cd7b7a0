//! Line format and subscriber assembly.
//!
//! Every event is rendered as a single line:
//!
//! ```text
//! [2024-05-01 09:30:12] INFO     describe: add(a=1, b=2)
//! ```
//!
//! The level is left-justified to eight characters. The `logger` field that
//! [`Logger`](super::Logger) attaches to its events is not printed; any other
//! structured fields are appended as `name=value`.

use crate::observability::level::level_name;
use chrono::Local;
use std::fmt;
use std::io;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Timestamp layout used at the start of every line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Field name carrying the logger handle's name.
pub(crate) const LOGGER_FIELD: &str = "logger";

/// `[timestamp] LEVEL    message` event formatter.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        write!(
            writer,
            "[{}] {:<8} {}",
            Local::now().format(TIMESTAMP_FORMAT),
            level_name(event.metadata().level()),
            visitor.message
        )?;
        for field in &visitor.fields {
            write!(writer, " {}", field)?;
        }
        writeln!(writer)
    }
}

#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: Vec<String>,
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            LOGGER_FIELD => {}
            name => self.fields.push(format!("{}={}", name, value)),
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        match field.name() {
            "message" => self.message = format!("{:?}", value),
            LOGGER_FIELD => {}
            name => self.fields.push(format!("{}={:?}", name, value)),
        }
    }
}

/// Build a `fmt` subscriber that renders with [`LineFormat`].
///
/// Used for the process-wide install and for scoped capture in tests.
pub fn build_subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .event_format(LineFormat)
        .finish()
}

/// In-memory sink that collects formatted lines.
///
/// Clones share the same buffer, so one clone can be handed to a subscriber
/// while another is used to read what was written.
///
/// # Example
///
/// ```
/// use call_log::observability::{build_subscriber, MemoryWriter};
/// use tracing_subscriber::EnvFilter;
///
/// let writer = MemoryWriter::new();
/// let subscriber = build_subscriber(EnvFilter::new("info"), writer.clone());
/// tracing::subscriber::with_default(subscriber, || tracing::info!("captured"));
/// assert!(writer.lines()[0].ends_with("INFO     captured"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemoryWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Written output split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Discard captured output.
    pub fn clear(&self) {
        self.buffer.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}

impl io::Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for MemoryWriter {
    type Writer = MemoryWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
