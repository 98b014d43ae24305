//! Tracing subscriber setup: console formatter and level filter.
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Environment variable holding the level filter (`debug`, `warn`, `provision=trace`, …).
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits provision-style
/// console output.
struct ProvisionFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ProvisionFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let level = *metadata.level();
        let target = metadata.target();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = &extractor.message;

        match level {
            tracing::Level::ERROR => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            tracing::Level::WARN => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            tracing::Level::INFO if target == "provision::stage" => {
                writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m")
            }
            tracing::Level::INFO if target == "provision::dry_run" => {
                writeln!(writer, "  \x1b[33m[DRY RUN]\x1b[0m {msg}")
            }
            tracing::Level::INFO => writeln!(writer, "  {msg}"),
            _ => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Parse a `LOG_LEVEL` value into a filter.
///
/// A bare word must be a level name (`warn`, `debug`, ...); anything with a
/// `=` or `,` is read as a directive list such as `provision=trace`. An empty
/// value means `info`.
///
/// # Errors
///
/// Returns a description of the problem when the value is not a level or
/// directive list.
pub fn parse_filter(value: &str) -> Result<EnvFilter, String> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(EnvFilter::new("info"));
    }
    if !value.contains(['=', ',']) {
        value
            .parse::<LevelFilter>()
            .map_err(|_| format!("unknown level {value:?}"))?;
    }
    EnvFilter::try_new(value).map_err(|e| e.to_string())
}

/// Build the level filter from `LOG_LEVEL`, defaulting to `info`.
///
/// The second value is the rejection reason when `LOG_LEVEL` was set but could
/// not be parsed.
#[must_use]
pub fn env_filter() -> (EnvFilter, Option<String>) {
    match std::env::var(LOG_LEVEL_ENV) {
        Ok(value) => match parse_filter(&value) {
            Ok(filter) => (filter, None),
            Err(reason) => (EnvFilter::new("info"), Some(reason)),
        },
        Err(_) => (EnvFilter::new("info"), None),
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Warnings and errors go to stderr, everything else to stdout.
/// Must be called once at program startup, before any logging. An invalid
/// `LOG_LEVEL` is reported as a warning once the subscriber is installed.
pub fn init_subscriber() {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let (filter, rejected) = env_filter();
    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(ProvisionFormatter)
        .with_writer(make_writer)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();

    if let Some(reason) = rejected {
        tracing::warn!("ignoring {LOG_LEVEL_ENV}: {reason}; using info");
    }
}
