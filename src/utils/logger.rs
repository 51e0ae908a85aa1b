use once_cell::sync::OnceCell;
use std::env;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

static LOGGER: OnceCell<()> = OnceCell::new();

/// Sets up the global tracing subscriber.
///
/// The level is read from the `LOGLEVEL` environment variable
/// (`TRACE`, `DEBUG`, `INFO`, `WARN`, `ERROR`) and defaults to `INFO`.
/// Calling this more than once is harmless; only the first call installs
/// a subscriber.
pub fn setup_logger() {
    LOGGER.get_or_init(|| {
        let level = env::var("LOGLEVEL")
            .map(|value| parse_level(&value))
            .unwrap_or(Level::INFO);

        let subscriber = FmtSubscriber::builder().with_max_level(level).finish();

        if tracing::subscriber::set_global_default(subscriber).is_ok() {
            tracing::debug!("Log level set to: {}", level);
        }
    });
}

fn parse_level(value: &str) -> Level {
    match value.trim().to_uppercase().as_str() {
        "TRACE" => Level::TRACE,
        "DEBUG" => Level::DEBUG,
        "WARN" => Level::WARN,
        "ERROR" => Level::ERROR,
        _ => Level::INFO,
    }
}
