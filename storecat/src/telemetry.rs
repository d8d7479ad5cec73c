//! Tracing subscriber setup.

use tracing::debug;
use tracing_subscriber::{EnvFilter, prelude::*};

use crate::settings::{LogFormat, LogSettings};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over [`LogSettings::level`]. Calling this more than
/// once is harmless; later calls leave the first subscriber in place.
pub fn init_tracing(settings: &LogSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let result = match settings.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .with(filter)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_line_number(false),
            )
            .with(filter)
            .try_init(),
    };

    match result {
        Ok(()) => debug!(format = ?settings.format, "tracing initialized"),
        Err(_) => debug!("tracing already initialized"),
    }
}
