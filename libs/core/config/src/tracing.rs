use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Installs the color-eyre report hook. Call first thing in `main`.
/// Shows error locations, hides the environment section.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(environment: &Environment) -> &'static str {
    if environment.is_production() {
        "info,sea_orm=warn,sqlx=warn"
    } else {
        "debug,web_admin=trace,hyper=info,tower_http=debug,sea_orm=info"
    }
}

/// Installs the global subscriber with an `ErrorLayer`, so eyre reports
/// carry span traces.
///
/// Production emits flattened JSON without targets. Development pretty-prints.
/// A second call leaves the first subscriber in place.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(environment)));

    let installed = if environment.is_production() {
        let json = tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .flatten_event(true);
        tracing_subscriber::registry()
            .with(json)
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        let pretty = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .pretty();
        tracing_subscriber::registry()
            .with(pretty)
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    if installed.is_ok() {
        info!(environment = ?environment, "Tracing initialized");
    } else {
        debug!("Subscriber already installed");
    }
}
