//! Telemetry initialization (tracing/tracing-subscriber).
//!
//! - LOG_LEVEL: EnvFilter directives, e.g. "debug" or
//!   "info,scoring=debug,options=debug,tower_http=info".
//! - LOG_FORMAT: "pretty" (default), "compact" or "json".
//!
//! Targets used across the crate: motosound, catalog, options, scoring, round.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,motosound=debug,scoring=debug,round=debug,tower_http=info,axum=info";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    // Each arm yields a different subscriber type, so init in place.
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().with_current_span(true).init(),
        Ok("compact") => builder.compact().init(),
        _ => builder.init(),
    }
}
