//! Log setup for the grading service.
//!
//! Two targets carry our own events: `grading` (bank inventory, question
//! selection, one debug line per graded answer) and `markpoint_backend`
//! (boot, bank file loading, WebSocket lifecycle).
//!
//! LOG_LEVEL overrides `DEFAULT_FILTER`, e.g. "warn,grading=debug" to keep only
//! marking decisions. LOG_FORMAT=json switches to one JSON object per line.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,grading=debug,markpoint_backend=debug,tower_http=info,axum=info";

pub fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => {
            builder.json().init();
        }
        _ => {
            builder.init();
        }
    }
}
