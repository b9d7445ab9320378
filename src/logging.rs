use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info,tower_http=info";

/// Translates a `LOGLEVEL` name (`DEBUG`, `WARNING`, `CRITICAL`, ...) into a
/// tracing filter directive.
pub fn loglevel_directive(loglevel: &str) -> Option<&'static str> {
    match loglevel.trim().to_ascii_uppercase().as_str() {
        "TRACE" => Some("trace"),
        "DEBUG" => Some("debug"),
        "INFO" => Some("info"),
        "WARN" | "WARNING" => Some("warn"),
        "ERROR" | "CRITICAL" | "FATAL" => Some("error"),
        _ => None,
    }
}

/// `--verbose` beats `RUST_LOG`, which beats `LOGLEVEL`.
pub fn build_filter(verbose: bool, rust_log: Option<&str>, loglevel: Option<&str>) -> EnvFilter {
    if verbose {
        return EnvFilter::new("debug");
    }

    if let Some(filter) = rust_log.and_then(|directives| EnvFilter::try_new(directives).ok()) {
        return filter;
    }

    let directive = loglevel
        .and_then(loglevel_directive)
        .unwrap_or(DEFAULT_FILTER);
    EnvFilter::new(directive)
}

pub fn init(verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let loglevel = std::env::var("LOGLEVEL").ok();
    let filter = build_filter(verbose, rust_log.as_deref(), loglevel.as_deref());

    let fmt_layer = fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
