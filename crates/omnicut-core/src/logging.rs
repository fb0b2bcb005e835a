//! Tracing subscriber setup.

/// Log levels accepted by [`init_subscriber`] and the `logLevel` setting.
pub const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Normalize a user-supplied level name, returning `None` if unknown.
pub fn normalize_level(level: &str) -> Option<&'static str> {
    let lower = level.trim().to_ascii_lowercase();
    let lower = if lower == "warning" { "warn".to_string() } else { lower };
    LEVELS.iter().copied().find(|l| *l == lower)
}

/// Initialize the global tracing subscriber with stderr output.
///
/// `RUST_LOG` takes precedence over `level`. Subsequent calls are no-ops.
pub fn init_subscriber(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .compact();

    // set_global_default fails if already set
    let _ = subscriber.try_init();
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
