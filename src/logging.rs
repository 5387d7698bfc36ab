use tracing_subscriber::EnvFilter;

/// The library and both binaries; other crates stay silent unless `RUST_LOG`
/// asks for them.
const CRATE_TARGETS: &[&str] = &["timetable", "cli", "http"];

/// Sets up the stderr subscriber used by `cli` and `http`.
///
/// Each `-v` raises the level for the timetable targets one step above
/// `warn`. A `RUST_LOG` filter replaces the computed one entirely.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let default_filter: String = CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",");

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // stdout belongs to the REPL tables.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
