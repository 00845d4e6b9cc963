// Logging setup for the CLI
//
// Verbosity follows the old 0/1/2 levels: 0 shows warnings and errors only,
// 1 adds progress, 2 adds cache and pagination detail. RUST_LOG overrides.
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

pub fn level_for_verbosity(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Install the global subscriber, writing to stderr so stdout stays JSON.
pub fn init_logging(verbosity: u8) {
    let filter = build_env_filter(level_for_verbosity(verbosity));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn build_env_filter(level: Level) -> EnvFilter {
    let level_str = level.as_str().to_lowercase();

    // Dependencies stay at warn
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,spacetraders_cache={level},st={level}", level = level_str))
    })
}
