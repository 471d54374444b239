//! Logger bootstrap for the headless driver and tests.
use env_logger::{Builder, Env};
use log::LevelFilter;

/// Filter used when `RUST_LOG` is unset: this crate at `level`, everything
/// else (Bevy included) at warn.
fn default_filter(verbose: bool) -> String {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    format!("warn,{}={level}", env!("CARGO_CRATE_NAME"))
}

/// Initializes the global logger.
///
/// When `verbose` is `true`, per-agent phase transitions logged at debug
/// level are printed. Otherwise only flock lifecycle messages at info level
/// and above are shown. An explicit `RUST_LOG` always wins.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let mut builder = Builder::from_env(env);
    builder.format_timestamp_millis();

    // Only fails if a logger was already installed.
    let _ = builder.try_init();
}
