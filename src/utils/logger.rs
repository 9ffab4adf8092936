use chrono::Local;
use eyre::Result;
use fern::Dispatch;

/// Sets up the application logger with console output.
///
/// # Arguments
/// * `default_level` - Level used when `RUST_LOG` is unset or unparsable
///
/// # Errors
/// * If a global logger has already been installed
pub fn setup_logger(default_level: log::LevelFilter) -> Result<()> {
    Dispatch::new()
        // Set logging level from RUST_LOG env var or fall back to the caller's default
        .level(
            std::env::var("RUST_LOG")
                .map(|level| level.parse().unwrap_or(default_level))
                .unwrap_or(default_level),
        )
        // alloy's transport layer is chatty at debug
        .level_for("hyper", log::LevelFilter::Warn)
        .level_for("reqwest", log::LevelFilter::Warn)
        .chain(std::io::stdout())
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                message
            ));
        })
        .apply()?;
    Ok(())
}
