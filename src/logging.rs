use std::str::FromStr;
use std::time::SystemTime;

use log::LevelFilter;

use crate::config::DRIVE_CONFIG;

/// sets up the global logger based on the `[logging]` section of the config.
///
/// Calling this more than once is harmless; only the first call installs a logger
pub fn init_logger() {
    let logging = &DRIVE_CONFIG.logging;
    let level = LevelFilter::from_str(logging.level.as_str()).unwrap_or(LevelFilter::Info);
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // rocket logs every request at info, which drowns out everything else
        .level_for("rocket", LevelFilter::Warn)
        .level_for("_", LevelFilter::Warn)
        .chain(std::io::stdout());
    if let Some(file) = &logging.file {
        match fern::log_file(file) {
            Ok(f) => dispatch = dispatch.chain(f),
            Err(e) => eprintln!("Failed to open log file {file}: {e:?}"),
        }
    }
    if dispatch.apply().is_err() {
        log::debug!("Logger was already initialized");
    }
}
