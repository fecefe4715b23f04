use crate::Result;
use flexi_logger::{
    colored_default_format, opt_format, Cleanup, Criterion, Duplicate, FileSpec, Logger,
    LoggerHandle, Naming,
};
use std::path::Path;

/// Log files rotate once they reach 10 MB.
const ROTATE_SIZE: u64 = 10 * 1024 * 1024;
const KEPT_LOG_FILES: usize = 7;

/// Starts the global logger. `RUST_LOG` wins over `default_level`.
///
/// Without `log_dir` everything goes to stderr in colour. With it, records are
/// written to numbered, size-rotated files in that directory and warnings are
/// duplicated to stderr.
///
/// The returned handle must stay alive for as long as logging is needed.
pub fn setup_logging(log_dir: Option<&Path>, default_level: &str) -> Result<LoggerHandle> {
    let logger = Logger::try_with_env_or_str(default_level)?;

    let handle = match log_dir {
        Some(dir) => logger
            .log_to_file(
                FileSpec::default()
                    .directory(dir)
                    .basename(env!("CARGO_PKG_NAME")),
            )
            .format(opt_format)
            .duplicate_to_stderr(Duplicate::Warn)
            .format_for_stderr(colored_default_format)
            .rotate(
                Criterion::Size(ROTATE_SIZE),
                Naming::Numbers,
                Cleanup::KeepLogFiles(KEPT_LOG_FILES),
            )
            .start()?,
        None => logger.format(colored_default_format).start()?,
    };
    Ok(handle)
}
