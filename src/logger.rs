use std::sync::Arc;

use spdlog::sink::{FileSink, StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, Logger, LoggerBuilder};

use crate::config::{Log, LogLevel};

impl From<LogLevel> for Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Critical => Level::Critical,
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
            LogLevel::Trace => Level::Trace,
        }
    }
}

/// Whether the run log starts empty or keeps the lines of earlier runs
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LogMode {
    Truncate,
    Append,
}

fn add_console_sinks(builder: &mut LoggerBuilder) -> spdlog::Result<()> {
    let stdout = Arc::new(StdStreamSink::builder()
        .std_stream(StdStream::Stdout)
        .level_filter(LevelFilter::MoreVerbose(Level::Warn))
        .build()?);

    let stderr = Arc::new(StdStreamSink::builder()
        .std_stream(StdStream::Stderr)
        .level_filter(LevelFilter::MoreSevereEqual(Level::Warn))
        .build()?);

    builder.sink(stdout).sink(stderr);

    Ok(())
}

pub fn configure_logger(log: &Log, mode: LogMode) -> spdlog::Result<()> {
    let mut builder = Logger::builder();

    if let Some(ref location) = log.location {
        let file_sink = Arc::new(FileSink::builder()
            .path(location)
            .truncate(mode == LogMode::Truncate)
            .build()?);
        builder.sink(file_sink);
    }

    if log.log_to_console || log.location.is_none() {
        add_console_sinks(&mut builder)?;
    }

    let run_logger = Arc::new(builder.build()?);
    run_logger.set_flush_level_filter(LevelFilter::All);
    run_logger.set_level_filter(LevelFilter::MoreSevereEqual(log.level.into()));

    spdlog::set_default_logger(run_logger);

    Ok(())
}
