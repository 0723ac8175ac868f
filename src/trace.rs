//! Tracing subscriber bootstrap.

use std::fs::OpenOptions;
use std::sync::Arc;

use snafu::{ResultExt, Snafu};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use crate::config::LogConfig;

#[derive(Debug, Snafu)]
pub enum TraceError {
    #[snafu(display("invalid log level {level:?}: {source}"))]
    InvalidLevel {
        level: String,
        source: tracing_subscriber::filter::ParseError,
    },

    #[snafu(display("failed to open log file {output:?}: {source}"))]
    OpenOutput {
        output: String,
        source: std::io::Error,
    },

    #[snafu(display("failed to install tracing subscriber: {source}"))]
    Install {
        source: tracing::subscriber::SetGlobalDefaultError,
    },
}

/// Installs the global subscriber from the `[Log]` config section.
///
/// `output` is `stdout`, `stderr`, or a file path opened in append mode;
/// color is never emitted into a file.
pub fn init(config: &LogConfig) -> Result<(), TraceError> {
    let filter = EnvFilter::try_new(&config.level).context(InvalidLevelSnafu {
        level: config.level.clone(),
    })?;

    let (writer, ansi) = match config.output.as_str() {
        "stdout" => (BoxMakeWriter::new(std::io::stdout), config.with_color),
        "stderr" => (BoxMakeWriter::new(std::io::stderr), config.with_color),
        path => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .context(OpenOutputSnafu {
                    output: path.to_string(),
                })?;
            (BoxMakeWriter::new(Arc::new(file)), false)
        }
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_writer(writer)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context(InstallSnafu)
}
