//! Process-wide tracing for the tutor server.
//!
//! Every event becomes one plain-text line (`2026-01-31 09:15:02  INFO tutor_server::chat: ...`)
//! written to stdout and appended to `LOG_FILE`. `RUST_LOG` wins over `LOG_LEVEL` when both are set.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::fmt::{self, format::Writer, time::FormatTime, writer::MakeWriterExt};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;

/// Wall-clock timestamp in the server's local zone.
struct LocalTimestamp;

impl FormatTime for LocalTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{} ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Opens `path` for appending, creating the file and any missing parent directories.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn level_filter(server: &ServerConfig) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&server.log_level)
            .with_context(|| format!("LOG_LEVEL is not a valid filter: {}", server.log_level)),
    }
}

/// Installs the global subscriber for the server's log settings. Fails if one is already installed.
pub fn init_tracing(server: &ServerConfig) -> anyhow::Result<()> {
    let log_file = open_log_file(Path::new(&server.log_file))
        .with_context(|| format!("cannot open log file {}", server.log_file))?;

    let layer = fmt::layer()
        .with_timer(LocalTimestamp)
        .with_ansi(false)
        .with_writer(io::stdout.and(Arc::new(log_file)));

    tracing_subscriber::registry()
        .with(level_filter(server)?)
        .with(layer)
        .try_init()
        .context("tracing subscriber already installed")
}
