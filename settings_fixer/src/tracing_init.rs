use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::prelude::*;

/// Installs the global tracing subscriber.
///
/// Logs go to `log_file` when one is given and can be opened, otherwise to
/// stderr. Report output written by the fixer never passes through here.
pub fn init_tracing(verbose: bool, log_file: Option<&Path>) {
    let file = log_file.and_then(|path| {
        path.parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or(Ok(()), std::fs::create_dir_all)
            .and_then(|_| OpenOptions::new().create(true).append(true).open(path))
            .ok()
    });

    let stderr_level = if verbose { Level::DEBUG } else { Level::WARN };

    let layer: Box<dyn Layer<_> + Send + Sync> = match file {
        Some(file) => tracing_subscriber::fmt::layer()
            .with_writer(Mutex::new(file))
            .pretty()
            .with_ansi(false)
            .with_filter(LevelFilter::from_level(Level::DEBUG))
            .boxed(),
        None => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_ansi(false)
            .with_filter(LevelFilter::from_level(stderr_level))
            .boxed(),
    };

    tracing_subscriber::registry().with(layer).init()
}
