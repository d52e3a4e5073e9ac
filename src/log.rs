// src/log.rs
//
// Subscriber setup: `RUST_LOG`-style filter, stderr always, plus an optional
// append-only file without ANSI colours.
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber. `RUST_LOG` wins over `default_filter`.
/// A second call (tests, embedding) is a no-op; a log file that cannot be
/// opened only costs the file layer.
pub fn init(default_filter: &str, log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let file_layer = log_file.and_then(open_append).map(|file| {
        fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(Mutex::new(file))
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();
}

fn open_append(path: &Path) -> Option<fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            let _ = fs::create_dir_all(parent);
        }
    }
    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(f) => Some(f),
        Err(e) => {
            eprintln!("log file {} unavailable: {e}", path.display());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/run.log");
        init("debug", Some(&path));
        init("info", None);
        tracing::info!("after init");
        assert!(path.exists());
    }
}
