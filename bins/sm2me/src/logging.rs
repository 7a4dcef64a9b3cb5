//! Diagnostic output on stderr.
use tracing::metadata::LevelFilter;
use tracing_subscriber::{filter::Targets, prelude::*};

/// Installs the global subscriber.
///
/// `RUST_LOG` takes precedence. Otherwise only warnings are shown, or everything down to `debug`
/// when `verbose` is set.
pub fn init(verbose: bool) {
    let default = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let targets = std::env::var("RUST_LOG")
        .ok()
        .and_then(|var| match var.parse::<Targets>() {
            Ok(targets) => Some(targets),
            Err(err) => {
                eprintln!("ignoring invalid RUST_LOG: {err}");
                None
            }
        })
        .unwrap_or_else(|| Targets::new().with_default(default));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(LevelFilter::TRACE)
        .finish()
        .with(targets)
        .init();
}
