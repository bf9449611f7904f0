//! Tracing subscriber setup for the `iscript` binary.
//!
//! Script-level diagnostics (`print` commands, captured command stdout)
//! are emitted as `tracing` events; this module wires them to stderr.
//! `RUST_LOG` overrides the default directive; `--verbose` raises the
//! default from `info` to `debug`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

/// Initialise the global tracing subscriber.
///
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool) {
    let default = if verbose { "iscript=debug" } else { "iscript=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .init();
}
