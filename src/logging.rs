use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Initialise the tracing subscriber once per process.
///
/// Library diagnostics (e.g. the invalid-unit warning) are emitted as
/// `tracing` events; this installs a compact subscriber for them,
/// filtered by `RUST_LOG` with a `tictoc=warn` default. Events go to
/// stderr so they never interleave with measurement lines on stdout.
pub fn init() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tictoc=warn"));

        fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
            .init();
    });
}
