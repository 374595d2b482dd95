//! Tracing subscriber setup.
//!
//! Logs go to stderr so that the progress lines on stdout stay clean.
//! `RUST_LOG` overrides the default `info` level.

use tracing::Level;
use tracing_subscriber::EnvFilter;

pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::INFO };

    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    // a second init (tests, embedding) keeps the first subscriber
    tracing::subscriber::set_global_default(subscriber).ok();
}
